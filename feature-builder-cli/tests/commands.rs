//! Integration tests for the CLI commands

use clap::Parser;
use feature_builder_cli::{Cli, Command, OutputFormat};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn run(args: &[&str]) -> anyhow::Result<()> {
    Cli::try_parse_from(std::iter::once("feature-builder").chain(args.iter().copied()))?.run()
}

fn settings_file(dir: &Path) -> String {
    let path = dir.join("feature-builder.toml");
    fs::write(
        &path,
        format!(
            "api_prefix = \"/api/v2\"\n\n[archive]\nformat = \"zip\"\noutput_dir = \"{}\"\n",
            dir.join("dist").display()
        ),
    )
    .unwrap();
    path.display().to_string()
}

#[test]
fn test_parse_generate_arguments() {
    let cli = Cli::try_parse_from([
        "feature-builder",
        "-v",
        "generate",
        "product.feature.toml",
        "--format",
        "tar-gz",
        "--out",
        "dist",
    ])
    .unwrap();

    assert!(cli.verbose);
    let Command::Generate(cmd) = cli.command else {
        panic!("expected generate");
    };
    assert_eq!(cmd.format, Some(OutputFormat::TarGz));
    assert_eq!(cmd.out.as_deref(), Some(Path::new("dist")));
}

#[test]
fn test_new_generate_diff_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let config = settings_file(temp_dir.path());
    let definition = temp_dir.path().join("product.feature.toml");
    let definition = definition.to_str().unwrap();
    let out = temp_dir.path().join("src");
    let out = out.to_str().unwrap();

    run(&["--config", &config, "new", "Product", "-o", definition]).unwrap();
    run(&["--config", &config, "generate", definition]).unwrap();
    assert!(temp_dir
        .path()
        .join("dist")
        .join("product-feature.zip")
        .exists());

    run(&["--config", &config, "generate", definition, "--format", "files", "--out", out])
        .unwrap();
    let apis = fs::read_to_string(temp_dir.path().join("src/product/apis.ts")).unwrap();
    assert!(apis.contains("/api/v2/Products"));

    run(&["--config", &config, "diff", definition, "--dir", out, "--check"]).unwrap();

    fs::write(temp_dir.path().join("src/product/apis.ts"), "edited\n").unwrap();
    assert!(run(&["--config", &config, "diff", definition, "--dir", out, "--check"]).is_err());
    assert!(run(&["--config", &config, "diff", definition, "--dir", out]).is_ok());
}

#[test]
fn test_preview_unknown_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config = settings_file(temp_dir.path());
    let definition = temp_dir.path().join("order.feature.json");
    let definition = definition.to_str().unwrap();

    run(&["--config", &config, "new", "Order", "-o", definition]).unwrap();
    run(&["--config", &config, "preview", definition]).unwrap();
    run(&["--config", &config, "preview", definition, "--file", "routes.tsx"]).unwrap();
    assert!(run(&["--config", &config, "preview", definition, "--file", "relations.ts"]).is_err());
    run(&["--config", &config, "fields", definition]).unwrap();
}

#[test]
fn test_invalid_entity_name_in_definition() {
    let temp_dir = TempDir::new().unwrap();
    let definition = temp_dir.path().join("bad.feature.toml");
    fs::write(&definition, "[config]\nname = \"my feature\"\n").unwrap();

    let err = feature_builder_cli::load_definition(&definition).unwrap_err();
    assert!(err.to_string().contains("Invalid entity name"));
}

#[test]
fn test_missing_settings_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.toml");
    let result = run(&["--config", missing.to_str().unwrap(), "fields", "x.toml"]);
    assert!(result.is_err());
}
