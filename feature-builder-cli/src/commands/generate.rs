//! Feature generation command

use anyhow::{Context, Result};
use clap::Args;
use console::{style, Emoji};
use feature_builder::config::BuilderSettings;
use feature_builder::orchestrator::generate_all_code_files;
use feature_builder::packager::{download_feature_files, write_artifacts, ArchiveFormat};
use std::path::PathBuf;

use crate::{load_definition, OutputFormat};

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "");
static PACKAGE: Emoji<'_, '_> = Emoji("📦 ", "");
static FILE: Emoji<'_, '_> = Emoji("📄 ", "");

/// Generate a feature and package it
///
/// Examples:
///   feature-builder generate product.feature.toml
///   feature-builder generate product.feature.toml --format tar-gz --out dist
///   feature-builder generate product.feature.toml --format files --out src/features
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Feature definition file
    pub definition: PathBuf,

    /// Output directory (default: `archive.output_dir` from settings)
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Output format (default: `archive.format` from settings)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl GenerateCommand {
    /// Execute the command, returning the archive or feature folder path
    ///
    /// # Errors
    ///
    /// Returns an error if the definition cannot be loaded or the output
    /// cannot be written.
    pub fn execute(&self, settings: &BuilderSettings) -> Result<PathBuf> {
        let definition = load_definition(&self.definition)?;
        let out_dir = self
            .out
            .clone()
            .unwrap_or_else(|| settings.archive.output_dir.clone());
        let format = self
            .format
            .unwrap_or_else(|| settings.archive.format.into());

        println!(
            "\n{PACKAGE}Generating feature: {}",
            style(&definition.config.name).cyan().bold()
        );

        let path = match format {
            OutputFormat::Files => {
                let set = generate_all_code_files(
                    &definition.config,
                    &definition.fields,
                    &definition.relations,
                );
                let root = write_artifacts(&set, &out_dir)
                    .with_context(|| format!("Failed to write files to {}", out_dir.display()))?;
                for file in &set {
                    println!(
                        "  {FILE}{} {}",
                        style(&file.path).bold(),
                        style(format!("({})", file.description)).dim()
                    );
                }
                root
            }
            OutputFormat::Zip | OutputFormat::TarGz => {
                let archive = if format == OutputFormat::Zip {
                    ArchiveFormat::Zip
                } else {
                    ArchiveFormat::TarGz
                };
                download_feature_files(
                    &definition.config,
                    &definition.fields,
                    &definition.relations,
                    &out_dir,
                    archive,
                )
                .with_context(|| {
                    format!("Failed to write feature archive to {}", out_dir.display())
                })?
            }
        };

        println!(
            "\n{CHECK}{} {}",
            style("Wrote").green().bold(),
            style(path.display()).cyan()
        );
        Ok(path)
    }
}
