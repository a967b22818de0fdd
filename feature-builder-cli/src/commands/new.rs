//! Starter definition command

use anyhow::{bail, Context, Result};
use clap::Args;
use console::{style, Emoji};
use feature_builder::config::BuilderSettings;
use feature_builder::model::ConfigPatch;
use feature_builder::naming::NameHelpers;
use feature_builder::session::BuilderSession;
use std::path::PathBuf;

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "");

/// Write a starter feature definition
#[derive(Debug, Args)]
pub struct NewCommand {
    /// Entity name (`PascalCase`, e.g. `Product`, `OrderItem`)
    pub name: String,

    /// Definition file to write; `.json` for JSON, anything else TOML
    /// (default: `<name>.feature.toml`)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Plural name (default: English plural of the name)
    #[arg(long)]
    pub plural: Option<String>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl NewCommand {
    /// Definition path for this command
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}.feature.toml",
                NameHelpers::to_kebab_case(&self.name)
            ))
        })
    }

    /// Execute the command, returning the written path
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a valid identifier, the file
    /// already exists without `--force`, or the file cannot be written.
    pub fn execute(&self, settings: &BuilderSettings) -> Result<PathBuf> {
        if !NameHelpers::is_valid_variable_name(&self.name) {
            bail!(
                "Invalid entity name: {}. Must start with a letter, '_' or '$' and contain only letters, digits, '_' or '$'",
                self.name
            );
        }

        let path = self.output_path();
        if path.exists() && !self.force {
            bail!(
                "File '{}' already exists. Use --force to overwrite it.",
                path.display()
            );
        }

        let mut session = BuilderSession::new(settings.clone());
        session.update_config(ConfigPatch {
            name: Some(self.name.clone()),
            display_name: Some(NameHelpers::to_title(&self.name)),
            plural_name: Some(
                self.plural
                    .clone()
                    .unwrap_or_else(|| NameHelpers::pluralize(&self.name)),
            ),
            ..ConfigPatch::default()
        })?;

        session
            .to_definition()
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        println!(
            "{CHECK}{} {}",
            style("Created").green().bold(),
            style(path.display()).cyan()
        );
        println!();
        println!("Next steps:");
        println!("  1. Add fields and relations to {}", path.display());
        println!("  2. feature-builder preview {}", path.display());
        println!("  3. feature-builder generate {}", path.display());

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_builder::model::FeatureDefinition;

    fn command(name: &str, output: PathBuf) -> NewCommand {
        NewCommand {
            name: name.to_string(),
            output: Some(output),
            plural: None,
            force: false,
        }
    }

    #[test]
    fn test_default_output_path() {
        let cmd = NewCommand {
            name: "OrderItem".to_string(),
            output: None,
            plural: None,
            force: false,
        };
        assert_eq!(cmd.output_path(), PathBuf::from("order-item.feature.toml"));
    }

    #[test]
    fn test_writes_template_definition() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("person.feature.json");
        command("Person", path.clone())
            .execute(&BuilderSettings::default())
            .unwrap();

        let definition = FeatureDefinition::load(&path).unwrap();
        assert_eq!(definition.config.name, "Person");
        assert_eq!(definition.config.plural_name.as_deref(), Some("People"));
        assert_eq!(definition.fields.len(), 2);
        assert!(definition.fields[0].is_primary);
    }

    #[test]
    fn test_settings_seed_api_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("product.feature.toml");
        let settings = BuilderSettings {
            api_prefix: "/api/v2".to_string(),
            ..BuilderSettings::default()
        };
        command("Product", path.clone()).execute(&settings).unwrap();

        let definition = FeatureDefinition::load(&path).unwrap();
        assert_eq!(definition.config.api_prefix, "/api/v2");
    }

    #[test]
    fn test_refuses_invalid_name() {
        let dir = tempfile::tempdir().unwrap();
        let result = command("2fast", dir.path().join("x.toml")).execute(&BuilderSettings::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("product.feature.toml");
        std::fs::write(&path, "keep me").unwrap();

        let result = command("Product", path.clone()).execute(&BuilderSettings::default());
        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");

        let mut cmd = command("Product", path);
        cmd.force = true;
        assert!(cmd.execute(&BuilderSettings::default()).is_ok());
    }
}
