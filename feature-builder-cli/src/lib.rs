//! feature-builder CLI library
//!
//! Command-line surface over the `feature_builder` engine: create starter
//! definitions, generate and package features, preview artifacts and diff
//! regenerated output against an earlier export.

pub mod commands;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use feature_builder::config::BuilderSettings;
use feature_builder::model::FeatureDefinition;
use feature_builder::naming::NameHelpers;
use feature_builder::packager::ArchiveFormat;
use std::path::{Path, PathBuf};

pub use commands::{DiffCommand, FieldsCommand, GenerateCommand, NewCommand, PreviewCommand};

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "feature-builder")]
#[command(version)]
#[command(about = "Generate CRUD feature modules from an entity definition", long_about = None)]
pub struct Cli {
    /// Settings file (defaults to ./feature-builder.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a starter feature definition
    New(NewCommand),
    /// Generate a feature and package it
    Generate(GenerateCommand),
    /// List generated artifacts or print one of them
    Preview(PreviewCommand),
    /// List the fields of a definition with their mapped types
    Fields(FieldsCommand),
    /// Compare regenerated artifacts with an exported feature folder
    Diff(DiffCommand),
}

/// Output of the `generate` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Zip archive
    Zip,
    /// Gzipped tarball
    TarGz,
    /// Plain files in a feature folder
    Files,
}

impl From<ArchiveFormat> for OutputFormat {
    fn from(format: ArchiveFormat) -> Self {
        match format {
            ArchiveFormat::Zip => Self::Zip,
            ArchiveFormat::TarGz => Self::TarGz,
        }
    }
}

impl Cli {
    /// Load builder settings from `--config` or the working directory
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit settings file is missing or any
    /// source fails to parse.
    pub fn settings(&self) -> Result<BuilderSettings> {
        match &self.config {
            Some(path) => {
                if !path.exists() {
                    bail!("Settings file not found: {}", path.display());
                }
                BuilderSettings::load_from(path)
                    .with_context(|| format!("Failed to load settings from {}", path.display()))
            }
            None => BuilderSettings::load().context("Failed to load settings"),
        }
    }

    /// Run the selected command
    ///
    /// # Errors
    ///
    /// Returns an error if settings cannot be loaded or the command fails.
    pub fn run(self) -> Result<()> {
        let settings = self.settings()?;
        tracing::debug!(?settings, "Running command");

        match self.command {
            Command::New(cmd) => cmd.execute(&settings).map(drop),
            Command::Generate(cmd) => cmd.execute(&settings).map(drop),
            Command::Preview(cmd) => cmd.execute(),
            Command::Fields(cmd) => cmd.execute(),
            Command::Diff(cmd) => cmd.execute(),
        }
    }
}

/// Read a feature definition and check its entity name
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the entity
/// name is not a valid identifier.
pub fn load_definition(path: &Path) -> Result<FeatureDefinition> {
    let definition = FeatureDefinition::load(path)
        .with_context(|| format!("Failed to read feature definition {}", path.display()))?;

    if !NameHelpers::is_valid_variable_name(&definition.config.name) {
        bail!(
            "Invalid entity name '{}' in {}. Must be a valid identifier",
            definition.config.name,
            path.display()
        );
    }

    Ok(definition)
}
