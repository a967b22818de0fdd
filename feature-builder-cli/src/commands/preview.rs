//! Artifact preview command

use anyhow::{bail, Result};
use clap::Args;
use console::style;
use feature_builder::orchestrator::{generate_all_code_files, ArtifactSet};
use std::path::PathBuf;

use crate::load_definition;

/// List generated artifacts or print one of them
#[derive(Debug, Args)]
pub struct PreviewCommand {
    /// Feature definition file
    pub definition: PathBuf,

    /// Artifact to print (e.g. `forms/create.tsx`)
    #[arg(long, value_name = "PATH")]
    pub file: Option<String>,
}

impl PreviewCommand {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the definition cannot be loaded or `--file`
    /// names an artifact that is not generated.
    pub fn execute(&self) -> Result<()> {
        let definition = load_definition(&self.definition)?;
        let set = generate_all_code_files(
            &definition.config,
            &definition.fields,
            &definition.relations,
        );

        match self.file.as_deref() {
            Some(path) => {
                let Some(content) = set.get(path) else {
                    bail!(
                        "No generated artifact named '{path}'. Available: {}",
                        set.paths().collect::<Vec<_>>().join(", ")
                    );
                };
                print!("{content}");
            }
            None => {
                println!(
                    "{} {}",
                    style(&set.folder).cyan().bold(),
                    style(format!("({} files)", set.len())).dim()
                );
                for line in listing(&set) {
                    println!("{line}");
                }
            }
        }

        Ok(())
    }
}

/// One line per artifact: path, size and description
#[must_use]
pub fn listing(set: &ArtifactSet) -> Vec<String> {
    let width = set.paths().map(str::len).max().unwrap_or(0);
    set.files()
        .iter()
        .map(|file| {
            format!(
                "  {:<width$}  {:>6} B  {}",
                file.path,
                file.content.len(),
                file.description
            )
        })
        .collect()
}
