//! Diff between regenerated artifacts and an exported feature folder

use anyhow::{bail, Context, Result};
use clap::Args;
use console::{style, Emoji};
use feature_builder::orchestrator::{generate_all_code_files, ArtifactSet};
use similar::{ChangeTag, TextDiff};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::load_definition;

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "");
static FILE: Emoji<'_, '_> = Emoji("📄 ", "");

/// Compare regenerated artifacts with an exported feature folder
#[derive(Debug, Args)]
pub struct DiffCommand {
    /// Feature definition file
    pub definition: PathBuf,

    /// Exported feature folder, or the directory containing it
    #[arg(long, value_name = "DIR")]
    pub dir: PathBuf,

    /// Exit with an error when anything differs
    #[arg(long)]
    pub check: bool,
}

/// Comparison result for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// Exported file matches the regenerated one
    Unchanged(String),
    /// Exported file differs
    Changed {
        /// Relative path
        path: String,
        /// Exported content
        exported: String,
        /// Regenerated content
        generated: String,
    },
    /// Generated but not exported
    Missing(String),
    /// Exported but no longer generated
    Stale(String),
}

impl FileStatus {
    /// Relative path of the file
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Unchanged(path)
            | Self::Missing(path)
            | Self::Stale(path)
            | Self::Changed { path, .. } => path,
        }
    }

    /// Whether the file needs attention
    #[must_use]
    pub const fn is_difference(&self) -> bool {
        !matches!(self, Self::Unchanged(_))
    }
}

impl DiffCommand {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the definition or folder cannot be read, or if
    /// `--check` is set and anything differs.
    pub fn execute(&self) -> Result<()> {
        let definition = load_definition(&self.definition)?;
        let set = generate_all_code_files(
            &definition.config,
            &definition.fields,
            &definition.relations,
        );

        let root = feature_root(&self.dir, &set.folder);
        let statuses = compare(&set, &root)?;
        let differences = statuses.iter().filter(|s| s.is_difference()).count();

        for status in &statuses {
            print_status(status);
        }

        if differences == 0 {
            println!("{CHECK}{}", style("Exported files are up to date").green());
            return Ok(());
        }

        println!();
        println!("{differences} file(s) differ from {}", root.display());
        if self.check {
            bail!("{differences} file(s) differ from the definition");
        }
        Ok(())
    }
}

/// `dir/{folder}` when it exists, otherwise `dir` itself
#[must_use]
pub fn feature_root(dir: &Path, folder: &str) -> PathBuf {
    let nested = dir.join(folder);
    if nested.is_dir() {
        nested
    } else {
        dir.to_path_buf()
    }
}

/// Compare every artifact with the file under `root`
///
/// Generated files come first in generation order, followed by stale files
/// in path order.
///
/// # Errors
///
/// Returns an error if `root` is not a directory or a file cannot be read.
pub fn compare(set: &ArtifactSet, root: &Path) -> Result<Vec<FileStatus>> {
    if !root.is_dir() {
        bail!("Not a directory: {}", root.display());
    }

    let mut statuses = Vec::with_capacity(set.len());
    for file in set {
        let path = root.join(&file.path);
        if !path.exists() {
            statuses.push(FileStatus::Missing(file.path.clone()));
            continue;
        }
        let exported = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if exported == file.content {
            statuses.push(FileStatus::Unchanged(file.path.clone()));
        } else {
            statuses.push(FileStatus::Changed {
                path: file.path.clone(),
                exported,
                generated: file.content.clone(),
            });
        }
    }

    let mut stale: Vec<String> = exported_files(root)?
        .into_iter()
        .filter(|path| !set.contains(path))
        .collect();
    stale.sort();
    statuses.extend(stale.into_iter().map(FileStatus::Stale));

    Ok(statuses)
}

/// Relative `/`-separated paths of every regular file below `root`
///
/// Symbolic links are not followed.
fn exported_files(root: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry =
            entry.with_context(|| format!("Failed to read directory {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(root) {
            let parts: Vec<_> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect();
            files.push(parts.join("/"));
        }
    }

    Ok(files)
}

fn print_status(status: &FileStatus) {
    match status {
        FileStatus::Unchanged(path) => {
            println!("  {} {}", style("=").dim(), style(path).dim());
        }
        FileStatus::Missing(path) => {
            println!("  {} {path} {}", style("+").green(), style("(not exported)").dim());
        }
        FileStatus::Stale(path) => {
            println!("  {} {path} {}", style("-").red(), style("(no longer generated)").dim());
        }
        FileStatus::Changed {
            path,
            exported,
            generated,
        } => {
            println!();
            println!("{FILE}{}", style(path).bold());
            let diff = TextDiff::from_lines(exported, generated);
            for change in diff.iter_all_changes() {
                match change.tag() {
                    ChangeTag::Delete => print!("{}", style(format!("-{change}")).red()),
                    ChangeTag::Insert => print!("{}", style(format!("+{change}")).green()),
                    ChangeTag::Equal => print!(" {change}"),
                }
            }
            println!();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_builder::model::{EntityField, FeatureConfig};
    use feature_builder::packager::write_artifacts;

    fn artifacts() -> ArtifactSet {
        generate_all_code_files(
            &FeatureConfig::new("Product"),
            &[EntityField::primary_id(), EntityField::new("f1", "title")],
            &[],
        )
    }

    #[test]
    fn test_fresh_export_is_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let set = artifacts();
        let root = write_artifacts(&set, dir.path()).unwrap();

        assert_eq!(feature_root(dir.path(), "product"), root);
        let statuses = compare(&set, &root).unwrap();
        assert_eq!(statuses.len(), set.len());
        assert!(statuses.iter().all(|s| !s.is_difference()));
    }

    #[test]
    fn test_reports_changed_missing_and_stale() {
        let dir = tempfile::tempdir().unwrap();
        let set = artifacts();
        let root = write_artifacts(&set, dir.path()).unwrap();

        std::fs::write(root.join("apis.ts"), "edited\n").unwrap();
        std::fs::remove_file(root.join("routes.tsx")).unwrap();
        std::fs::write(root.join("relations.ts"), "old\n").unwrap();

        let statuses = compare(&set, &root).unwrap();
        let changed: Vec<&str> = statuses
            .iter()
            .filter(|s| matches!(s, FileStatus::Changed { .. }))
            .map(FileStatus::path)
            .collect();
        assert_eq!(changed, vec!["apis.ts"]);
        assert!(statuses.contains(&FileStatus::Missing("routes.tsx".to_string())));
        assert_eq!(
            statuses.last(),
            Some(&FileStatus::Stale("relations.ts".to_string()))
        );
    }

    #[test]
    fn test_nested_stale_paths_use_slashes() {
        let dir = tempfile::tempdir().unwrap();
        let set = artifacts();
        let root = write_artifacts(&set, dir.path()).unwrap();
        std::fs::write(root.join("pages").join("old.tsx"), "").unwrap();

        let statuses = compare(&set, &root).unwrap();
        assert!(statuses.contains(&FileStatus::Stale("pages/old.tsx".to_string())));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directories_are_not_followed() {
        let dir = tempfile::tempdir().unwrap();
        let set = artifacts();
        let root = write_artifacts(&set, dir.path()).unwrap();
        std::os::unix::fs::symlink(&root, root.join("pages").join("loop")).unwrap();

        let statuses = compare(&set, &root).unwrap();
        assert_eq!(statuses.len(), set.len());
        assert!(statuses.iter().all(|s| !s.is_difference()));
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(compare(&artifacts(), &dir.path().join("nope")).is_err());
    }
}
