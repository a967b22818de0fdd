//! Archive packaging of generated artifacts
//!
//! An [`ArtifactSet`] is serialized into a single archive rooted at a folder
//! named after the lower-cased entity, with the `forms/`, `config/` and
//! `pages/` sub-paths preserved. Archives are built in memory and only
//! written to disk once complete, so a failed export never leaves a partial
//! file behind.

use crate::error::{FeatureBuilderError, Result};
use crate::model::{EntityField, EntityRelation, FeatureConfig};
use crate::orchestrator::{generate_all_code_files, ArtifactSet};
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Archive container format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchiveFormat {
    /// `.zip`
    #[default]
    Zip,
    /// `.tar.gz`
    TarGz,
}

impl ArchiveFormat {
    /// File extension without the leading dot
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::TarGz => "tar.gz",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zip => write!(f, "zip"),
            Self::TarGz => write!(f, "tar-gz"),
        }
    }
}

/// Archive file name for an entity: `{lower}-feature.{ext}`
#[must_use]
pub fn archive_file_name(folder: &str, format: ArchiveFormat) -> String {
    format!("{folder}-feature.{}", format.extension())
}

/// Serialize an artifact set into an in-memory archive
///
/// Every file lands under `folder/`. An empty folder name, or a failure to
/// create the folder entry, aborts with [`FeatureBuilderError::ArchiveFolder`].
///
/// # Errors
///
/// Returns an error if the folder entry cannot be created or the archive
/// writer fails.
pub fn package_artifacts(set: &ArtifactSet, folder: &str, format: ArchiveFormat) -> Result<Vec<u8>> {
    let folder = folder.trim_matches('/');
    if folder.is_empty() {
        return Err(FeatureBuilderError::ArchiveFolder {
            folder: folder.to_string(),
            reason: "folder name is empty".to_string(),
        });
    }

    let bytes = match format {
        ArchiveFormat::Zip => package_zip(set, folder)?,
        ArchiveFormat::TarGz => package_tar_gz(set, folder)?,
    };

    debug!(
        folder = %folder,
        format = %format,
        files = set.len(),
        bytes = bytes.len(),
        "Packaged artifacts"
    );
    Ok(bytes)
}

fn package_zip(set: &ArtifactSet, folder: &str) -> Result<Vec<u8>> {
    // Fixed timestamp keeps archives byte-identical across runs
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(0o644);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.add_directory(format!("{folder}/"), options)
        .map_err(|e| FeatureBuilderError::ArchiveFolder {
            folder: folder.to_string(),
            reason: e.to_string(),
        })?;

    for file in set {
        zip.start_file(format!("{folder}/{}", file.path), options)?;
        zip.write_all(file.content.as_bytes())?;
    }

    Ok(zip.finish()?.into_inner())
}

fn package_tar_gz(set: &ArtifactSet, folder: &str) -> Result<Vec<u8>> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut tar = tar::Builder::new(encoder);

    let mut dir = tar::Header::new_gnu();
    dir.set_entry_type(tar::EntryType::Directory);
    dir.set_size(0);
    dir.set_mode(0o755);
    dir.set_mtime(0);
    tar.append_data(&mut dir, format!("{folder}/"), std::io::empty())
        .map_err(|e| FeatureBuilderError::ArchiveFolder {
            folder: folder.to_string(),
            reason: e.to_string(),
        })?;

    for file in set {
        let data = file.content.as_bytes();
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(0);
        tar.append_data(&mut header, format!("{folder}/{}", file.path), data)?;
    }

    let encoder = tar.into_inner()?;
    Ok(encoder.finish()?)
}

/// Generate, package and save a feature archive
///
/// The archive is written to `{out_dir}/{lower}-feature.{ext}` through a
/// temporary file in the same directory that is only renamed into place
/// once fully written.
///
/// # Errors
///
/// Returns an error if the output directory cannot be created, packaging
/// fails, or the archive cannot be written.
///
/// # Examples
///
/// ```no_run
/// # use feature_builder::model::{EntityField, FeatureConfig};
/// # use feature_builder::packager::{download_feature_files, ArchiveFormat};
/// # fn main() -> feature_builder::error::Result<()> {
/// let fields = vec![EntityField::primary_id()];
/// let path = download_feature_files(
///     &FeatureConfig::new("Product"),
///     &fields,
///     &[],
///     std::path::Path::new("dist"),
///     ArchiveFormat::Zip,
/// )?;
/// assert!(path.ends_with("product-feature.zip"));
/// # Ok(())
/// # }
/// ```
pub fn download_feature_files(
    config: &FeatureConfig,
    fields: &[EntityField],
    relations: &[EntityRelation],
    out_dir: &Path,
    format: ArchiveFormat,
) -> Result<PathBuf> {
    let set = generate_all_code_files(config, fields, relations);
    let bytes = package_artifacts(&set, &set.folder, format)?;

    std::fs::create_dir_all(out_dir)?;
    let target = out_dir.join(archive_file_name(&set.folder, format));

    let mut tmp = NamedTempFile::new_in(out_dir)?;
    tmp.write_all(&bytes)?;
    tmp.flush()?;
    tmp.persist(&target).map_err(|e| e.error)?;

    info!(
        path = %target.display(),
        files = set.len(),
        bytes = bytes.len(),
        "Wrote feature archive"
    );
    Ok(target)
}

/// Write an artifact set as plain files under `dir/{folder}/`
///
/// Returns the feature folder.
///
/// # Errors
///
/// Returns an error if a directory or file cannot be written.
pub fn write_artifacts(set: &ArtifactSet, dir: &Path) -> Result<PathBuf> {
    if set.folder.is_empty() {
        return Err(FeatureBuilderError::ArchiveFolder {
            folder: String::new(),
            reason: "folder name is empty".to_string(),
        });
    }

    let root = dir.join(&set.folder);
    std::fs::create_dir_all(&root).map_err(|e| FeatureBuilderError::ArchiveFolder {
        folder: root.display().to_string(),
        reason: e.to_string(),
    })?;

    for file in set {
        let path = file
            .path
            .split('/')
            .fold(root.clone(), |path, part| path.join(part));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, &file.content)?;
    }

    info!(path = %root.display(), files = set.len(), "Wrote feature files");
    Ok(root)
}
