//! Error types and error handling
//!
//! Generators and the orchestrator are total and never fail. Errors only
//! arise at the edges: mutating the entity model, loading settings and
//! definitions, and writing archives.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T, E = FeatureBuilderError> = std::result::Result<T, E>;

/// Feature builder error type
#[derive(Debug, Error)]
pub enum FeatureBuilderError {
    /// Entity or field name is not a usable identifier
    #[error("Invalid name: '{0}'. Must match ^[a-zA-Z_$][a-zA-Z0-9_$]*$")]
    InvalidName(String),

    /// No field with the given id
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    /// No relation with the given id
    #[error("Relation not found: {0}")]
    RelationNotFound(String),

    /// Reorder index outside the field list
    #[error("Index {index} out of range for {len} fields")]
    IndexOutOfRange {
        /// Offending index
        index: usize,
        /// Current number of fields
        len: usize,
    },

    /// The archive root folder could not be created
    #[error("Failed to create archive folder '{folder}': {reason}")]
    ArchiveFolder {
        /// Folder that was being created
        folder: String,
        /// Underlying cause
        reason: String,
    },

    /// Zip writer failure
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// A feature definition could not be parsed
    #[error("Invalid feature definition: {0}")]
    Definition(String),
}

impl From<figment::Error> for FeatureBuilderError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl From<serde_json::Error> for FeatureBuilderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Definition(err.to_string())
    }
}

impl From<toml::de::Error> for FeatureBuilderError {
    fn from(err: toml::de::Error) -> Self {
        Self::Definition(err.to_string())
    }
}

impl FeatureBuilderError {
    /// Whether this error came from creating the archive root folder
    #[must_use]
    pub const fn is_archive_folder(&self) -> bool {
        matches!(self, Self::ArchiveFolder { .. })
    }
}
