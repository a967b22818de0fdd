//! feature-builder: deterministic CRUD feature scaffolding
//!
//! A declarative entity model (configuration, ordered fields, relations) is
//! turned into a set of interdependent TypeScript/React source files: type
//! declarations, an API client, data-access hooks, form and table configs,
//! page components and route definitions. The set can be previewed, written
//! to disk or packaged into an archive.
//!
//! # Design Principles
//!
//! 1. **One naming context**: every shared identifier is derived once from
//!    the entity model and threaded through all generators
//! 2. **Total generators**: generation never fails on a well-formed model;
//!    only packaging and file I/O return errors
//! 3. **Determinism**: identical input produces byte-identical output
//!
//! # Quick Start
//!
//! ```rust
//! use feature_builder::prelude::*;
//!
//! let mut session = BuilderSession::default();
//! session.update_config(ConfigPatch {
//!     name: Some("Product".to_string()),
//!     ..ConfigPatch::default()
//! })?;
//!
//! let artifacts = session.generate();
//! assert!(artifacts.contains("product.d.ts"));
//! assert!(artifacts.get("apis.ts").unwrap().contains("/api/Products"));
//! # Ok::<(), FeatureBuilderError>(())
//! ```

// Lint configuration is handled at the workspace level in Cargo.toml
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod generators;
pub mod model;
pub mod naming;
pub mod observability;
pub mod orchestrator;
pub mod packager;
pub mod session;
pub mod types;

pub mod prelude {
    //! Convenience re-exports for common types and functions
    //!
    //! # Examples
    //!
    //! ```rust
    //! use feature_builder::prelude::*;
    //! ```

    // Entity model
    pub use crate::model::{
        ConfigPatch, DefaultValue, EntityField, EntityRelation, FeatureConfig, FeatureDefinition,
        FieldKind, FieldOption, FieldPatch, FieldType, RelationPatch, RelationType,
        ValidationRules, ViewMode,
    };

    // Naming
    pub use crate::naming::{NameHelpers, NamingContext};

    // Session and generation
    pub use crate::orchestrator::{generate_all_code_files, ArtifactSet, GeneratedFile};
    pub use crate::session::BuilderSession;

    // Packaging
    pub use crate::packager::{
        download_feature_files, package_artifacts, write_artifacts, ArchiveFormat,
    };

    // Settings and errors
    pub use crate::config::BuilderSettings;
    pub use crate::error::{FeatureBuilderError, Result};
}
