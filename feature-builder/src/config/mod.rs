//! Configuration management for the feature builder
//!
//! Settings are loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `FEATURE_BUILDER_` prefix,
//!    `__` separates nested keys)
//! 2. `./feature-builder.toml` or an explicitly given file
//! 3. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # feature-builder.toml
//! api_prefix = "/api/v2"
//! default_option_count = 4
//!
//! [archive]
//! format = "tar-gz"
//! output_dir = "./dist"
//! ```

use crate::error::Result;
use crate::packager::ArchiveFormat;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default settings file looked up in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "feature-builder.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "FEATURE_BUILDER_";

/// Archive output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveSettings {
    /// Archive format used by exports
    pub format: ArchiveFormat,

    /// Directory the archive is written into
    pub output_dir: PathBuf,
}

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self {
            format: ArchiveFormat::Zip,
            output_dir: PathBuf::from("."),
        }
    }
}

/// Complete builder configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderSettings {
    /// URL prefix seeded into new feature configs
    pub api_prefix: String,

    /// Number of synthetic options created for new choice fields
    pub default_option_count: usize,

    /// Archive settings
    pub archive: ArchiveSettings,
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            api_prefix: "/api".to_string(),
            default_option_count: 3,
            archive: ArchiveSettings::default(),
        }
    }
}

impl BuilderSettings {
    /// Load settings from `./feature-builder.toml` and the environment
    ///
    /// A missing settings file is not an error; defaults apply.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use feature_builder::config::BuilderSettings;
    ///
    /// # fn example() -> feature_builder::error::Result<()> {
    /// let settings = BuilderSettings::load()?;
    /// println!("{}", settings.api_prefix);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_SETTINGS_FILE))
    }

    /// Load settings from a specific file, still honouring the environment
    pub fn load_from(path: &Path) -> Result<Self> {
        let settings = Self::figment(path).extract()?;
        tracing::debug!(path = %path.display(), "Loaded builder settings");
        Ok(settings)
    }

    /// The layered figment used by [`load_from`](Self::load_from)
    #[must_use]
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
