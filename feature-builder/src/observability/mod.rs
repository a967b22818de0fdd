//! Observability (structured logging)
//!
//! The engine itself only emits `tracing` events; binaries decide where they
//! go by calling [`init`] once at start-up.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging stack
///
/// Sets up:
/// - Compact human-readable output on stderr, or JSON lines when
///   [`ObservabilityConfig::json`] is set
/// - Environment-based log level filtering (`RUST_LOG`)
///
/// [`ObservabilityConfig::default_directive`] is used when `RUST_LOG` is not
/// set.
///
/// # Example
///
/// ```rust,no_run
/// use feature_builder::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init(&observability::ObservabilityConfig::default())?;
/// tracing::info!("Builder started");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init(config: &ObservabilityConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    if config.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(())
}

/// Observability configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Crate target whose events are raised to `debug` in verbose mode
    pub target: String,

    /// Emit debug-level events for the builder crates
    pub verbose: bool,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            target: "feature_builder".to_string(),
            verbose: cfg!(debug_assertions),
            json: !cfg!(debug_assertions),
        }
    }
}

impl ObservabilityConfig {
    /// Create new observability config for a crate target
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Default::default()
        }
    }

    /// Enable debug-level events
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Switch JSON output on or off
    #[must_use]
    pub const fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Filter directive used when `RUST_LOG` is absent
    #[must_use]
    pub fn default_directive(&self) -> String {
        if self.verbose {
            format!("info,{}=debug", self.target)
        } else {
            "warn".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.target, "feature_builder");
        assert_eq!(config.json, !cfg!(debug_assertions));
    }

    #[test]
    fn test_builder() {
        let config = ObservabilityConfig::new("feature_builder_cli")
            .with_verbose(true)
            .with_json(false);

        assert_eq!(config.target, "feature_builder_cli");
        assert!(config.verbose);
        assert!(!config.json);
        assert_eq!(config.default_directive(), "info,feature_builder_cli=debug");
    }

    #[test]
    fn test_quiet_directive() {
        let config = ObservabilityConfig::default().with_verbose(false);
        assert_eq!(config.default_directive(), "warn");
    }
}
