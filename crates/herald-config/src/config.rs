//! Configuration schema.
//!
//! Every field has a default so a minimal (even empty) file is valid.
//! Deserialization handles syntax; [`HeraldConfig::validate`] handles the
//! semantic checks serde cannot express.

use serde::{Deserialize, Serialize};
#[cfg(feature = "toml")]
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};

/// Prefix that marks a path segment as a named capture (`/user/:id`).
pub const DEFAULT_CAPTURE_MARKER: char = ':';

/// Category used for remote notifications whose payload carries none.
///
/// Pushes from legacy systems may omit the category; at most one remote
/// notification daemon should claim this value.
pub const DEFAULT_NO_CATEGORY: &str = "no.category";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HeraldConfig {
    /// Dispatch behavior
    pub dispatch: DispatchConfig,

    /// Logging setup
    pub logging: LoggingConfig,
}

/// Knobs for the registry and router.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DispatchConfig {
    /// Prefix marking capture segments in URL patterns
    pub capture_marker: char,

    /// Sentinel category for remote pushes without one
    pub no_category: String,

    /// Log a warning when two daemons claim the same notification category
    pub warn_on_category_collision: bool,

    /// Log a warning when a URL pattern reuses a capture name
    pub warn_on_duplicate_captures: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            capture_marker: DEFAULT_CAPTURE_MARKER,
            no_category: DEFAULT_NO_CATEGORY.to_string(),
            warn_on_category_collision: true,
            warn_on_duplicate_captures: true,
        }
    }
}

/// Logging configuration consumed by [`crate::logging::init`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive; `RUST_LOG` takes precedence when set
    pub level: String,

    /// Emit ANSI colors
    pub ansi: bool,

    /// Include the event target (module path) in each line
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            ansi: true,
            with_target: false,
        }
    }
}

impl HeraldConfig {
    /// Parse configuration from a TOML string and validate it.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file and validate it.
    #[cfg(feature = "toml")]
    pub fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded herald configuration");
        Ok(config)
    }

    /// Check semantic constraints.
    pub fn validate(&self) -> ConfigResult<()> {
        self.dispatch.validate()?;
        self.logging.validate()
    }
}

impl DispatchConfig {
    /// Check semantic constraints.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.capture_marker == '/' {
            return Err(ConfigError::invalid(
                "dispatch.capture_marker",
                "'/' is the segment separator and cannot mark captures",
            ));
        }
        if self.no_category.is_empty() {
            return Err(ConfigError::invalid(
                "dispatch.no_category",
                "sentinel category must not be empty",
            ));
        }
        Ok(())
    }
}

impl LoggingConfig {
    /// Check that `level` is a valid filter directive.
    pub fn validate(&self) -> ConfigResult<()> {
        tracing_subscriber::EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| ConfigError::invalid("logging.level", e.to_string()))
    }
}
