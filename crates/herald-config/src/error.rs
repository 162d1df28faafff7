use thiserror::Error;

/// Errors that can occur while loading or applying configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error while reading a config file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[cfg(feature = "toml")]
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Configuration parsed but failed semantic validation
    #[error("invalid configuration: {field}: {message}")]
    Invalid {
        /// Dotted path of the offending field (e.g. `dispatch.no_category`)
        field: String,
        /// What is wrong with it
        message: String,
    },
}

impl ConfigError {
    /// Create a validation error for a field.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
