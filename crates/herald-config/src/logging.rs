//! Structured logging bootstrap.
//!
//! Herald logs through `tracing`; hosts that do not install their own
//! subscriber can call [`init`] once at startup.

use tracing_subscriber::EnvFilter;

use crate::error::{ConfigError, ConfigResult};
use crate::LoggingConfig;

/// Build the filter: `RUST_LOG` wins, otherwise the configured level.
pub fn env_filter(config: &LoggingConfig) -> ConfigResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| ConfigError::invalid("logging.level", e.to_string())),
    }
}

/// Install a global fmt subscriber.
///
/// Returns `Ok(false)` when a global subscriber was already set, which keeps
/// repeated calls (tests, embedded hosts) harmless.
pub fn init(config: &LoggingConfig) -> ConfigResult<bool> {
    let filter = env_filter(config)?;
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi)
        .with_target(config.with_target)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(level = %config.level, "logging initialized");
    }
    Ok(installed)
}
