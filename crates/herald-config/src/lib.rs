//! # Herald Configuration Library
//!
//! Configuration for the Herald dispatch core. The dispatch core itself is
//! configured almost entirely by the set of daemons registered at startup;
//! this crate covers the remaining knobs (capture marker, the remote
//! notification sentinel category, collision warnings) plus logging setup.
//!
//! ## Features
//!
//! - TOML loading with defaults for every field (`toml` feature, on by default)
//! - Semantic validation separate from deserialization
//! - `tracing-subscriber` bootstrap driven by [`LoggingConfig`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use herald_config::HeraldConfig;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HeraldConfig::load_from_file("herald.toml")?;
//!     herald_config::logging::init(&config.logging)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
pub mod logging;

pub use config::*;
pub use error::{ConfigError, ConfigResult};
