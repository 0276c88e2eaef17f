//! Typed configuration for Portico.
//!
//! - TOML and JSON configuration files
//! - `.env` files via `dotenvy`
//! - Environment variable overrides
//! - Strict parsing (fails on unknown fields)
//!
//! # Example
//!
//! ```no_run
//! use portico_config::ConfigLoader;
//!
//! # fn main() -> Result<(), portico_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_file("portico.toml")?
//!     .with_env_prefix("PORTICO")
//!     .load()?;
//!
//! println!("body limit: {} bytes", config.adapter.max_body_bytes);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [telemetry]
//! service_name = "widgets-api"
//!
//! [telemetry.logging]
//! enabled = true
//! level = "info"
//! format = "json"
//!
//! [telemetry.metrics]
//! enabled = true
//!
//! [adapter]
//! claims_required = true
//! max_body_bytes = 6291456
//! ```
//!
//! # Environment Variable Overrides
//!
//! Keys use the format `PREFIX__SECTION__KEY`:
//!
//! - `PORTICO__ADAPTER__CLAIMS_REQUIRED=true`
//! - `PORTICO__TELEMETRY__SERVICE_NAME=widgets-api`
//! - `PORTICO__TELEMETRY__LOGGING__LEVEL=debug`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::PorticoConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{
    AdapterSettings, LogFormat, LoggingSettings, MetricsSettings, TelemetrySettings,
    DEFAULT_MAX_BODY_BYTES,
};
