//! Observability for Portico.
//!
//! - **Logging**: structured JSON (or pretty) logging via `tracing-subscriber`
//! - **Metrics**: invocation counters and latency via the `metrics` facade
//!
//! Metrics are exported by whatever recorder the host installs; logging goes
//! to stdout, which the hosting platform collects.
//!
//! # Example
//!
//! ```rust,ignore
//! use portico_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::builder()
//!     .service_name("widgets-api")
//!     .build();
//!
//! init_telemetry(&config)?;
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::TelemetryError;
pub use logging::{init_logging, LogConfig};
pub use metrics::{init_metrics, metrics_enabled, InFlightGuard, MetricsConfig};

/// Result of installing telemetry.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Logging and metrics settings for one service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Reported as `service.name` in logs.
    pub service_name: String,

    /// Subscriber settings.
    pub logging: LogConfig,

    /// Recorder settings.
    pub metrics: MetricsConfig,
}

impl TelemetryConfig {
    /// Starts a builder with every setting at its default.
    #[must_use]
    pub fn builder() -> TelemetryConfigBuilder {
        TelemetryConfigBuilder::default()
    }
}

/// Builder for [`TelemetryConfig`].
#[derive(Debug, Default)]
pub struct TelemetryConfigBuilder {
    service_name: Option<String>,
    logging: Option<LogConfig>,
    metrics: Option<MetricsConfig>,
}

impl TelemetryConfigBuilder {
    /// Sets the service name.
    #[must_use]
    pub fn service_name(mut self, name: &str) -> Self {
        self.service_name = Some(name.to_string());
        self
    }

    /// Replaces the subscriber settings.
    #[must_use]
    pub fn logging(mut self, config: LogConfig) -> Self {
        self.logging = Some(config);
        self
    }

    /// Replaces the recorder settings.
    #[must_use]
    pub fn metrics(mut self, config: MetricsConfig) -> Self {
        self.metrics = Some(config);
        self
    }

    /// Builds the configuration, propagating the service name to logging.
    #[must_use]
    pub fn build(self) -> TelemetryConfig {
        let service_name = self.service_name.unwrap_or_else(|| "portico".to_string());

        let mut logging = self.logging.unwrap_or_default();
        logging.service_name = service_name.clone();

        TelemetryConfig {
            service_name,
            logging,
            metrics: self.metrics.unwrap_or_default(),
        }
    }
}

/// Initializes logging, then metric descriptions.
///
/// # Errors
///
/// Returns `TelemetryError` if the service name is empty or logging fails to
/// initialize.
pub fn init_telemetry(config: &TelemetryConfig) -> TelemetryResult<()> {
    if config.service_name.trim().is_empty() {
        return Err(TelemetryError::InvalidConfig(
            "service_name must not be empty".to_string(),
        ));
    }
    init_logging(&config.logging)?;
    init_metrics(&config.metrics);
    Ok(())
}
