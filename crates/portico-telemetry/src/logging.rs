//! Structured logging for Portico.
//!
//! Installs a `tracing-subscriber` registry with an [`EnvFilter`] and either
//! JSON output (the default, suited to log aggregation on the hosting
//! platform) or human-readable output for local development.
//!
//! # Example
//!
//! ```rust,ignore
//! use portico_telemetry::logging::{LogConfig, init_logging};
//!
//! init_logging(&LogConfig::default())?;
//!
//! tracing::info!(invocation_id = %id, "Invocation started");
//! ```

use crate::error::TelemetryError;
use crate::TelemetryResult;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// How invocation logs are filtered and formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// When false, no subscriber is installed.
    pub enabled: bool,

    /// Filter directive (e.g., "info", "portico_pipeline=debug").
    pub level: String,

    /// One JSON object per line instead of pretty text.
    pub json_format: bool,

    /// Emit an event when the invocation span opens and closes.
    pub span_events: bool,

    /// Source file and line of each event.
    pub file_line_info: bool,

    /// Module path of each event.
    pub include_target: bool,

    /// Reported as `service.name`.
    pub service_name: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl LogConfig {
    /// Human-readable output at debug level.
    #[must_use]
    pub fn development() -> Self {
        Self {
            enabled: true,
            level: "debug".to_string(),
            json_format: false,
            span_events: true,
            file_line_info: true,
            include_target: true,
            service_name: "portico".to_string(),
        }
    }

    /// JSON output at info level.
    #[must_use]
    pub fn production() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            json_format: true,
            span_events: false,
            file_line_info: false,
            include_target: true,
            service_name: "portico".to_string(),
        }
    }
}

/// Installs the global subscriber described by `config`.
///
/// # Errors
///
/// Returns `TelemetryError::LoggingInit` if the filter is invalid or a global
/// subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = create_env_filter(&config.level)?;

    let span_events = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    if config.json_format {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_events(span_events)
            .with_file(config.file_line_info)
            .with_line_number(config.file_line_info)
            .with_target(config.include_target)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .pretty()
            .with_span_events(span_events)
            .with_file(config.file_line_info)
            .with_line_number(config.file_line_info)
            .with_target(config.include_target)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    }

    tracing::debug!(service.name = %config.service_name, "Logging initialized");
    Ok(())
}

/// Creates an env filter from a directive string.
///
/// # Errors
///
/// Returns error if the directive is invalid.
pub fn create_env_filter(filter: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(filter)
        .map_err(|e| TelemetryError::LoggingInit(format!("Invalid log level: {e}")))
}

/// Standard log field names.
pub mod fields {
    /// Portico-assigned invocation id.
    pub const INVOCATION_ID: &str = "invocation_id";

    /// Platform request id.
    pub const AWS_REQUEST_ID: &str = "aws_request_id";

    /// Response status code.
    pub const HTTP_STATUS: &str = "http.status_code";

    /// Duration in milliseconds.
    pub const DURATION_MS: &str = "duration_ms";

    /// Error description.
    pub const ERROR: &str = "error";

    /// Pipeline stage.
    pub const STAGE: &str = "stage";

    /// Caller user id. The only claim that is ever logged.
    pub const USER_ID: &str = "user_id";

    /// Service name.
    pub const SERVICE_NAME: &str = "service.name";
}

/// Logs an invocation completion event.
#[macro_export]
macro_rules! log_invocation_complete {
    ($invocation_id:expr, $status:expr, $duration_ms:expr) => {
        tracing::info!(
            invocation_id = %$invocation_id,
            http.status_code = $status,
            duration_ms = $duration_ms,
            "Invocation completed"
        );
    };
}

/// Logs an unclassified invocation failure.
#[macro_export]
macro_rules! log_invocation_error {
    ($invocation_id:expr, $error:expr) => {
        tracing::error!(
            invocation_id = %$invocation_id,
            error = %$error,
            "Invocation failed"
        );
    };
}
