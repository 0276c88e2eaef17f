//! Configuration sections.

use portico_telemetry::{LogConfig, MetricsConfig, TelemetryConfig};
use serde::{Deserialize, Serialize};

/// Default body size limit: 6 MiB, the synchronous invocation payload limit.
pub const DEFAULT_MAX_BODY_BYTES: usize = 6 * 1024 * 1024;

/// Request adaptation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AdapterSettings {
    /// Reject invocations without valid identity claims with 401.
    #[serde(default)]
    pub claims_required: bool,

    /// Largest accepted body, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            claims_required: false,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingSettings {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive (trace, debug, info, warn, error, or per-target).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_location: false,
        }
    }
}

impl From<&LoggingSettings> for LogConfig {
    fn from(settings: &LoggingSettings) -> Self {
        let base = match settings.format {
            LogFormat::Json => LogConfig::production(),
            LogFormat::Pretty => LogConfig::development(),
        };
        LogConfig {
            enabled: settings.enabled,
            level: settings.level.clone(),
            file_line_info: settings.include_location,
            ..base
        }
    }
}

/// Metrics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MetricsSettings {
    /// Record invocation metrics. When false, nothing is recorded.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Telemetry section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TelemetrySettings {
    /// Service name used in logs.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Metrics settings.
    #[serde(default)]
    pub metrics: MetricsSettings,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            logging: LoggingSettings::default(),
            metrics: MetricsSettings::default(),
        }
    }
}

impl TelemetrySettings {
    /// Converts the section into a [`TelemetryConfig`].
    #[must_use]
    pub fn to_telemetry_config(&self) -> TelemetryConfig {
        TelemetryConfig::builder()
            .service_name(&self.service_name)
            .logging(LogConfig::from(&self.logging))
            .metrics(MetricsConfig {
                enabled: self.metrics.enabled,
            })
            .build()
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "portico".to_string()
}
