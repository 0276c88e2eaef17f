//! Root configuration type.

use serde::{Deserialize, Serialize};

use crate::{AdapterSettings, ConfigError, LogFormat, TelemetrySettings};

/// Complete Portico configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and the
/// environment.
///
/// # Example
///
/// ```
/// use portico_config::PorticoConfig;
///
/// let config = PorticoConfig::default();
/// assert!(!config.adapter.claims_required);
/// assert_eq!(config.telemetry.service_name, "portico");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct PorticoConfig {
    /// Telemetry (logging, metrics).
    #[serde(default)]
    pub telemetry: TelemetrySettings,

    /// Request adaptation.
    #[serde(default)]
    pub adapter: AdapterSettings,
}

impl PorticoConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - `telemetry.service_name` is empty
    /// - `telemetry.logging.level` is not a valid filter directive
    /// - `adapter.max_body_bytes` is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.telemetry.service_name.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "telemetry.service_name",
                "must not be empty",
            ));
        }

        if let Err(e) = portico_telemetry::logging::create_env_filter(&self.telemetry.logging.level)
        {
            return Err(ConfigError::invalid_value(
                "telemetry.logging.level",
                e.to_string(),
            ));
        }

        if self.adapter.max_body_bytes == 0 {
            return Err(ConfigError::invalid_value(
                "adapter.max_body_bytes",
                "must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Development preset: pretty debug logs, source locations.
    ///
    /// # Example
    ///
    /// ```
    /// use portico_config::{LogFormat, PorticoConfig};
    ///
    /// let config = PorticoConfig::development();
    /// assert_eq!(config.telemetry.logging.format, LogFormat::Pretty);
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();
        config.telemetry.logging.level = "debug".to_string();
        config.telemetry.logging.format = LogFormat::Pretty;
        config.telemetry.logging.include_location = true;
        config
    }

    /// Production preset: JSON info logs, claims required.
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();
        config.telemetry.logging.format = LogFormat::Json;
        config.adapter.claims_required = true;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates() {
        assert!(PorticoConfig::default().validate().is_ok());
        assert!(PorticoConfig::development().validate().is_ok());
        assert!(PorticoConfig::production().validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let dev = PorticoConfig::development();
        assert_eq!(dev.telemetry.logging.level, "debug");
        assert!(!dev.adapter.claims_required);

        let prod = PorticoConfig::production();
        assert_eq!(prod.telemetry.logging.format, LogFormat::Json);
        assert!(prod.adapter.claims_required);
    }

    #[test]
    fn test_validate_rejects_zero_body_limit() {
        let mut config = PorticoConfig::default();
        config.adapter.max_body_bytes = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("adapter.max_body_bytes"));
    }

    #[test]
    fn test_validate_rejects_empty_service_name() {
        let mut config = PorticoConfig::default();
        config.telemetry.service_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_level() {
        let mut config = PorticoConfig::default();
        config.telemetry.logging.level = "portico=noisy".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("telemetry.logging.level"));
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        let result: Result<PorticoConfig, _> = toml::from_str("[server]\nport = 1");
        assert!(result.is_err());
    }

    #[test]
    fn test_serialization_round_trip_keeps_sections() {
        let config = PorticoConfig::production();
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("[adapter]"));
        let parsed: PorticoConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
