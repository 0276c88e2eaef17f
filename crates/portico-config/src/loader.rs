//! Layered configuration loading.

use std::env;
use std::fs;
use std::path::Path;

use crate::{ConfigError, LogFormat, PorticoConfig};

/// Configuration loader.
///
/// Later layers override earlier ones:
/// 1. Default values (or a preset)
/// 2. Configuration file (TOML or JSON, by extension)
/// 3. `.env` file, loaded into the process environment
/// 4. Environment variables `PREFIX__SECTION__KEY`
///
/// A file replaces the whole configuration; sections and keys it omits take
/// their default values.
///
/// # Example
///
/// ```no_run
/// use portico_config::ConfigLoader;
///
/// # fn main() -> Result<(), portico_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_optional_file("portico.toml")?
///     .with_dotenv()?
///     .with_env_prefix("PORTICO")
///     .load()?;
///
/// println!("claims required: {}", config.adapter.claims_required);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config: PorticoConfig,
    env_prefix: Option<String>,
}

impl ConfigLoader {
    /// Creates a loader starting from defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the development preset.
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = PorticoConfig::development();
        self
    }

    /// Starts from the production preset.
    ///
    /// # Example
    ///
    /// ```
    /// use portico_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new().with_production().load().unwrap();
    /// assert!(config.adapter.claims_required);
    /// ```
    #[must_use]
    pub fn with_production(mut self) -> Self {
        self.config = PorticoConfig::production();
        self
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing, unreadable, malformed,
    /// has an unsupported extension, or contains unknown fields.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;

        self.config = parse(&content, &format)?;
        Ok(self)
    }

    /// Loads a configuration file if it exists.
    ///
    /// # Errors
    ///
    /// Same as [`with_file`](Self::with_file) when the file exists.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Loads configuration from a string in `format` ("toml" or "json").
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if parsing fails.
    ///
    /// # Example
    ///
    /// ```
    /// use portico_config::ConfigLoader;
    ///
    /// let toml = r#"
    ///     [adapter]
    ///     max_body_bytes = 1024
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.adapter.max_body_bytes, 1024);
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = parse(content, &format.to_lowercase())?;
        Ok(self)
    }

    /// Loads `.env` from the working directory (or a parent) if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Dotenv` if a `.env` file exists but is malformed.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if e.not_found() => Ok(self),
            Err(e) => Err(e.into()),
        }
    }

    /// Loads a specific env file into the process environment.
    ///
    /// Existing variables are not overwritten.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Dotenv` if the file is missing or malformed.
    pub fn with_env_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        dotenvy::from_path(path.as_ref())?;
        Ok(self)
    }

    /// Sets the environment variable prefix for overrides.
    ///
    /// With prefix `PORTICO`:
    /// - `PORTICO__ADAPTER__CLAIMS_REQUIRED=true`
    /// - `PORTICO__TELEMETRY__LOGGING__LEVEL=debug`
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Applies environment overrides and validates.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an override cannot be parsed or validation
    /// fails.
    pub fn load(mut self) -> Result<PorticoConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }

        self.config.validate()?;
        Ok(self.config)
    }

    /// Returns the configuration without env overrides or validation.
    #[must_use]
    pub fn load_unvalidated(self) -> PorticoConfig {
        self.config
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        let marker = format!("{prefix}__");
        let mut vars: Vec<(String, String)> = env::vars()
            .filter(|(k, _)| k.starts_with(&marker))
            .collect();
        vars.sort();

        for (key, value) in vars {
            self.apply_env_var(&key, &value, &marker)?;
        }
        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, value: &str, marker: &str) -> Result<(), ConfigError> {
        let path = key
            .strip_prefix(marker)
            .ok_or_else(|| ConfigError::env_parse_error(key, "invalid key format"))?;
        let parts: Vec<&str> = path.split("__").collect();

        match parts.as_slice() {
            ["ADAPTER", "CLAIMS_REQUIRED"] => {
                self.config.adapter.claims_required = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["ADAPTER", "MAX_BODY_BYTES"] => {
                self.config.adapter.max_body_bytes = value
                    .parse()
                    .map_err(|_| ConfigError::env_parse_error(key, "expected integer"))?;
            }

            ["TELEMETRY", "SERVICE_NAME"] => {
                self.config.telemetry.service_name = value.to_string();
            }
            ["TELEMETRY", "METRICS", "ENABLED"] => {
                self.config.telemetry.metrics.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["TELEMETRY", "LOGGING", "ENABLED"] => {
                self.config.telemetry.logging.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["TELEMETRY", "LOGGING", "LEVEL"] => {
                self.config.telemetry.logging.level = value.to_string();
            }
            ["TELEMETRY", "LOGGING", "FORMAT"] => {
                self.config.telemetry.logging.format = match value.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    _ => {
                        return Err(ConfigError::env_parse_error(
                            key,
                            "expected 'json' or 'pretty'",
                        ))
                    }
                };
            }
            ["TELEMETRY", "LOGGING", "INCLUDE_LOCATION"] => {
                self.config.telemetry.logging.include_location = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }

            _ => {}
        }

        Ok(())
    }
}

fn parse(content: &str, format: &str) -> Result<PorticoConfig, ConfigError> {
    match format {
        "toml" => Ok(toml::from_str(content)?),
        "json" => Ok(serde_json::from_str(content)?),
        other => Err(ConfigError::UnsupportedFormat(other.to_string())),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_defaults() {
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config, PorticoConfig::default());
    }

    #[test]
    fn test_with_string_json() {
        let config = ConfigLoader::new()
            .with_string(r#"{"adapter": {"claims_required": true}}"#, "JSON")
            .unwrap()
            .load()
            .unwrap();
        assert!(config.adapter.claims_required);
    }

    #[test]
    fn test_with_string_unsupported_format() {
        let err = ConfigLoader::new().with_string("", "yaml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ConfigLoader::new()
            .with_file("/nonexistent/portico.toml")
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_optional_missing_file() {
        assert!(ConfigLoader::new()
            .with_optional_file("/nonexistent/portico.toml")
            .is_ok());
    }

    #[test]
    fn test_env_overrides() {
        env::set_var("PORTICO_UNIT_A__ADAPTER__CLAIMS_REQUIRED", "yes");
        env::set_var("PORTICO_UNIT_A__ADAPTER__MAX_BODY_BYTES", "2048");
        env::set_var("PORTICO_UNIT_A__TELEMETRY__LOGGING__FORMAT", "pretty");

        let config = ConfigLoader::new()
            .with_env_prefix("portico_unit_a")
            .load()
            .unwrap();

        assert!(config.adapter.claims_required);
        assert_eq!(config.adapter.max_body_bytes, 2048);
        assert_eq!(config.telemetry.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_env_override_parse_error() {
        env::set_var("PORTICO_UNIT_B__ADAPTER__MAX_BODY_BYTES", "lots");
        let err = ConfigLoader::new()
            .with_env_prefix("PORTICO_UNIT_B")
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvParseError { .. }));
    }

    #[test]
    fn test_env_override_fails_validation() {
        env::set_var("PORTICO_UNIT_C__ADAPTER__MAX_BODY_BYTES", "0");
        assert!(ConfigLoader::new()
            .with_env_prefix("PORTICO_UNIT_C")
            .load()
            .is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
