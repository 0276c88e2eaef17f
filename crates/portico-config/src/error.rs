//! Errors raised while loading Portico settings.

use std::path::PathBuf;
use thiserror::Error;

/// A settings source could not be read, parsed or validated.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required settings file does not exist.
    #[error("settings file {path} does not exist")]
    FileNotFound {
        /// Where the file was expected.
        path: PathBuf,
    },

    /// A settings file exists but could not be read.
    #[error("cannot read settings file {path}")]
    ReadError {
        /// The unreadable file.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// TOML settings are malformed or contain unknown keys.
    #[error("malformed TOML settings: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON settings are malformed or contain unknown keys.
    #[error("malformed JSON settings: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A setting parsed but failed validation.
    #[error("{field} is invalid: {reason}")]
    InvalidValue {
        /// Dotted path of the setting, e.g. `adapter.max_body_bytes`.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An environment override could not be applied.
    #[error("environment override {var} rejected: {reason}")]
    EnvParseError {
        /// Full variable name, prefix included.
        var: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An env file is malformed or missing.
    #[error("cannot load env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    /// Settings must be TOML or JSON.
    #[error("settings format {0} is not supported, use toml or json")]
    UnsupportedFormat(String),
}

impl ConfigError {
    /// Missing settings file.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Unreadable settings file.
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Setting that failed validation.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Rejected environment override.
    pub fn env_parse_error(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EnvParseError {
            var: var.into(),
            reason: reason.into(),
        }
    }
}
