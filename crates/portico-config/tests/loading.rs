//! File-based configuration loading.

use portico_config::{ConfigError, ConfigLoader, LogFormat};
use std::io::Write;
use tempfile::{Builder, TempDir};

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn loads_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "portico.toml",
        r#"
[telemetry]
service_name = "widgets-api"

[telemetry.logging]
level = "warn"
format = "pretty"

[adapter]
claims_required = true
"#,
    );

    let config = ConfigLoader::new().with_file(&path).unwrap().load().unwrap();

    assert_eq!(config.telemetry.service_name, "widgets-api");
    assert_eq!(config.telemetry.logging.level, "warn");
    assert_eq!(config.telemetry.logging.format, LogFormat::Pretty);
    assert!(config.telemetry.metrics.enabled);
    assert!(config.adapter.claims_required);
    assert_eq!(config.adapter.max_body_bytes, portico_config::DEFAULT_MAX_BODY_BYTES);
}

#[test]
fn loads_json_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "portico.json",
        r#"{"adapter": {"max_body_bytes": 4096}}"#,
    );

    let config = ConfigLoader::new().with_file(&path).unwrap().load().unwrap();
    assert_eq!(config.adapter.max_body_bytes, 4096);
}

#[test]
fn rejects_unknown_fields() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "portico.toml",
        "[adapter]\nclaims_required = true\nretries = 3\n",
    );

    let err = ConfigLoader::new().with_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::TomlError(_)));
}

#[test]
fn rejects_unsupported_extension() {
    let file = Builder::new().suffix(".yaml").tempfile().unwrap();
    let err = ConfigLoader::new().with_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
}

#[test]
fn env_file_feeds_overrides() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "portico.env",
        "PORTICO_IT_ENV__TELEMETRY__SERVICE_NAME=from-env-file\nPORTICO_IT_ENV__TELEMETRY__METRICS__ENABLED=false\n",
    );

    let config = ConfigLoader::new()
        .with_env_file(&path)
        .unwrap()
        .with_env_prefix("PORTICO_IT_ENV")
        .load()
        .unwrap();

    assert_eq!(config.telemetry.service_name, "from-env-file");
    assert!(!config.telemetry.metrics.enabled);
}

#[test]
fn env_overrides_file_values() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "portico.toml", "[adapter]\nclaims_required = false\n");
    std::env::set_var("PORTICO_IT_LAYER__ADAPTER__CLAIMS_REQUIRED", "true");

    let config = ConfigLoader::new()
        .with_file(&path)
        .unwrap()
        .with_env_prefix("PORTICO_IT_LAYER")
        .load()
        .unwrap();

    assert!(config.adapter.claims_required);
}

#[test]
fn invalid_file_values_fail_validation() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "portico.toml", "[adapter]\nmax_body_bytes = 0\n");

    let err = ConfigLoader::new().with_file(&path).unwrap().load().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}
