//! An entry point configured from a loaded `PorticoConfig`.

use portico::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

const CONFIG: &str = r#"
[telemetry]
service_name = "widgets"

[telemetry.logging]
level = "debug"
format = "pretty"

[adapter]
claims_required = true
max_body_bytes = 32
"#;

fn load() -> PorticoConfig {
    ConfigLoader::new()
        .with_string(CONFIG, "toml")
        .unwrap()
        .load()
        .unwrap()
}

fn entry(config: &PorticoConfig) -> EntryPoint<impl Handler<DecodedRequest>> {
    EntryPoint::with_config(
        EntryConfig::builder().settings(&config.adapter).build(),
        handler_fn(|req: DecodedRequest, _event: Arc<ProxyEvent>, _ctx: InvocationContext| async move {
            let claims = req.claims.ok_or_else(|| Failure::from(HttpFailure::unauthorized()))?;
            Ok::<_, Failure>(claims.username().to_string())
        }),
    )
}

fn claims() -> serde_json::Value {
    serde_json::json!({
        "email": "sam@example.com",
        "sub": "3f2c1f5e-8a4b-4c8d-9e2f-1a2b3c4d5e6f",
        "cognito:username": "sam",
        "iat": 1_689_756_583,
    })
}

fn event_with_claims() -> ProxyEvent {
    let mut event: ProxyEvent = serde_json::from_value(serde_json::json!({
        "requestContext": {"requestId": "req-1", "authorizer": {"claims": claims()}}
    }))
    .unwrap();
    event.headers = Some(HashMap::from([("accept".to_string(), "*/*".to_string())]));
    event
}

#[tokio::test]
async fn test_loaded_settings_drive_the_entry() {
    let config = load();
    assert_eq!(config.telemetry.service_name, "widgets");
    let entry = entry(&config);

    let response = entry
        .invoke(ProxyEvent::default(), InvocationContext::mock())
        .await;
    assert_eq!(response.status_code, 401);

    let response = entry
        .invoke(event_with_claims(), InvocationContext::mock())
        .await;
    assert_eq!(response, Response::ok("sam"));
}

#[tokio::test]
async fn test_loaded_body_limit() {
    let entry = entry(&load());
    let mut event = event_with_claims();
    event.body = Some("x".repeat(33));

    let response = entry.invoke(event, InvocationContext::mock()).await;
    assert_eq!(response.status_code, 400);
    assert!(response.body.contains("maxLength"));
}

#[test]
fn test_telemetry_config_from_loaded_settings() {
    let config = load();
    let telemetry = config.telemetry.to_telemetry_config();
    assert_eq!(telemetry.service_name, "widgets");
    assert!(!telemetry.logging.json_format);
}
