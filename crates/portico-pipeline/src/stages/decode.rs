//! Decode stages.
//!
//! Each request part is decoded by its shape. Absent parts are decoded as an
//! empty object. Every decode runs regardless of earlier failures; the
//! outcome keeps one result per part so later stages can apply their own
//! precedence.

use super::Stage;
use crate::EntryConfig;
use portico_core::{ProxyEvent, Violation, Violations};
use portico_extract::Shape;
use portico_telemetry::metrics::record_validation_failure;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Per-part decode results.
#[derive(Debug)]
pub struct DecodedParts<P, Q, B, H, C> {
    /// Path parameters.
    pub path: Result<P, Violations>,
    /// Query parameters.
    pub query: Result<Q, Violations>,
    /// Body.
    pub body: Result<B, Violations>,
    /// Headers.
    pub headers: Result<H, Violations>,
    /// Claims; `None` when the event carried no claims payload.
    pub claims: Option<Result<C, Violations>>,
}

/// Runs every decode stage against `event`.
pub fn decode_parts<PS, QS, BS, HS, CS>(
    config: &EntryConfig<PS, QS, BS, HS, CS>,
    event: &ProxyEvent,
) -> DecodedParts<PS::Output, QS::Output, BS::Output, HS::Output, CS::Output>
where
    PS: Shape,
    QS: Shape,
    BS: Shape,
    HS: Shape,
    CS: Shape,
{
    let path = run(
        Stage::DecodePath,
        &config.path,
        string_map(event.path_parameters.as_ref()),
    );
    let query = run(
        Stage::DecodeQuery,
        &config.query,
        string_map(event.query_string_parameters.as_ref()),
    );
    let body = match raw_body(event.body.as_deref(), config.max_body_bytes) {
        Ok(raw) => run(Stage::DecodeBody, &config.body, raw),
        Err(violations) => {
            reject(Stage::DecodeBody, &violations);
            Err(violations)
        }
    };
    let headers = run(
        Stage::DecodeHeaders,
        &config.headers,
        string_map(event.headers.as_ref()),
    );
    let claims = event
        .claims()
        .map(|raw| run(Stage::DecodeClaims, &config.claims, raw.clone()));

    DecodedParts {
        path,
        query,
        body,
        headers,
        claims,
    }
}

fn run<S: Shape>(stage: Stage, shape: &S, raw: Value) -> Result<S::Output, Violations> {
    tracing::debug!(stage = stage.name(), "Decoding request part");
    shape.decode(raw).map_err(|violations| {
        reject(stage, &violations);
        violations
    })
}

fn reject(stage: Stage, violations: &Violations) {
    let part = stage.part().unwrap_or("request");
    tracing::warn!(
        stage = stage.name(),
        part,
        violations = violations.len(),
        "Request part rejected"
    );
    record_validation_failure(part);
}

fn string_map(map: Option<&HashMap<String, String>>) -> Value {
    let object: Map<String, Value> = map
        .into_iter()
        .flatten()
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect();
    Value::Object(object)
}

fn raw_body(body: Option<&str>, limit: usize) -> Result<Value, Violations> {
    match body {
        None => Ok(Value::Object(Map::new())),
        Some(text) if text.len() > limit => Err(Violations::single(Violation::new(
            "body",
            "maxLength",
            format!("body must be shorter than or equal to {limit} bytes"),
        ))),
        Some(text) => Ok(Value::String(text.to_string())),
    }
}
