//! Response body rendering.
//!
//! Strings pass through untouched; everything else is rendered as compact
//! JSON. Rendering never fails.

use serde::Serialize;
use serde_json::{json, Value};

/// Renders a value to a response body.
///
/// # Example
///
/// ```
/// use portico_core::render;
/// use serde_json::json;
///
/// assert_eq!(render(&json!("ok")), "ok");
/// assert_eq!(render(&json!({"a": 1})), r#"{"a":1}"#);
/// ```
#[must_use]
pub fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Renders any serializable value to a response body.
///
/// A value whose `Serialize` impl fails is rendered as a structured
/// `{"error": ...}` object carrying the serialization error.
#[must_use]
pub fn render_serializable<T: Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(value) => render(&value),
        Err(err) => json!({ "error": err.to_string() }).to_string(),
    }
}
