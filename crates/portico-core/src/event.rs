//! Inbound event and outbound response types.
//!
//! [`ProxyEvent`] models the parts of an API Gateway proxy event the pipeline
//! reads. Everything else in the platform payload is ignored on
//! deserialization. [`Response`] is the `{statusCode, body}` envelope sent
//! back.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// The raw inbound event, as delivered by the hosting platform.
///
/// Every part is optional; the pipeline substitutes an empty mapping for
/// anything absent before decoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyEvent {
    /// Path parameters captured by the upstream router.
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,

    /// Query string parameters.
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,

    /// Raw request body.
    #[serde(default)]
    pub body: Option<String>,

    /// Request headers.
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,

    /// Platform request context.
    #[serde(default)]
    pub request_context: Option<EventRequestContext>,
}

/// The `requestContext` section of a [`ProxyEvent`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequestContext {
    /// Platform-assigned request id.
    #[serde(default)]
    pub request_id: Option<String>,

    /// Result of the upstream authorizer, if one ran.
    #[serde(default)]
    pub authorizer: Option<Authorizer>,
}

/// Output of an upstream authorizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Authorizer {
    /// Identity claims, either structured or as a JSON-encoded string.
    #[serde(default)]
    pub claims: Option<Value>,

    /// Remaining authorizer fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProxyEvent {
    /// Returns the authorizer claims payload, treating JSON `null` as absent.
    #[must_use]
    pub fn claims(&self) -> Option<&Value> {
        self.request_context
            .as_ref()?
            .authorizer
            .as_ref()?
            .claims
            .as_ref()
            .filter(|claims| !claims.is_null())
    }

    /// Returns the platform request id, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_context.as_ref()?.request_id.as_deref()
    }
}

/// The outbound response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// HTTP status code.
    pub status_code: u16,
    /// Rendered body.
    pub body: String,
}

impl Response {
    /// Creates a response.
    #[must_use]
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    /// Creates a 200 response.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
