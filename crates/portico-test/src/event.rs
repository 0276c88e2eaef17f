//! Test event building.

use portico_core::{Authorizer, EventRequestContext, ProxyEvent};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;

/// A user id that passes the claims shape.
pub const TEST_USER_ID: &str = "3f2c1f5e-8a4b-4c8d-9e2f-1a2b3c4d5e6f";

/// A Cognito-style issued-at value that passes the claims shape.
pub const TEST_ISSUED_AT: &str = "Wed Jul 19 08:49:43 UTC 2023";

/// Well-formed authorizer claims for a test user.
#[must_use]
pub fn valid_claims() -> Value {
    json!({
        "email": "jane@example.com",
        "sub": TEST_USER_ID,
        "cognito:username": "jane",
        "iat": TEST_ISSUED_AT,
    })
}

/// Fluent builder for [`ProxyEvent`]s.
///
/// # Example
///
/// ```
/// use portico_test::{valid_claims, TestEvent};
///
/// let event = TestEvent::new()
///     .path_param("id", "42")
///     .query_param("page", "2")
///     .header("x-trace-id", "abc")
///     .body(r#"{"name":"gear"}"#)
///     .claims(valid_claims())
///     .build();
///
/// assert_eq!(event.path_parameters.unwrap()["id"], "42");
/// assert!(event.request_context.is_some());
/// ```
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct TestEvent {
    event: ProxyEvent,
}

impl TestEvent {
    /// Creates an event with every part absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a path parameter.
    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        insert(&mut self.event.path_parameters, name, value);
        self
    }

    /// Adds a query string parameter.
    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        insert(&mut self.event.query_string_parameters, name, value);
        self
    }

    /// Adds a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        insert(&mut self.event.headers, name, value);
        self
    }

    /// Sets the raw body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.event.body = Some(body.into());
        self
    }

    /// Sets the body to the JSON encoding of `value`.
    ///
    /// # Panics
    ///
    /// Panics if `value` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Self {
        let body = serde_json::to_string(value).expect("body should serialize");
        self.body(body)
    }

    /// Sets the authorizer claims payload.
    pub fn claims(mut self, claims: Value) -> Self {
        self.authorizer().claims = Some(claims);
        self
    }

    /// Sets the authorizer claims payload as a JSON-encoded string.
    pub fn encoded_claims(self, claims: &Value) -> Self {
        self.claims(Value::String(claims.to_string()))
    }

    /// Sets the platform request id.
    pub fn request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_context().request_id = Some(request_id.into());
        self
    }

    /// Returns the built event.
    pub fn build(self) -> ProxyEvent {
        self.event
    }

    fn request_context(&mut self) -> &mut EventRequestContext {
        self.event
            .request_context
            .get_or_insert_with(EventRequestContext::default)
    }

    fn authorizer(&mut self) -> &mut Authorizer {
        self.request_context()
            .authorizer
            .get_or_insert_with(Authorizer::default)
    }
}

impl From<TestEvent> for ProxyEvent {
    fn from(builder: TestEvent) -> Self {
        builder.build()
    }
}

fn insert(
    map: &mut Option<HashMap<String, String>>,
    name: impl Into<String>,
    value: impl Into<String>,
) {
    map.get_or_insert_with(HashMap::new)
        .insert(name.into(), value.into());
}
