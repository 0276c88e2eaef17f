//! Failure types for Portico.
//!
//! This module provides the small failure taxonomy the pipeline uses to turn
//! every outcome into a status-coded response:
//!
//! | Type | Produced by | Status |
//! |---|---|---|
//! | [`Violations`] | a shape rejecting a request part | 400 |
//! | [`HttpFailure`] | the pipeline or the wrapped handler | its own status |
//! | anything else | unexpected failures | 500 |
//!
//! The three classes are carried by [`Failure`], a tagged union decided by
//! whoever constructs the failure. The response stage never inspects the
//! shape of a value to guess which class it belongs to.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Result type alias using [`Failure`].
pub type PorticoResult<T> = Result<T, Failure>;

/// Label used for the 400 response produced by request-validation failures.
pub const INCORRECT_PARAMETERS: &str = "Incorrect Parameters";

/// Label carried by [`HttpFailure::invalid_format`].
pub const INVALID_FORMAT: &str = "Invalid format";

/// Label carried by [`HttpFailure::unauthorized`].
pub const UNAUTHORIZED: &str = "unauthorized";

/// A single field-level violation reported by a shape.
///
/// The layout follows the usual validator output: the offending property,
/// the rejected value (when it is safe to echo), the constraints that failed
/// keyed by constraint name, and nested violations for structured fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Property that failed validation, as named on the wire.
    pub property: String,

    /// The rejected value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Failed constraints, keyed by constraint name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub constraints: BTreeMap<String, String>,

    /// Violations of nested properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Violation>,
}

impl Violation {
    /// Creates a violation for a property with a single failed constraint.
    #[must_use]
    pub fn new(
        property: impl Into<String>,
        constraint: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let mut constraints = BTreeMap::new();
        constraints.insert(constraint.into(), message.into());
        Self {
            property: property.into(),
            value: None,
            constraints,
            children: Vec::new(),
        }
    }

    /// Attaches the rejected value.
    #[must_use]
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Adds another failed constraint.
    #[must_use]
    pub fn with_constraint(
        mut self,
        constraint: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.constraints.insert(constraint.into(), message.into());
        self
    }

    /// Adds a nested violation.
    #[must_use]
    pub fn with_child(mut self, child: Violation) -> Self {
        self.children.push(child);
        self
    }
}

/// An ordered list of violations.
///
/// Serializes transparently as a JSON array so it can be used directly as the
/// `details` of a 400 response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Error)]
#[serde(transparent)]
#[error("{} constraint violation(s)", .0.len())]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a list holding a single violation.
    #[must_use]
    pub fn single(violation: Violation) -> Self {
        Self(vec![violation])
    }

    /// Appends a violation.
    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    /// Returns `true` if there are no violations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the violations in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Returns the violation for a property, if any.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&Violation> {
        self.0.iter().find(|v| v.property == property)
    }

    /// Consumes the list and returns the inner vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<Violation> {
        self.0
    }

    /// Returns `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Violation> for Violations {
    fn from(violation: Violation) -> Self {
        Self::single(violation)
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(violations: Vec<Violation>) -> Self {
        Self(violations)
    }
}

impl Extend<Violation> for Violations {
    fn extend<I: IntoIterator<Item = Violation>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Returned by [`HttpFailure::new`] for a status outside `400..=599`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("HTTP failures must carry a 4xx or 5xx status, got {0}")]
pub struct InvalidStatusCode(pub u16);

/// A failure that surfaces to the caller with a specific HTTP status.
///
/// Serialized as `{"statusCode": ..., "error": ..., "details": ...}`, which is
/// also the response body the pipeline sends for it. `details` is omitted
/// when absent.
///
/// # Example
///
/// ```
/// use portico_core::HttpFailure;
///
/// let failure = HttpFailure::not_found("Widget", "42");
/// assert_eq!(failure.status_code(), 404);
/// assert_eq!(failure.error(), "Could not find the Widget with the given id");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[serde(rename_all = "camelCase", try_from = "WireHttpFailure")]
#[error("{status_code} {error}")]
pub struct HttpFailure {
    status_code: u16,
    error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

/// Unchecked form of [`HttpFailure`] as it arrives on the wire.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireHttpFailure {
    status_code: u16,
    error: String,
    #[serde(default)]
    details: Option<Value>,
}

impl TryFrom<WireHttpFailure> for HttpFailure {
    type Error = InvalidStatusCode;

    fn try_from(wire: WireHttpFailure) -> Result<Self, Self::Error> {
        let status = StatusCode::from_u16(wire.status_code)
            .map_err(|_| InvalidStatusCode(wire.status_code))?;
        Self::new(status, wire.error, wire.details)
    }
}

impl HttpFailure {
    /// Creates a failure with an arbitrary error status.
    ///
    /// This is the extension point for handler-specific failures; the
    /// built-in kinds have dedicated constructors.
    pub fn new(
        status: StatusCode,
        error: impl Into<String>,
        details: Option<Value>,
    ) -> Result<Self, InvalidStatusCode> {
        if !(status.is_client_error() || status.is_server_error()) {
            return Err(InvalidStatusCode(status.as_u16()));
        }
        Ok(Self {
            status_code: status.as_u16(),
            error: error.into(),
            details,
        })
    }

    /// The identified `model` instance does not exist (404).
    #[must_use]
    pub fn not_found(model: &str, id: impl Into<String>) -> Self {
        Self {
            status_code: StatusCode::NOT_FOUND.as_u16(),
            error: format!("Could not find the {model} with the given id"),
            details: Some(Value::String(id.into())),
        }
    }

    /// The request is malformed; carries the field-level violations (400).
    #[must_use]
    pub fn invalid_format(violations: Violations) -> Self {
        Self {
            status_code: StatusCode::BAD_REQUEST.as_u16(),
            error: INVALID_FORMAT.to_string(),
            details: Some(violations_to_value(&violations)),
        }
    }

    /// The caller did not present a valid identity (401).
    #[must_use]
    pub fn unauthorized() -> Self {
        Self {
            status_code: StatusCode::UNAUTHORIZED.as_u16(),
            error: UNAUTHORIZED.to_string(),
            details: None,
        }
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Returns the status code as an [`http::StatusCode`].
    ///
    /// Anything outside `400..=599` reads as 500.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code)
            .ok()
            .filter(|status| status.is_client_error() || status.is_server_error())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Returns the machine-readable error label.
    #[must_use]
    pub fn error(&self) -> &str {
        &self.error
    }

    /// Returns the failure details, if any.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}

fn violations_to_value(violations: &Violations) -> Value {
    serde_json::to_value(violations).unwrap_or_else(|_| Value::Array(Vec::new()))
}

/// Every way an invocation can fail, tagged at the point of construction.
///
/// Handlers return this from their futures. Use `?` on an [`HttpFailure`]
/// or [`Violations`] to raise a classified failure; any other error becomes
/// [`Failure::Unclassified`] through `anyhow`.
///
/// # Example
///
/// ```
/// use portico_core::{Failure, HttpFailure};
///
/// fn find(id: &str) -> Result<u32, Failure> {
///     if id != "1" {
///         return Err(HttpFailure::not_found("Widget", id).into());
///     }
///     Ok(1)
/// }
///
/// assert_eq!(find("2").unwrap_err().status(), http::StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum Failure {
    /// One or more request parts were rejected by their shape.
    #[error("request validation failed: {0}")]
    Validation(Violations),

    /// A failure with a declared HTTP status.
    #[error(transparent)]
    Declared(HttpFailure),

    /// Anything else.
    #[error(transparent)]
    Unclassified(anyhow::Error),
}

impl Failure {
    /// Wraps any error as an unclassified failure.
    pub fn unclassified(error: impl Into<anyhow::Error>) -> Self {
        Self::Unclassified(error.into())
    }

    /// Creates an unclassified failure from a message.
    pub fn msg<M>(message: M) -> Self
    where
        M: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        Self::Unclassified(anyhow::Error::msg(message))
    }

    /// Returns the status the failure maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Declared(failure) => failure.status(),
            Self::Unclassified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a short name for the failure class, for logs and metrics.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Declared(_) => "declared",
            Self::Unclassified(_) => "unclassified",
        }
    }
}

impl From<HttpFailure> for Failure {
    fn from(failure: HttpFailure) -> Self {
        Self::Declared(failure)
    }
}

impl From<Violations> for Failure {
    fn from(violations: Violations) -> Self {
        Self::Validation(violations)
    }
}

impl From<anyhow::Error> for Failure {
    fn from(error: anyhow::Error) -> Self {
        Self::Unclassified(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_found() {
        let failure = HttpFailure::not_found("Widget", "42");
        assert_eq!(failure.status_code(), 404);
        assert_eq!(failure.error(), "Could not find the Widget with the given id");
        assert_eq!(failure.details(), Some(&json!("42")));
    }

    #[test]
    fn test_invalid_format_carries_violations() {
        let violations = Violations::single(Violation::new("name", "isNotEmpty", "name should not be empty"));
        let failure = HttpFailure::invalid_format(violations);

        assert_eq!(failure.status_code(), 400);
        assert_eq!(failure.error(), INVALID_FORMAT);
        let details = failure.details().expect("details present");
        assert_eq!(details[0]["property"], "name");
        assert_eq!(details[0]["constraints"]["isNotEmpty"], "name should not be empty");
    }

    #[test]
    fn test_unauthorized_has_no_details() {
        let failure = HttpFailure::unauthorized();
        assert_eq!(failure.status_code(), 401);
        assert_eq!(failure.error(), UNAUTHORIZED);
        assert!(failure.details().is_none());

        let json = serde_json::to_value(&failure).expect("serialization should work");
        assert_eq!(json, json!({"statusCode": 401, "error": "unauthorized"}));
    }

    #[test]
    fn test_envelope_field_names() {
        let json = serde_json::to_string(&HttpFailure::not_found("User", "u-1"))
            .expect("serialization should work");
        assert!(json.contains("\"statusCode\":404"));
        assert!(json.contains("\"error\":\"Could not find the User with the given id\""));
        assert!(json.contains("\"details\":\"u-1\""));
    }

    #[test]
    fn test_custom_status() {
        let failure = HttpFailure::new(StatusCode::CONFLICT, "conflict", Some(json!({"v": 2})))
            .expect("409 is an error status");
        assert_eq!(failure.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_custom_status_rejects_success_codes() {
        let err = HttpFailure::new(StatusCode::OK, "fine", None).unwrap_err();
        assert_eq!(err, InvalidStatusCode(200));
        assert!(HttpFailure::new(StatusCode::MOVED_PERMANENTLY, "moved", None).is_err());
    }

    #[test]
    fn test_deserialize_checks_status() {
        let failure: HttpFailure =
            serde_json::from_value(json!({"statusCode": 409, "error": "conflict", "details": [1]}))
                .expect("409 is an error status");
        assert_eq!(failure.status(), StatusCode::CONFLICT);
        assert_eq!(failure.details(), Some(&json!([1])));

        for status in [200, 302, 99, 600, 1000] {
            let err = serde_json::from_value::<HttpFailure>(json!({"statusCode": status, "error": "nope"}))
                .unwrap_err();
            assert!(err.to_string().contains("4xx or 5xx"), "{status}: {err}");
        }
    }

    #[test]
    fn test_failure_status_mapping() {
        let validation: Failure = Violations::single(Violation::new("id", "isUuid", "bad")).into();
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(validation.class(), "validation");

        let declared: Failure = HttpFailure::unauthorized().into();
        assert_eq!(declared.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(declared.class(), "declared");

        let other = Failure::msg("database unavailable");
        assert_eq!(other.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(other.to_string(), "database unavailable");
    }

    #[test]
    fn test_unclassified_from_std_error() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let failure = Failure::unclassified(io);
        assert!(matches!(failure, Failure::Unclassified(_)));
        assert_eq!(failure.to_string(), "disk full");
    }

    #[test]
    fn test_violations_collection() {
        let mut violations = Violations::new();
        assert!(violations.is_empty());
        assert!(violations.clone().into_result().is_ok());

        violations.push(Violation::new("email", "isEmail", "email must be an email"));
        violations.extend([Violation::new("sub", "isUuid", "sub must be a UUID")]);

        assert_eq!(violations.len(), 2);
        assert!(violations.get("sub").is_some());
        assert!(violations.get("missing").is_none());
        assert_eq!(violations.to_string(), "2 constraint violation(s)");
        assert!(violations.into_result().is_err());
    }

    #[test]
    fn test_violation_serialization_skips_empty_fields() {
        let violation = Violation::new("limit", "isInt", "limit must be an integer")
            .with_value(json!("ten"));
        let json = serde_json::to_value(&violation).expect("serialization should work");

        assert_eq!(json["value"], "ten");
        assert!(json.get("children").is_none());
    }
}
