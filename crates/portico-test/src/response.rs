//! Test response wrapper.

use crate::error::TestError;
use portico_core::Response;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A delivered response with assertion helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResponse {
    inner: Response,
}

impl TestResponse {
    /// Wraps a response.
    #[must_use]
    pub const fn new(response: Response) -> Self {
        Self { inner: response }
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.inner.status_code
    }

    /// Returns the body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.inner.body
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.inner.is_success()
    }

    /// Returns the wrapped response.
    #[must_use]
    pub fn into_inner(self) -> Response {
        self.inner
    }

    /// Deserializes the body as JSON.
    ///
    /// # Errors
    ///
    /// Fails if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TestError> {
        Ok(serde_json::from_str(&self.inner.body)?)
    }

    /// Deserializes the body as a JSON value.
    ///
    /// # Errors
    ///
    /// Fails if the body is not valid JSON.
    pub fn json_value(&self) -> Result<Value, TestError> {
        self.json()
    }

    // Assertion methods

    /// Asserts the status code.
    ///
    /// # Panics
    ///
    /// Panics if the status code doesn't match.
    pub fn assert_status(&self, expected: u16) -> &Self {
        assert_eq!(
            self.status(),
            expected,
            "Expected status {expected}, got {} with body: {}",
            self.status(),
            self.body()
        );
        self
    }

    /// Asserts the body matches exactly.
    ///
    /// # Panics
    ///
    /// Panics if the body doesn't match.
    pub fn assert_body(&self, expected: impl AsRef<str>) -> &Self {
        assert_eq!(self.body(), expected.as_ref(), "Body mismatch");
        self
    }

    /// Asserts the body contains a substring.
    ///
    /// # Panics
    ///
    /// Panics if the body doesn't contain the substring.
    pub fn assert_body_contains(&self, expected: impl AsRef<str>) -> &Self {
        let expected = expected.as_ref();
        assert!(
            self.body().contains(expected),
            "Body should contain '{expected}', got: {}",
            self.body()
        );
        self
    }

    /// Asserts the body is JSON equal to `expected`.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON or differs.
    pub fn assert_json(&self, expected: &Value) -> &Self {
        let actual = self
            .json_value()
            .unwrap_or_else(|e| panic!("Body is not JSON ({e}): {}", self.body()));
        assert_eq!(&actual, expected, "JSON body mismatch");
        self
    }

    /// Asserts a 400 "Incorrect Parameters" response naming `property`.
    ///
    /// # Panics
    ///
    /// Panics if the response is not a validation failure for `property`.
    pub fn assert_rejected(&self, property: &str) -> &Self {
        self.assert_status(400);
        let body = self
            .json_value()
            .unwrap_or_else(|e| panic!("Body is not JSON ({e}): {}", self.body()));
        assert_eq!(body["error"], "Incorrect Parameters");
        let named = body["details"]
            .as_array()
            .is_some_and(|details| details.iter().any(|d| d["property"] == property));
        assert!(named, "No violation for '{property}' in: {}", self.body());
        self
    }
}

impl From<Response> for TestResponse {
    fn from(response: Response) -> Self {
        Self::new(response)
    }
}
