//! Test error types.

use thiserror::Error;

/// Errors raised by the test utilities.
#[derive(Debug, Error)]
pub enum TestError {
    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The probe was read before any response was delivered.
    #[error("no response was delivered")]
    NoResponse,

    /// The probe received more than one response.
    #[error("expected exactly one response, got {0}")]
    MultipleResponses(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(TestError::NoResponse.to_string(), "no response was delivered");
        assert_eq!(
            TestError::MultipleResponses(2).to_string(),
            "expected exactly one response, got 2"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(TestError::from(err), TestError::Json(_)));
    }
}
