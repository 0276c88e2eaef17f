//! Failure classification.
//!
//! Converts every [`Failure`] into a status-coded [`Response`]:
//!
//! | Failure | Status | Body |
//! |---------|--------|------|
//! | `Validation` | 400 | `{"statusCode":400,"error":"Incorrect Parameters","details":[...]}` |
//! | `Declared` | its own | the failure, serialized |
//! | `Unclassified` | 500 | the error message as plain text |

use super::Stage;
use portico_core::{render_serializable, Failure, Response, Violations, INCORRECT_PARAMETERS};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationEnvelope<'a> {
    status_code: u16,
    error: &'static str,
    details: &'a Violations,
}

/// Builds the response for a failure.
pub fn failure_response(failure: &Failure) -> Response {
    let status = failure.status().as_u16();
    match failure {
        Failure::Validation(violations) => {
            tracing::warn!(
                stage = Stage::Response.name(),
                http.status_code = status,
                violations = violations.len(),
                "Request rejected"
            );
            Response::new(
                status,
                render_serializable(&ValidationEnvelope {
                    status_code: status,
                    error: INCORRECT_PARAMETERS,
                    details: violations,
                }),
            )
        }
        Failure::Declared(declared) if declared.status_code() != status => {
            tracing::error!(
                stage = Stage::Response.name(),
                http.status_code = status,
                declared_status = declared.status_code(),
                "Declared failure carries a non-error status"
            );
            Response::new(status, declared.to_string())
        }
        Failure::Declared(declared) => {
            if declared.status().is_server_error() {
                tracing::error!(
                    stage = Stage::Response.name(),
                    http.status_code = status,
                    error = declared.error(),
                    "Handler declared a server failure"
                );
            } else {
                tracing::warn!(
                    stage = Stage::Response.name(),
                    http.status_code = status,
                    error = declared.error(),
                    "Handler declared a client failure"
                );
            }
            Response::new(status, render_serializable(declared))
        }
        Failure::Unclassified(error) => {
            tracing::error!(
                stage = Stage::Response.name(),
                http.status_code = status,
                error = %error,
                "Unclassified failure"
            );
            Response::new(status, error.to_string())
        }
    }
}
