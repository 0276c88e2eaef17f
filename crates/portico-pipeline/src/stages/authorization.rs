//! Authorization gate.
//!
//! When claims are required, an invocation must carry an authorizer payload
//! that decoded successfully. The gate never inspects what the claims say;
//! fine-grained checks belong to the handler.

use super::Stage;
use portico_core::{HttpFailure, Violations};
use portico_telemetry::metrics::record_unauthorized;

/// Checks the claims outcome against `claims_required`.
///
/// `claims` is `None` when the event carried no claims payload.
pub fn authorize<C>(
    claims_required: bool,
    claims: Option<&Result<C, Violations>>,
) -> Result<(), HttpFailure> {
    if !claims_required {
        return Ok(());
    }

    let reason = match claims {
        Some(Ok(_)) => return Ok(()),
        Some(Err(_)) => "claims failed validation",
        None => "claims missing",
    };

    tracing::warn!(stage = Stage::Authorization.name(), reason, "Invocation not authorized");
    record_unauthorized();
    Err(HttpFailure::unauthorized())
}
