//! The typed request handed to the wrapped handler.

use crate::IdentityClaims;
use serde::{Deserialize, Serialize};

/// Placeholder for a request part with no declared shape.
///
/// Decoding anything into `Empty` succeeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

/// A request whose parts have all been decoded and validated.
///
/// The pipeline only constructs this once every declared part decoded
/// successfully; a handler never sees a partially decoded request.
/// `claims` is `None` when no authorizer payload was present and claims are
/// not required.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRequest<P = Empty, Q = Empty, B = Empty, H = Empty, C = IdentityClaims> {
    /// Path parameters.
    pub path: P,
    /// Query string parameters.
    pub query: Q,
    /// Request body.
    pub body: B,
    /// Request headers.
    pub headers: H,
    /// Caller identity.
    pub claims: Option<C>,
}

impl<P, Q, B, H, C> DecodedRequest<P, Q, B, H, C> {
    /// Returns the claims, if the caller presented a valid identity.
    #[must_use]
    pub fn claims(&self) -> Option<&C> {
        self.claims.as_ref()
    }
}
