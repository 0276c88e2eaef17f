//! Authenticated caller identity.
//!
//! [`IdentityClaims`] is the validated form of the claims payload an upstream
//! authorizer attaches to an event. Instances only come out of a successful
//! decode (see `portico_extract::ClaimsShape`); there is no way to hold a
//! partially valid identity.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Validated identity of the caller.
///
/// # Example
///
/// ```
/// use portico_core::IdentityClaims;
/// use uuid::Uuid;
///
/// let claims = IdentityClaims::new(
///     "alice@example.com",
///     Uuid::parse_str("3f2c1f5e-8a4b-4c8d-9e2f-1a2b3c4d5e6f").unwrap(),
///     "alice",
///     "2023-07-19T08:49:43Z",
/// )
/// .unwrap();
///
/// assert_eq!(claims.username(), "alice");
/// assert_eq!(claims.issued_at().timestamp(), 1_689_756_583);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityClaims {
    email: String,
    user_id: Uuid,
    username: String,
    #[serde(skip)]
    issued_at_raw: String,
    issued_at: DateTime<Utc>,
}

impl IdentityClaims {
    /// Builds claims from already-validated parts.
    ///
    /// Returns `None` when `issued_at_raw` cannot be parsed as a point in
    /// time. Field syntax (email, UUID version) is the decoder's concern.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        user_id: Uuid,
        username: impl Into<String>,
        issued_at_raw: impl Into<String>,
    ) -> Option<Self> {
        let issued_at_raw = issued_at_raw.into();
        let issued_at = parse_timestamp(&issued_at_raw)?;
        Some(Self {
            email: email.into(),
            user_id,
            username: username.into(),
            issued_at_raw,
            issued_at,
        })
    }

    /// Returns the caller's email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the caller's user id (the `sub` claim).
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Returns the caller's username (the `cognito:username` claim).
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the issued-at claim exactly as it was received.
    #[must_use]
    pub fn issued_at_raw(&self) -> &str {
        &self.issued_at_raw
    }

    /// Returns when the identity was issued.
    #[must_use]
    pub const fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }
}

/// Cognito renders `iat` as e.g. `Wed Jul 19 08:49:43 UTC 2023`.
const COGNITO_FORMATS: [&str; 2] = ["%a %b %d %H:%M:%S UTC %Y", "%a %b %e %H:%M:%S UTC %Y"];

/// Parses an issued-at value.
///
/// Accepts RFC 3339, RFC 2822, the Cognito textual form and integer epoch
/// seconds. Returns `None` for anything else.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(seconds) = raw.parse::<i64>() {
        return Utc.timestamp_opt(seconds, 0).single();
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    COGNITO_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}
