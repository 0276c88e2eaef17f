//! Identity claims shape.

use crate::fields::{FieldMap, CLAIMS_FIELDS};
use crate::shape::into_object;
use crate::validate::{is_email, parse_uuid_v4};
use crate::Shape;
use portico_core::{parse_timestamp, IdentityClaims, Violation, Violations};
use serde_json::{Map, Value};

/// Decodes an authorizer claims payload into [`IdentityClaims`].
///
/// The payload may be structured or a JSON-encoded string. Every field is
/// checked and all violations are reported together, under the names the
/// authorizer used (`sub`, `cognito:username`, `iat`).
///
/// # Example
///
/// ```rust
/// use portico_extract::{ClaimsShape, Shape};
/// use serde_json::json;
///
/// let claims = ClaimsShape::default()
///     .decode(json!({
///         "email": "alice@example.com",
///         "sub": "3f2c1f5e-8a4b-4c8d-9e2f-1a2b3c4d5e6f",
///         "cognito:username": "alice",
///         "iat": "Wed Jul 19 08:49:43 UTC 2023"
///     }))
///     .unwrap();
///
/// assert_eq!(claims.username(), "alice");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ClaimsShape {
    fields: FieldMap,
}

impl ClaimsShape {
    /// Creates a claims shape using a custom rename table.
    ///
    /// The table must map onto the internal names `user_id`, `username` and
    /// `issued_at_raw`.
    #[must_use]
    pub const fn with_fields(fields: FieldMap) -> Self {
        Self { fields }
    }
}

impl Default for ClaimsShape {
    fn default() -> Self {
        Self::with_fields(CLAIMS_FIELDS)
    }
}

/// Reads a required string field. Messages use `label`, the wire name.
fn string_field<'a>(
    object: &'a Map<String, Value>,
    name: &str,
    label: &str,
    violations: &mut Violations,
) -> Option<&'a str> {
    match object.get(name) {
        None | Some(Value::Null) => {
            violations.push(Violation::new(
                name,
                "isDefined",
                format!("{label} should not be null or undefined"),
            ));
            None
        }
        Some(Value::String(text)) => Some(text.as_str()),
        Some(other) => {
            violations.push(
                Violation::new(name, "isString", format!("{label} must be a string"))
                    .with_value(other.clone()),
            );
            None
        }
    }
}

impl Shape for ClaimsShape {
    type Output = IdentityClaims;

    fn decode(&self, raw: Value) -> Result<IdentityClaims, Violations> {
        let wire = into_object(raw, "claims")?;
        let object = self.fields.apply(&wire);
        let sub_label = self.fields.wire_name("user_id");
        let username_label = self.fields.wire_name("username");
        let iat_label = self.fields.wire_name("issued_at_raw");
        let mut violations = Violations::new();

        let email = string_field(&object, "email", "email", &mut violations).filter(|email| {
            let ok = is_email(email);
            if !ok {
                violations.push(
                    Violation::new("email", "isEmail", "email must be an email")
                        .with_value(Value::String((*email).to_string())),
                );
            }
            ok
        });

        let user_id = string_field(&object, "user_id", sub_label, &mut violations).and_then(|sub| {
            let parsed = parse_uuid_v4(sub);
            if parsed.is_none() {
                violations.push(
                    Violation::new("user_id", "isUuid", format!("{sub_label} must be a UUID"))
                        .with_value(Value::String(sub.to_string())),
                );
            }
            parsed
        });

        let username = string_field(&object, "username", username_label, &mut violations).filter(|name| {
            let ok = !name.is_empty();
            if !ok {
                violations.push(Violation::new(
                    "username",
                    "isNotEmpty",
                    format!("{username_label} should not be empty"),
                ));
            }
            ok
        });

        let issued_at_raw = match object.get("issued_at_raw") {
            Some(Value::Number(seconds)) => Some(seconds.to_string()),
            _ => string_field(&object, "issued_at_raw", iat_label, &mut violations).map(str::to_string),
        }
        .filter(|raw| {
            let ok = parse_timestamp(raw).is_some();
            if !ok {
                violations.push(
                    Violation::new(
                        "issued_at_raw",
                        "isDateString",
                        format!("{iat_label} must be a valid date"),
                    )
                    .with_value(Value::String(raw.clone())),
                );
            }
            ok
        });

        match (email, user_id, username, issued_at_raw) {
            (Some(email), Some(user_id), Some(username), Some(issued_at_raw))
                if violations.is_empty() =>
            {
                IdentityClaims::new(email, user_id, username, issued_at_raw).ok_or_else(|| {
                    Violations::single(Violation::new(
                        iat_label,
                        "isDateString",
                        format!("{iat_label} must be a valid date"),
                    ))
                })
            }
            _ => Err(self.fields.rename_violations(violations)),
        }
    }
}
