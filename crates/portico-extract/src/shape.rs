//! The decode-and-validate capability.
//!
//! A [`Shape`] turns a raw JSON value into a typed value or rejects it with
//! field-level [`Violations`]. The pipeline holds one shape per request part.

use portico_core::{Empty, Violation, Violations};
use serde_json::{Map, Value};
use std::marker::PhantomData;

/// Decodes and validates a raw value.
///
/// Implementations must be pure: decoding the same input twice yields equal
/// results.
///
/// # Example
///
/// ```rust
/// use portico_extract::{Shape, Accept};
/// use serde_json::json;
///
/// let shape = Accept;
/// assert!(shape.decode(json!({"anything": true})).is_ok());
/// ```
pub trait Shape: Send + Sync + 'static {
    /// The decoded type.
    type Output: Send + 'static;

    /// Decodes `raw`, or reports why it does not match.
    fn decode(&self, raw: Value) -> Result<Self::Output, Violations>;
}

/// The no-op shape: accepts any input and yields [`Empty`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accept;

impl Shape for Accept {
    type Output = Empty;

    fn decode(&self, _raw: Value) -> Result<Empty, Violations> {
        Ok(Empty {})
    }
}

/// A shape backed by a plain function or closure.
///
/// # Example
///
/// ```rust
/// use portico_extract::{shape_fn, Shape};
/// use portico_core::{Violation, Violations};
/// use serde_json::{json, Value};
///
/// let positive = shape_fn(|raw: Value| {
///     raw.as_i64()
///         .filter(|n| *n > 0)
///         .ok_or_else(|| Violations::single(Violation::new("n", "isPositive", "n must be positive")))
/// });
///
/// assert_eq!(positive.decode(json!(3)).unwrap(), 3);
/// assert!(positive.decode(json!(-1)).is_err());
/// ```
pub struct FnShape<F, T> {
    func: F,
    _marker: PhantomData<fn() -> T>,
}

impl<F, T> Shape for FnShape<F, T>
where
    F: Fn(Value) -> Result<T, Violations> + Send + Sync + 'static,
    T: Send + 'static,
{
    type Output = T;

    fn decode(&self, raw: Value) -> Result<T, Violations> {
        (self.func)(raw)
    }
}

/// Wraps a function as a [`Shape`].
pub const fn shape_fn<F, T>(func: F) -> FnShape<F, T>
where
    F: Fn(Value) -> Result<T, Violations> + Send + Sync + 'static,
    T: Send + 'static,
{
    FnShape {
        func,
        _marker: PhantomData,
    }
}

/// Interprets `raw` as a JSON object.
///
/// A string is parsed as JSON first, so JSON-encoded payloads are accepted
/// alongside structured ones.
pub fn into_object(raw: Value, part: &str) -> Result<Map<String, Value>, Violations> {
    let value = match raw {
        Value::String(text) => serde_json::from_str(&text).map_err(|err| {
            Violations::single(Violation::new(
                part,
                "isJson",
                format!("{part} must be valid JSON: {err}"),
            ))
        })?,
        other => other,
    };

    match value {
        Value::Object(map) => Ok(map),
        other => Err(Violations::single(
            Violation::new(part, "isObject", format!("{part} must be an object"))
                .with_value(other),
        )),
    }
}

/// Builds a violation from a serde error message.
///
/// `missing field`, `unknown field` and `duplicate field` errors name the
/// offending field; everything else is reported against the whole part.
pub(crate) fn violation_from_serde(part: &str, message: &str) -> Violation {
    const FIELD_ERRORS: [(&str, &str); 3] = [
        ("missing field `", "isDefined"),
        ("unknown field `", "whitelistValidation"),
        ("duplicate field `", "isUnique"),
    ];

    for (prefix, constraint) in FIELD_ERRORS {
        if let Some(rest) = message.strip_prefix(prefix) {
            if let Some(field) = rest.split('`').next() {
                return Violation::new(field, constraint, message);
            }
        }
    }

    Violation::new(part, "isValid", message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accept_ignores_input() {
        assert_eq!(Accept.decode(json!({})).unwrap(), Empty {});
        assert_eq!(Accept.decode(json!("text")).unwrap(), Empty {});
        assert_eq!(Accept.decode(json!(null)).unwrap(), Empty {});
    }

    #[test]
    fn test_into_object_structured() {
        let map = into_object(json!({"a": 1}), "claims").unwrap();
        assert_eq!(map["a"], 1);
    }

    #[test]
    fn test_into_object_encoded() {
        let map = into_object(json!(r#"{"a": 1}"#), "claims").unwrap();
        assert_eq!(map["a"], 1);
    }

    #[test]
    fn test_into_object_rejects_invalid_json() {
        let err = into_object(json!("{not json"), "claims").unwrap_err();
        let violation = err.get("claims").unwrap();
        assert!(violation.constraints.contains_key("isJson"));
    }

    #[test]
    fn test_into_object_rejects_non_objects() {
        let err = into_object(json!([1, 2]), "body").unwrap_err();
        assert!(err.get("body").unwrap().constraints.contains_key("isObject"));

        let err = into_object(json!("42"), "body").unwrap_err();
        assert_eq!(err.get("body").unwrap().value, Some(json!(42)));
    }

    #[test]
    fn test_violation_from_serde_names_field() {
        let violation = violation_from_serde("body", "missing field `name`");
        assert_eq!(violation.property, "name");
        assert!(violation.constraints.contains_key("isDefined"));

        let violation = violation_from_serde("body", "unknown field `extra`, expected `name`");
        assert_eq!(violation.property, "extra");
    }

    #[test]
    fn test_violation_from_serde_falls_back_to_part() {
        let violation = violation_from_serde("query", "invalid digit found in string");
        assert_eq!(violation.property, "query");
        assert!(violation.constraints.contains_key("isValid"));
    }
}
