//! JSON body shape.
//!
//! The [`Json`] shape decodes a request body into a typed struct.

use crate::shape::violation_from_serde;
use crate::{Shape, Validate};
use portico_core::{Violation, Violations};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;

/// Shape for JSON payloads.
///
/// A string input is parsed as JSON; structured input is used as-is. The
/// result is deserialized into `T` and then checked with
/// [`Validate::validate`].
///
/// # Example
///
/// ```rust
/// use portico_extract::{Json, Shape, Validate};
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Debug, Deserialize)]
/// struct CreateWidget {
///     name: String,
/// }
///
/// impl Validate for CreateWidget {}
///
/// let shape = Json::<CreateWidget>::new();
/// let widget = shape.decode(json!(r#"{"name": "gear"}"#)).unwrap();
/// assert_eq!(widget.name, "gear");
///
/// let err = shape.decode(json!({})).unwrap_err();
/// assert_eq!(err.iter().next().unwrap().property, "name");
/// ```
pub struct Json<T> {
    part: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Json<T> {
    /// Creates a body shape.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            part: "body",
            _marker: PhantomData,
        }
    }

    /// Sets the part name used in violations that are not tied to a field.
    #[must_use]
    pub const fn part(mut self, part: &'static str) -> Self {
        self.part = part;
        self
    }
}

impl<T> Default for Json<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Json<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Json")
            .field("part", &self.part)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> Shape for Json<T>
where
    T: DeserializeOwned + Validate + Send + 'static,
{
    type Output = T;

    fn decode(&self, raw: Value) -> Result<T, Violations> {
        let value = match raw {
            Value::String(text) => serde_json::from_str(&text).map_err(|err| {
                Violations::single(Violation::new(
                    self.part,
                    "isJson",
                    format!("{} must be valid JSON: {err}", self.part),
                ))
            })?,
            other => other,
        };

        let decoded: T = serde_json::from_value(value)
            .map_err(|err| Violations::single(violation_from_serde(self.part, &err.to_string())))?;

        decoded.validate()?;
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Checks;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct CreateUser {
        name: String,
        email: String,
    }

    impl Validate for CreateUser {
        fn validate(&self) -> Result<(), Violations> {
            let mut checks = Checks::new();
            checks.not_empty("name", &self.name).email("email", &self.email);
            checks.finish()
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct OptionalFields {
        required: String,
        #[serde(default)]
        optional: Option<String>,
    }

    impl Validate for OptionalFields {}

    #[test]
    fn test_string_body() {
        let shape = Json::<CreateUser>::new();
        let user = shape
            .decode(json!(r#"{"name": "Alice", "email": "alice@example.com"}"#))
            .unwrap();
        assert_eq!(user.name, "Alice");
    }

    #[test]
    fn test_structured_body() {
        let shape = Json::<CreateUser>::new();
        let user = shape
            .decode(json!({"name": "Bob", "email": "bob@example.com"}))
            .unwrap();
        assert_eq!(user.email, "bob@example.com");
    }

    #[test]
    fn test_optional_fields() {
        let data = Json::<OptionalFields>::new()
            .decode(json!({"required": "value"}))
            .unwrap();
        assert_eq!(data.optional, None);
    }

    #[test]
    fn test_empty_mapping_fails_required_fields() {
        let err = Json::<CreateUser>::new().decode(json!({})).unwrap_err();
        let violation = err.get("name").unwrap();
        assert!(violation.constraints.contains_key("isDefined"));
    }

    #[test]
    fn test_invalid_json() {
        let err = Json::<CreateUser>::new()
            .decode(json!(r#"{"name": "Alice", invalid json"#))
            .unwrap_err();
        assert!(err.get("body").unwrap().constraints.contains_key("isJson"));
    }

    #[test]
    fn test_wrong_type() {
        let err = Json::<CreateUser>::new()
            .decode(json!({"name": 123, "email": "alice@example.com"}))
            .unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err.get("body").unwrap().constraints.contains_key("isValid"));
    }

    #[test]
    fn test_validation_collects_all_fields() {
        let err = Json::<CreateUser>::new()
            .decode(json!({"name": "", "email": "nope"}))
            .unwrap_err();
        assert_eq!(err.len(), 2);
    }

    #[test]
    fn test_custom_part_name() {
        let err = Json::<CreateUser>::new()
            .part("payload")
            .decode(json!("[1"))
            .unwrap_err();
        assert!(err.get("payload").is_some());
    }

    #[test]
    fn test_decode_is_idempotent() {
        let shape = Json::<CreateUser>::new();
        let raw = json!(r#"{"name": "Alice", "email": "alice@example.com"}"#);
        assert_eq!(shape.decode(raw.clone()).unwrap(), shape.decode(raw).unwrap());
    }
}
