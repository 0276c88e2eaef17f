//! String-map shapes for path, query and header parts.
//!
//! Path parameters, query strings and headers arrive as flat string maps.
//! [`Params`] coerces them into typed structs the same way a query string
//! would be parsed, so `"10"` decodes into a `u32` field.

use crate::shape::{into_object, violation_from_serde};
use crate::{Shape, Validate};
use portico_core::{Violation, Violations};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;

/// Shape for flat string maps.
///
/// # Example
///
/// ```rust
/// use portico_extract::{Params, Shape, Validate};
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Deserialize)]
/// struct ListParams {
///     #[serde(default)]
///     limit: Option<u32>,
///     search: String,
/// }
///
/// impl Validate for ListParams {}
///
/// let params = Params::<ListParams>::query()
///     .decode(json!({"limit": "10", "search": "gear"}))
///     .unwrap();
/// assert_eq!(params.limit, Some(10));
/// ```
pub struct Params<T> {
    part: &'static str,
    lowercase_keys: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Params<T> {
    /// Creates a shape reporting unattributed violations against `part`.
    #[must_use]
    pub const fn new(part: &'static str) -> Self {
        Self {
            part,
            lowercase_keys: false,
            _marker: PhantomData,
        }
    }

    /// Shape for path parameters.
    #[must_use]
    pub const fn path() -> Self {
        Self::new("path")
    }

    /// Shape for query string parameters.
    #[must_use]
    pub const fn query() -> Self {
        Self::new("query")
    }

    /// Shape for headers. Header names are matched case-insensitively by
    /// lowercasing them before decoding, so fields should be lowercase.
    ///
    /// Names that only differ in case are one header: their values are
    /// joined with `", "`, in the key order of the event map.
    #[must_use]
    pub const fn headers() -> Self {
        Self {
            part: "headers",
            lowercase_keys: true,
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Params<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Params")
            .field("part", &self.part)
            .field("lowercase_keys", &self.lowercase_keys)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> Params<T> {
    fn to_pairs(&self, raw: Value) -> Result<Vec<(String, String)>, Violations> {
        let object = match raw {
            Value::Null => return Ok(Vec::new()),
            other => into_object(other, self.part)?,
        };

        let mut pairs: Vec<(String, String)> = Vec::with_capacity(object.len());
        let mut violations = Violations::new();
        for (key, value) in object {
            let key = if self.lowercase_keys {
                key.to_ascii_lowercase()
            } else {
                key
            };
            let text = match value {
                Value::Null => continue,
                Value::String(text) => text,
                Value::Number(number) => number.to_string(),
                Value::Bool(flag) => flag.to_string(),
                other => {
                    violations.push(
                        Violation::new(key.as_str(), "isString", format!("{key} must be a string"))
                            .with_value(other),
                    );
                    continue;
                }
            };
            match pairs.iter_mut().find(|(existing, _)| *existing == key) {
                Some((_, joined)) => {
                    joined.push_str(", ");
                    joined.push_str(&text);
                }
                None => pairs.push((key, text)),
            }
        }
        violations.into_result()?;
        Ok(pairs)
    }
}

impl<T> Shape for Params<T>
where
    T: DeserializeOwned + Validate + Send + 'static,
{
    type Output = T;

    fn decode(&self, raw: Value) -> Result<T, Violations> {
        let pairs = self.to_pairs(raw)?;
        let encoded = serde_urlencoded::to_string(&pairs).map_err(|err| {
            Violations::single(Violation::new(self.part, "isValid", err.to_string()))
        })?;

        let decoded: T = serde_urlencoded::from_str(&encoded)
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
    use std::collections::HashMap;

    #[derive(Debug, Deserialize, PartialEq)]
    struct WidgetPath {
        id: String,
    }

    impl Validate for WidgetPath {
        fn validate(&self) -> Result<(), Violations> {
            let mut checks = Checks::new();
            checks.uuid_v4("id", &self.id);
            checks.finish()
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Paging {
        #[serde(default)]
        limit: Option<u32>,
        #[serde(default)]
        verbose: bool,
    }

    impl Validate for Paging {}

    #[derive(Debug, Deserialize, PartialEq)]
    struct Tracing {
        #[serde(rename = "x-trace-id")]
        trace_id: String,
    }

    impl Validate for Tracing {}

    #[test]
    fn test_path_with_validation() {
        let shape = Params::<WidgetPath>::path();
        let ok = shape
            .decode(json!({"id": "3f2c1f5e-8a4b-4c8d-9e2f-1a2b3c4d5e6f"}))
            .unwrap();
        assert_eq!(ok.id, "3f2c1f5e-8a4b-4c8d-9e2f-1a2b3c4d5e6f");

        let err = shape.decode(json!({"id": "42"})).unwrap_err();
        assert!(err.get("id").unwrap().constraints.contains_key("isUuid"));
    }

    #[test]
    fn test_missing_required_param() {
        let err = Params::<WidgetPath>::path().decode(json!({})).unwrap_err();
        assert!(err.get("id").unwrap().constraints.contains_key("isDefined"));
    }

    #[test]
    fn test_query_coerces_strings() {
        let paging = Params::<Paging>::query()
            .decode(json!({"limit": "25", "verbose": "true"}))
            .unwrap();
        assert_eq!(paging, Paging { limit: Some(25), verbose: true });
    }

    #[test]
    fn test_query_accepts_native_scalars() {
        let paging = Params::<Paging>::query()
            .decode(json!({"limit": 5, "verbose": false, "ignored": null}))
            .unwrap();
        assert_eq!(paging.limit, Some(5));
    }

    #[test]
    fn test_null_is_empty() {
        let paging = Params::<Paging>::query().decode(Value::Null).unwrap();
        assert_eq!(paging, Paging { limit: None, verbose: false });
    }

    #[test]
    fn test_query_rejects_bad_number() {
        let err = Params::<Paging>::query()
            .decode(json!({"limit": "ten"}))
            .unwrap_err();
        assert!(err.get("query").unwrap().constraints.contains_key("isValid"));
    }

    #[test]
    fn test_nested_values_are_rejected() {
        let err = Params::<HashMap<String, String>>::query()
            .decode(json!({"filter": {"a": 1}, "tags": [1]}))
            .unwrap_err();
        assert_eq!(err.len(), 2);
        assert!(err.get("filter").unwrap().constraints.contains_key("isString"));
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let tracing = Params::<Tracing>::headers()
            .decode(json!({"X-Trace-Id": "abc"}))
            .unwrap();
        assert_eq!(tracing.trace_id, "abc");
    }

    #[test]
    fn test_headers_differing_in_case_are_joined() {
        let raw = json!({"X-Trace-Id": "abc", "x-trace-id": "def"});

        let tracing = Params::<Tracing>::headers().decode(raw.clone()).unwrap();
        assert_eq!(tracing.trace_id, "abc, def");

        let map = Params::<HashMap<String, String>>::headers()
            .decode(raw)
            .unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["x-trace-id"], "abc, def");
    }

    #[test]
    fn test_string_map_passthrough() {
        let map = Params::<HashMap<String, String>>::new("path")
            .decode(json!({"a": "1", "b": "two words"}))
            .unwrap();
        assert_eq!(map["b"], "two words");
    }
}
