//! Wire-to-internal field renaming.
//!
//! Upstream payloads use names like `cognito:username` that do not map onto
//! Rust identifiers. A [`FieldMap`] is a static table of renames applied to a
//! copy of the payload before decoding; violations are translated back so
//! callers see the names they sent.

use crate::shape::into_object;
use crate::Shape;
use portico_core::{Violation, Violations};
use serde_json::{Map, Value};

/// Renames used for authorizer identity claims.
pub const CLAIMS_FIELDS: FieldMap = FieldMap::new(&[
    ("sub", "user_id"),
    ("cognito:username", "username"),
    ("iat", "issued_at_raw"),
]);

/// A static table of `(wire, internal)` field names.
///
/// Keys without an entry keep their name. Keys that already use an internal
/// name are dropped.
///
/// # Example
///
/// ```rust
/// use portico_extract::FieldMap;
/// use serde_json::json;
///
/// let fields = FieldMap::new(&[("sub", "user_id")]);
/// let wire = json!({"sub": "abc", "email": "a@b.io"});
/// let internal = fields.apply(wire.as_object().unwrap());
///
/// assert_eq!(internal["user_id"], "abc");
/// assert_eq!(internal["email"], "a@b.io");
/// assert_eq!(wire["sub"], "abc");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMap {
    entries: &'static [(&'static str, &'static str)],
}

impl FieldMap {
    /// Creates a map from `(wire, internal)` pairs.
    #[must_use]
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Returns the pairs in declaration order.
    #[must_use]
    pub const fn entries(&self) -> &'static [(&'static str, &'static str)] {
        self.entries
    }

    /// Internal name for a wire key.
    #[must_use]
    pub fn to_internal<'a>(&self, wire: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(from, _)| *from == wire)
            .map_or(wire, |(_, to)| *to)
    }

    /// Wire name for an internal field.
    #[must_use]
    pub fn wire_name<'a>(&self, internal: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(_, to)| *to == internal)
            .map_or(internal, |(from, _)| *from)
    }

    /// Returns a renamed copy of `wire`.
    ///
    /// A wire key spelled like an internal name of the table is dropped, so
    /// renamed fields are only ever filled from their wire names.
    #[must_use]
    pub fn apply(&self, wire: &Map<String, Value>) -> Map<String, Value> {
        wire.iter()
            .filter(|(key, _)| self.is_wire_name(key) || !self.is_internal_name(key))
            .map(|(key, value)| (self.to_internal(key).to_string(), value.clone()))
            .collect()
    }

    fn is_wire_name(&self, key: &str) -> bool {
        self.entries.iter().any(|(from, _)| *from == key)
    }

    fn is_internal_name(&self, key: &str) -> bool {
        self.entries.iter().any(|(_, to)| *to == key)
    }

    /// Rewrites violation properties (recursively) back to wire names.
    #[must_use]
    pub fn rename_violations(&self, violations: Violations) -> Violations {
        violations
            .into_iter()
            .map(|violation| self.rename_violation(violation))
            .collect()
    }

    fn rename_violation(&self, mut violation: Violation) -> Violation {
        violation.property = self.wire_name(&violation.property).to_string();
        violation.children = violation
            .children
            .into_iter()
            .map(|child| self.rename_violation(child))
            .collect();
        violation
    }
}

/// A shape that renames wire fields before delegating to `S`.
///
/// # Example
///
/// ```rust
/// use portico_extract::{FieldMap, Json, Renamed, Shape, Validate};
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Debug, Deserialize)]
/// struct Owner {
///     user_id: String,
/// }
///
/// impl Validate for Owner {}
///
/// const OWNER_FIELDS: FieldMap = FieldMap::new(&[("sub", "user_id")]);
///
/// let shape = Renamed::new(OWNER_FIELDS, Json::<Owner>::new());
/// assert_eq!(shape.decode(json!({"sub": "u-1"})).unwrap().user_id, "u-1");
///
/// let err = shape.decode(json!({})).unwrap_err();
/// assert_eq!(err.iter().next().unwrap().property, "sub");
/// ```
#[derive(Debug, Clone)]
pub struct Renamed<S> {
    fields: FieldMap,
    part: &'static str,
    inner: S,
}

impl<S> Renamed<S> {
    /// Wraps `inner` with a rename table.
    #[must_use]
    pub const fn new(fields: FieldMap, inner: S) -> Self {
        Self {
            fields,
            part: "body",
            inner,
        }
    }

    /// Sets the part name used when the input is not an object.
    #[must_use]
    pub const fn part(mut self, part: &'static str) -> Self {
        self.part = part;
        self
    }

    /// Returns the rename table.
    #[must_use]
    pub const fn fields(&self) -> FieldMap {
        self.fields
    }
}

impl<S: Shape> Shape for Renamed<S> {
    type Output = S::Output;

    fn decode(&self, raw: Value) -> Result<S::Output, Violations> {
        let object = into_object(raw, self.part)?;
        self.inner
            .decode(Value::Object(self.fields.apply(&object)))
            .map_err(|violations| self.fields.rename_violations(violations))
    }
}
