//! Field-level validation.
//!
//! Types decoded by [`Json`](crate::Json) and [`Params`](crate::Params)
//! implement [`Validate`] to add constraints serde cannot express. [`Checks`]
//! accumulates violations so every failing field is reported, not just the
//! first.

use portico_core::{Empty, Violation, Violations};
use regex::Regex;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;
use uuid::{Uuid, Version};

/// Post-decode validation.
///
/// The default implementation accepts everything, so a type with no extra
/// constraints only needs an empty `impl Validate for T {}`.
///
/// # Example
///
/// ```rust
/// use portico_extract::{Checks, Validate};
/// use portico_core::Violations;
///
/// struct Signup {
///     email: String,
///     name: String,
/// }
///
/// impl Validate for Signup {
///     fn validate(&self) -> Result<(), Violations> {
///         let mut checks = Checks::new();
///         checks.email("email", &self.email);
///         checks.not_empty("name", &self.name);
///         checks.finish()
///     }
/// }
///
/// let bad = Signup { email: "nope".into(), name: String::new() };
/// assert_eq!(bad.validate().unwrap_err().len(), 2);
/// ```
pub trait Validate {
    /// Returns the violations of this value, if any.
    fn validate(&self) -> Result<(), Violations> {
        Ok(())
    }
}

impl Validate for Empty {}
impl Validate for Value {}
impl Validate for String {}
impl Validate for HashMap<String, String> {}
impl Validate for BTreeMap<String, String> {}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), Violations> {
        self.as_ref().map_or(Ok(()), Validate::validate)
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), Violations> {
        let violations: Violations = self
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                item.validate().err().map(|nested| {
                    nested.into_iter().fold(
                        Violation::new(
                            index.to_string(),
                            "nestedValidation",
                            format!("item {index} is invalid"),
                        ),
                        Violation::with_child,
                    )
                })
            })
            .collect();
        violations.into_result()
    }
}

/// Violation accumulator for [`Validate`] implementations.
#[derive(Debug, Default)]
pub struct Checks {
    violations: Violations,
}

impl Checks {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation when `ok` is false.
    pub fn check(
        &mut self,
        ok: bool,
        property: &str,
        constraint: &str,
        message: impl Into<String>,
    ) -> &mut Self {
        if !ok {
            self.violations
                .push(Violation::new(property, constraint, message));
        }
        self
    }

    /// Requires a non-empty string.
    pub fn not_empty(&mut self, property: &str, value: &str) -> &mut Self {
        self.check(
            !value.is_empty(),
            property,
            "isNotEmpty",
            format!("{property} should not be empty"),
        )
    }

    /// Requires a syntactically valid email address.
    pub fn email(&mut self, property: &str, value: &str) -> &mut Self {
        self.check(
            is_email(value),
            property,
            "isEmail",
            format!("{property} must be an email"),
        )
    }

    /// Requires a version 4 UUID.
    pub fn uuid_v4(&mut self, property: &str, value: &str) -> &mut Self {
        self.check(
            parse_uuid_v4(value).is_some(),
            property,
            "isUuid",
            format!("{property} must be a UUID"),
        )
    }

    /// Requires a value within `min..=max`.
    pub fn range<T: PartialOrd + std::fmt::Display>(
        &mut self,
        property: &str,
        value: T,
        min: T,
        max: T,
    ) -> &mut Self {
        let message = format!("{property} must be between {min} and {max}");
        self.check(value >= min && value <= max, property, "isInRange", message)
    }

    /// Records an arbitrary violation.
    pub fn push(&mut self, violation: Violation) -> &mut Self {
        self.violations.push(violation);
        self
    }

    /// Merges violations from a nested value.
    pub fn nested(&mut self, result: Result<(), Violations>) -> &mut Self {
        if let Err(nested) = result {
            self.violations.extend(nested);
        }
        self
    }

    /// Returns `true` if nothing has failed so far.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Finishes validation.
    pub fn finish(self) -> Result<(), Violations> {
        self.violations.into_result()
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
            .expect("valid regex")
    })
}

/// Returns `true` for a syntactically valid email address.
#[must_use]
pub fn is_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Parses a hyphenated version 4 UUID.
#[must_use]
pub fn parse_uuid_v4(value: &str) -> Option<Uuid> {
    if value.len() != 36 {
        return None;
    }
    Uuid::parse_str(value)
        .ok()
        .filter(|uuid| uuid.get_version() == Some(Version::Random))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_email() {
        assert!(is_email("alice@example.com"));
        assert!(is_email("first.last+tag@sub.example.co"));
        assert!(!is_email("alice"));
        assert!(!is_email("alice@"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("alice@example"));
        assert!(!is_email("al ice@example.com"));
    }

    #[test]
    fn test_uuid_v4() {
        assert!(parse_uuid_v4("3f2c1f5e-8a4b-4c8d-9e2f-1a2b3c4d5e6f").is_some());
        // version 1
        assert!(parse_uuid_v4("c232ab00-9414-11ec-b3c8-9f6bdeced846").is_none());
        // simple form
        assert!(parse_uuid_v4("3f2c1f5e8a4b4c8d9e2f1a2b3c4d5e6f").is_none());
        assert!(parse_uuid_v4("not-a-uuid").is_none());
    }

    #[test]
    fn test_checks_accumulate() {
        let mut checks = Checks::new();
        checks
            .not_empty("name", "")
            .email("email", "bad")
            .uuid_v4("sub", "3f2c1f5e-8a4b-4c8d-9e2f-1a2b3c4d5e6f")
            .range("limit", 500, 1, 100);
        assert!(!checks.is_ok());

        let violations = checks.finish().unwrap_err();
        assert_eq!(violations.len(), 3);
        assert!(violations.get("name").is_some());
        assert!(violations.get("email").is_some());
        assert!(violations.get("limit").is_some());
        assert!(violations.get("sub").is_none());
    }

    #[test]
    fn test_checks_pass() {
        let mut checks = Checks::new();
        checks.not_empty("name", "gear").range("limit", 10, 1, 100);
        assert!(checks.finish().is_ok());
    }

    #[test]
    fn test_vec_reports_failing_items() {
        struct Item(bool);
        impl Validate for Item {
            fn validate(&self) -> Result<(), Violations> {
                let mut checks = Checks::new();
                checks.check(self.0, "ok", "isTrue", "ok must be true");
                checks.finish()
            }
        }

        let items = vec![Item(true), Item(false), Item(true)];
        let violations = items.validate().unwrap_err();
        assert_eq!(violations.len(), 1);
        let item = violations.get("1").unwrap();
        assert_eq!(item.children[0].property, "ok");
    }

    #[test]
    fn test_option_validates_inner() {
        assert!(None::<Vec<Empty>>.validate().is_ok());
        assert!(Some(String::new()).validate().is_ok());
    }

    proptest! {
        #[test]
        fn prop_generated_v4_uuids_are_accepted(bytes in any::<[u8; 16]>()) {
            let uuid = uuid::Builder::from_random_bytes(bytes).into_uuid();
            prop_assert_eq!(parse_uuid_v4(&uuid.to_string()), Some(uuid));
        }
    }
}
