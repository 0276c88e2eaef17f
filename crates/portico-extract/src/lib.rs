//! # Portico Extract
//!
//! Decode-and-validate shapes for the parts of an inbound event.
//!
//! Every request part (path, query, body, headers, authorizer claims) is
//! decoded by a [`Shape`]. A shape either yields a typed value or rejects the
//! input with field-level [`Violations`](portico_core::Violations).
//!
//! | Shape | Typical part | Description |
//! |-------|--------------|-------------|
//! | [`Accept`] | any | Accepts everything, yields `Empty` |
//! | [`Json<T>`] | body | JSON payload into a typed struct |
//! | [`Params<T>`] | path, query, headers | String map with scalar coercion |
//! | [`Renamed<S>`] | any | Renames wire fields, then delegates |
//! | [`ClaimsShape`] | claims | Authorizer identity claims |
//! | [`FnShape`] | any | A closure |
//!
//! ## Example
//!
//! ```rust
//! use portico_extract::{Checks, Json, Params, Shape, Validate};
//! use portico_core::Violations;
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Deserialize)]
//! struct WidgetPath {
//!     id: u64,
//! }
//!
//! impl Validate for WidgetPath {}
//!
//! #[derive(Debug, Deserialize)]
//! struct RenameWidget {
//!     name: String,
//! }
//!
//! impl Validate for RenameWidget {
//!     fn validate(&self) -> Result<(), Violations> {
//!         let mut checks = Checks::new();
//!         checks.not_empty("name", &self.name);
//!         checks.finish()
//!     }
//! }
//!
//! let path = Params::<WidgetPath>::path().decode(json!({"id": "7"})).unwrap();
//! assert_eq!(path.id, 7);
//!
//! let err = Json::<RenameWidget>::new().decode(json!(r#"{"name": ""}"#)).unwrap_err();
//! assert_eq!(err.len(), 1);
//! ```

#![doc(html_root_url = "https://docs.rs/portico-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod claims;
mod fields;
mod json;
mod params;
mod shape;
mod validate;

pub use claims::ClaimsShape;
pub use fields::{FieldMap, Renamed, CLAIMS_FIELDS};
pub use json::Json;
pub use params::Params;
pub use shape::{into_object, shape_fn, Accept, FnShape, Shape};
pub use validate::{is_email, parse_uuid_v4, Checks, Validate};
