//! # Portico Pipeline
//!
//! Wraps an event-driven HTTP handler in a fixed adaptation pipeline.
//!
//! ```text
//! ProxyEvent → decode path → decode query → decode body → decode headers
//!            → decode claims → authorization → handler → Response
//! ```
//!
//! Every invocation produces exactly one [`Response`](portico_core::Response):
//!
//! | Outcome | Status | Body |
//! |---------|--------|------|
//! | Success | 200 | The handler value; strings as-is, anything else as JSON |
//! | Claims required but missing or invalid | 401 | `{"statusCode":401,"error":"unauthorized"}` |
//! | A request part rejected | 400 | `{"statusCode":400,"error":"Incorrect Parameters","details":[...]}` |
//! | Declared failure | its own | The failure, serialized |
//! | Anything else, panics included | 500 | The error message |
//!
//! ## Example
//!
//! ```
//! use portico_core::{handler_fn, DecodedRequest, Empty, Failure, InvocationContext, ProxyEvent};
//! use portico_extract::{Params, Validate};
//! use portico_pipeline::{EntryConfig, EntryPoint};
//! use serde::Deserialize;
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! #[derive(Deserialize)]
//! struct WidgetPath {
//!     id: String,
//! }
//! impl Validate for WidgetPath {}
//!
//! type Request = DecodedRequest<WidgetPath, Empty, Empty, Empty>;
//!
//! let config = EntryConfig::builder().path(Params::<WidgetPath>::path()).build();
//! let entry = EntryPoint::with_config(
//!     config,
//!     handler_fn(|req: Request, _event: Arc<ProxyEvent>, _ctx: InvocationContext| async move {
//!         Ok::<_, Failure>(format!("widget {}", req.path.id))
//!     }),
//! );
//!
//! let event = ProxyEvent {
//!     path_parameters: Some(HashMap::from([("id".to_string(), "42".to_string())])),
//!     ..Default::default()
//! };
//!
//! # tokio_test::block_on(async {
//! let response = entry.invoke(event, InvocationContext::mock()).await;
//! assert_eq!(response.body, "widget 42");
//! # });
//! ```

#![doc(html_root_url = "https://docs.rs/portico-pipeline/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod entry;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod stages;

pub use config::{EntryConfig, EntryConfigBuilder};
pub use entry::{EntryPoint, RequestFor};
pub use stages::authorization::authorize;
pub use stages::decode::{decode_parts, DecodedParts};
pub use stages::error_normalization::failure_response;
pub use stages::Stage;
