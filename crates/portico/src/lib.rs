//! # Portico
//!
//! Request adaptation for event-driven HTTP handlers.
//!
//! Portico sits between a platform-delivered proxy event and a business
//! handler. It decodes and validates every request part against declared
//! shapes, enforces that a verified identity is present when required, calls
//! the handler with a typed request and turns the outcome into a uniform
//! `{statusCode, body}` response.
//!
//! ## Quick Start
//!
//! ```rust
//! use portico::prelude::*;
//! use serde::Deserialize;
//! use std::sync::Arc;
//!
//! #[derive(Deserialize)]
//! struct WidgetPath {
//!     id: String,
//! }
//! impl Validate for WidgetPath {}
//!
//! async fn get_widget(
//!     req: DecodedRequest<WidgetPath, Empty, Empty, Empty>,
//!     _event: Arc<ProxyEvent>,
//!     _ctx: InvocationContext,
//! ) -> Result<String, Failure> {
//!     if req.path.id == "42" {
//!         Ok("gear".to_string())
//!     } else {
//!         Err(HttpFailure::not_found("Widget", req.path.id).into())
//!     }
//! }
//!
//! let entry = EntryPoint::with_config(
//!     EntryConfig::builder().path(Params::<WidgetPath>::path()).build(),
//!     handler_fn(get_widget),
//! );
//!
//! # tokio_test::block_on(async {
//! let mut event = ProxyEvent::default();
//! event.path_parameters = Some([("id".to_string(), "7".to_string())].into());
//!
//! let response = entry.invoke(event, InvocationContext::new()).await;
//! assert_eq!(response.status_code, 404);
//! # });
//! ```
//!
//! ## Architecture
//!
//! Every invocation runs the same fixed pipeline:
//!
//! ```text
//! ProxyEvent → Decode (path, query, body, headers, claims) → Authorization
//!                                                               ↓
//! Response ←──────────── Classification ←────────────────── Handler
//! ```

#![doc(html_root_url = "https://docs.rs/portico/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use portico_core as core;

// Re-export shapes
pub use portico_extract as extract;

// Re-export the pipeline
pub use portico_pipeline as pipeline;

// Re-export telemetry
pub use portico_telemetry as telemetry;

// Re-export configuration
pub use portico_config as config;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use portico::prelude::*;
///
/// let config = EntryConfig::builder().claims_required(true).build();
/// assert!(config.claims_required());
/// ```
pub mod prelude {
    pub use portico_core::{
        handler_fn, DecodedRequest, Empty, Failure, Handler, HttpFailure, IdentityClaims,
        InvocationContext, ProxyEvent, Response, Violation, Violations,
    };

    // Shapes and validation
    pub use portico_extract::{
        Accept, Checks, ClaimsShape, FieldMap, Json, Params, Renamed, Shape, Validate,
    };

    // Pipeline
    pub use portico_pipeline::{EntryConfig, EntryPoint};

    // Ambient setup
    pub use portico_config::{ConfigLoader, PorticoConfig};
    pub use portico_telemetry::{init_telemetry, TelemetryConfig};
}
