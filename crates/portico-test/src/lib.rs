//! # Portico Test
//!
//! Test utilities for Portico entry points. Nothing here talks to a real
//! platform: events are built in memory and responses are captured by a
//! probe.
//!
//! ## Key Features
//!
//! - **Event Builder**: [`TestEvent`] builds proxy events fluently
//! - **Delivery Probe**: [`ResponseProbe`] counts how often a callback ran
//! - **Response Assertions**: [`TestResponse`] checks status, body and JSON
//!
//! ## Example
//!
//! ```
//! use portico_core::Response;
//! use portico_test::{ResponseProbe, TestEvent};
//!
//! let event = TestEvent::new().path_param("id", "42").build();
//! assert!(event.path_parameters.is_some());
//!
//! let probe = ResponseProbe::new();
//! (probe.callback())(Response::ok(r#"{"id":"42"}"#));
//!
//! probe
//!     .single()
//!     .unwrap()
//!     .assert_status(200)
//!     .assert_json(&serde_json::json!({"id": "42"}));
//! ```

#![doc(html_root_url = "https://docs.rs/portico-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod event;
mod probe;
mod response;

pub use error::TestError;
pub use event::{valid_claims, TestEvent, TEST_ISSUED_AT, TEST_USER_ID};
pub use probe::ResponseProbe;
pub use response::TestResponse;
