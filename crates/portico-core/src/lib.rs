//! # Portico Core
//!
//! Core types for the Portico request adapter.
//!
//! This crate provides the foundational types used throughout Portico:
//!
//! - [`Failure`], [`HttpFailure`], [`Violations`] - The failure taxonomy and its status mapping
//! - [`IdentityClaims`] - Validated identity of an authenticated caller
//! - [`ProxyEvent`] / [`Response`] - Inbound event and outbound envelope
//! - [`DecodedRequest`] - The typed request handed to handlers
//! - [`InvocationContext`] - Per-invocation metadata
//! - [`Handler`] - Core handler trait
//! - [`render`] - Response body rendering

#![doc(html_root_url = "https://docs.rs/portico-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod claims;
mod context;
mod error;
mod event;
mod handler;
mod render;
mod request;

pub use claims::{parse_timestamp, IdentityClaims};
pub use context::{InvocationContext, InvocationId};
pub use error::{
    Failure, HttpFailure, InvalidStatusCode, PorticoResult, Violation, Violations,
    INCORRECT_PARAMETERS, INVALID_FORMAT, UNAUTHORIZED,
};
pub use event::{Authorizer, EventRequestContext, ProxyEvent, Response};
pub use handler::{handler_fn, FnHandler, Handler};
pub use render::{render, render_serializable};
pub use request::{DecodedRequest, Empty};
