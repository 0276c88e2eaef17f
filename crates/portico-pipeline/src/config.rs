//! Entry point configuration.
//!
//! An [`EntryConfig`] declares one [`Shape`] per request part plus the
//! authorization and body-size settings. It is immutable once built and is
//! shared read-only across concurrent invocations.

use portico_config::{AdapterSettings, DEFAULT_MAX_BODY_BYTES};
use portico_extract::{Accept, ClaimsShape, Shape};

/// Shapes and settings for an [`EntryPoint`](crate::EntryPoint).
///
/// Every part defaults to [`Accept`]; claims default to [`ClaimsShape`].
///
/// # Example
///
/// ```rust
/// use portico_extract::{Json, Params, Validate};
/// use portico_pipeline::EntryConfig;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct WidgetPath {
///     id: String,
/// }
/// impl Validate for WidgetPath {}
///
/// #[derive(Deserialize)]
/// struct RenameWidget {
///     name: String,
/// }
/// impl Validate for RenameWidget {}
///
/// let config = EntryConfig::builder()
///     .path(Params::<WidgetPath>::path())
///     .body(Json::<RenameWidget>::new())
///     .claims_required(true)
///     .build();
///
/// assert!(config.claims_required());
/// ```
#[derive(Debug, Clone)]
pub struct EntryConfig<PS = Accept, QS = Accept, BS = Accept, HS = Accept, CS = ClaimsShape> {
    pub(crate) path: PS,
    pub(crate) query: QS,
    pub(crate) body: BS,
    pub(crate) headers: HS,
    pub(crate) claims: CS,
    pub(crate) claims_required: bool,
    pub(crate) max_body_bytes: usize,
}

impl EntryConfig {
    /// Creates a builder with every part set to [`Accept`].
    #[must_use]
    pub fn builder() -> EntryConfigBuilder {
        EntryConfigBuilder::new()
    }
}

impl Default for EntryConfig {
    fn default() -> Self {
        EntryConfigBuilder::new().build()
    }
}

impl<PS, QS, BS, HS, CS> EntryConfig<PS, QS, BS, HS, CS> {
    /// Whether invocations without valid claims are rejected with 401.
    #[must_use]
    pub const fn claims_required(&self) -> bool {
        self.claims_required
    }

    /// Largest accepted body, in bytes.
    #[must_use]
    pub const fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }
}

/// Builder for [`EntryConfig`].
///
/// Setting a shape changes the builder's type, so the decoded request type
/// follows the declared shapes.
#[derive(Debug, Clone)]
pub struct EntryConfigBuilder<PS = Accept, QS = Accept, BS = Accept, HS = Accept, CS = ClaimsShape>
{
    path: PS,
    query: QS,
    body: BS,
    headers: HS,
    claims: CS,
    claims_required: bool,
    max_body_bytes: usize,
}

impl EntryConfigBuilder {
    /// Creates a builder with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: Accept,
            query: Accept,
            body: Accept,
            headers: Accept,
            claims: ClaimsShape::default(),
            claims_required: false,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Default for EntryConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<PS, QS, BS, HS, CS> EntryConfigBuilder<PS, QS, BS, HS, CS> {
    /// Sets the path parameter shape.
    pub fn path<S: Shape>(self, shape: S) -> EntryConfigBuilder<S, QS, BS, HS, CS> {
        EntryConfigBuilder {
            path: shape,
            query: self.query,
            body: self.body,
            headers: self.headers,
            claims: self.claims,
            claims_required: self.claims_required,
            max_body_bytes: self.max_body_bytes,
        }
    }

    /// Sets the query parameter shape.
    pub fn query<S: Shape>(self, shape: S) -> EntryConfigBuilder<PS, S, BS, HS, CS> {
        EntryConfigBuilder {
            path: self.path,
            query: shape,
            body: self.body,
            headers: self.headers,
            claims: self.claims,
            claims_required: self.claims_required,
            max_body_bytes: self.max_body_bytes,
        }
    }

    /// Sets the body shape.
    pub fn body<S: Shape>(self, shape: S) -> EntryConfigBuilder<PS, QS, S, HS, CS> {
        EntryConfigBuilder {
            path: self.path,
            query: self.query,
            body: shape,
            headers: self.headers,
            claims: self.claims,
            claims_required: self.claims_required,
            max_body_bytes: self.max_body_bytes,
        }
    }

    /// Sets the header shape.
    pub fn headers<S: Shape>(self, shape: S) -> EntryConfigBuilder<PS, QS, BS, S, CS> {
        EntryConfigBuilder {
            path: self.path,
            query: self.query,
            body: self.body,
            headers: shape,
            claims: self.claims,
            claims_required: self.claims_required,
            max_body_bytes: self.max_body_bytes,
        }
    }

    /// Replaces the claims shape.
    pub fn claims<S: Shape>(self, shape: S) -> EntryConfigBuilder<PS, QS, BS, HS, S> {
        EntryConfigBuilder {
            path: self.path,
            query: self.query,
            body: self.body,
            headers: self.headers,
            claims: shape,
            claims_required: self.claims_required,
            max_body_bytes: self.max_body_bytes,
        }
    }

    /// Requires valid claims on every invocation.
    pub fn claims_required(mut self, required: bool) -> Self {
        self.claims_required = required;
        self
    }

    /// Sets the body size limit.
    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Applies loaded adapter settings.
    pub fn settings(mut self, settings: &AdapterSettings) -> Self {
        self.claims_required = settings.claims_required;
        self.max_body_bytes = settings.max_body_bytes;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> EntryConfig<PS, QS, BS, HS, CS> {
        EntryConfig {
            path: self.path,
            query: self.query,
            body: self.body,
            headers: self.headers,
            claims: self.claims,
            claims_required: self.claims_required,
            max_body_bytes: self.max_body_bytes,
        }
    }
}
