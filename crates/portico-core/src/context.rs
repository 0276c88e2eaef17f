//! Invocation context types.
//!
//! The [`InvocationContext`] carries per-invocation metadata from the hosting
//! platform into the pipeline and the wrapped handler.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant, SystemTime};
use uuid::Uuid;

/// A unique identifier for each invocation, using UUID v7.
///
/// UUID v7 is time-ordered, which keeps log correlation across invocations
/// sortable.
///
/// # Example
///
/// ```
/// use portico_core::InvocationId;
///
/// let id = InvocationId::new();
/// println!("Invocation: {}", id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvocationId(Uuid);

impl InvocationId {
    /// Creates a new unique invocation id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates an `InvocationId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for InvocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InvocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for InvocationId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Per-invocation metadata handed to the wrapped handler.
///
/// # Example
///
/// ```
/// use portico_core::InvocationContext;
///
/// let ctx = InvocationContext::new()
///     .with_aws_request_id("8476a536-e9f4-11e8-9739-2dfe598c3fcd")
///     .with_function_name("get-widget");
///
/// assert_eq!(ctx.function_name(), Some("get-widget"));
/// ```
#[derive(Debug, Clone)]
pub struct InvocationContext {
    invocation_id: InvocationId,
    aws_request_id: Option<String>,
    function_name: Option<String>,
    deadline: Option<SystemTime>,
    started_at: Instant,
}

impl InvocationContext {
    /// Creates a context with a fresh invocation id and no platform metadata.
    #[must_use]
    pub fn new() -> Self {
        Self {
            invocation_id: InvocationId::new(),
            aws_request_id: None,
            function_name: None,
            deadline: None,
            started_at: Instant::now(),
        }
    }

    /// Creates a mock context for testing purposes.
    #[must_use]
    pub fn mock() -> Self {
        Self::new().with_function_name("test-function")
    }

    /// Returns the invocation id.
    #[must_use]
    pub const fn invocation_id(&self) -> InvocationId {
        self.invocation_id
    }

    /// Returns the platform request id, if known.
    #[must_use]
    pub fn aws_request_id(&self) -> Option<&str> {
        self.aws_request_id.as_deref()
    }

    /// Returns a new context with the platform request id.
    #[must_use]
    pub fn with_aws_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.aws_request_id = Some(request_id.into());
        self
    }

    /// Returns the invoked function name, if known.
    #[must_use]
    pub fn function_name(&self) -> Option<&str> {
        self.function_name.as_deref()
    }

    /// Returns a new context with the function name.
    #[must_use]
    pub fn with_function_name(mut self, name: impl Into<String>) -> Self {
        self.function_name = Some(name.into());
        self
    }

    /// Returns the platform deadline, if known.
    #[must_use]
    pub const fn deadline(&self) -> Option<SystemTime> {
        self.deadline
    }

    /// Returns a new context with the platform deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: SystemTime) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns how long remains until the deadline.
    ///
    /// `None` when no deadline is known; zero once it has passed.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline.map(|deadline| {
            deadline
                .duration_since(SystemTime::now())
                .unwrap_or(Duration::ZERO)
        })
    }

    /// Returns the elapsed time since the invocation started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::new()
    }
}
