//! Handler trait for wrapped business logic.
//!
//! The [`Handler`] trait defines what the pipeline invokes once a request has
//! been fully decoded.

use crate::{Failure, InvocationContext, ProxyEvent};
use serde::Serialize;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

/// A handler for fully decoded requests.
///
/// Handlers receive the decoded request, the raw event it came from, and the
/// invocation context. They return a serializable value or a [`Failure`].
///
/// # Example
///
/// ```rust
/// use portico_core::{DecodedRequest, Failure, Handler, HttpFailure, InvocationContext, ProxyEvent};
/// use std::sync::Arc;
///
/// struct GetWidget;
///
/// impl Handler<DecodedRequest> for GetWidget {
///     type Output = String;
///
///     async fn handle(
///         &self,
///         request: DecodedRequest,
///         _event: Arc<ProxyEvent>,
///         _ctx: InvocationContext,
///     ) -> Result<String, Failure> {
///         match request.claims {
///             Some(claims) => Ok(format!("hello {}", claims.username())),
///             None => Err(HttpFailure::unauthorized().into()),
///         }
///     }
/// }
/// ```
pub trait Handler<Req>: Send + Sync + 'static
where
    Req: Send + 'static,
{
    /// The success value; rendered into the 200 response body.
    type Output: Serialize + Send + 'static;

    /// Handles a decoded request.
    fn handle(
        &self,
        request: Req,
        event: Arc<ProxyEvent>,
        ctx: InvocationContext,
    ) -> impl Future<Output = Result<Self::Output, Failure>> + Send;
}

/// A function-based handler wrapper.
///
/// This allows using async closures directly as handlers. See [`handler_fn`].
pub struct FnHandler<F, Req, Res, Fut> {
    func: F,
    _phantom: PhantomData<fn(Req) -> (Res, Fut)>,
}

impl<F, Req, Res, Fut> FnHandler<F, Req, Res, Fut>
where
    F: Fn(Req, Arc<ProxyEvent>, InvocationContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Res, Failure>> + Send + 'static,
    Req: Send + 'static,
    Res: Serialize + Send + 'static,
{
    /// Creates a new function-based handler.
    #[must_use]
    pub const fn new(func: F) -> Self {
        Self {
            func,
            _phantom: PhantomData,
        }
    }
}

impl<F, Req, Res, Fut> Handler<Req> for FnHandler<F, Req, Res, Fut>
where
    F: Fn(Req, Arc<ProxyEvent>, InvocationContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Res, Failure>> + Send + 'static,
    Req: Send + 'static,
    Res: Serialize + Send + 'static,
{
    type Output = Res;

    fn handle(
        &self,
        request: Req,
        event: Arc<ProxyEvent>,
        ctx: InvocationContext,
    ) -> impl Future<Output = Result<Res, Failure>> + Send {
        (self.func)(request, event, ctx)
    }
}

/// Wraps an async function as a [`Handler`].
///
/// # Example
///
/// ```rust
/// use portico_core::{handler_fn, DecodedRequest, Failure};
///
/// let handler = handler_fn(|_req: DecodedRequest, _event, _ctx| async move {
///     Ok::<_, Failure>("ok")
/// });
/// # let _ = handler;
/// ```
pub const fn handler_fn<F, Req, Res, Fut>(func: F) -> FnHandler<F, Req, Res, Fut>
where
    F: Fn(Req, Arc<ProxyEvent>, InvocationContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Res, Failure>> + Send + 'static,
    Req: Send + 'static,
    Res: Serialize + Send + 'static,
{
    FnHandler::new(func)
}
