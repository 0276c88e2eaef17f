//! The entry point wrapping a handler.

use crate::stages::authorization::authorize;
use crate::stages::decode::{decode_parts, DecodedParts};
use crate::stages::error_normalization::failure_response;
use crate::stages::Stage;
use crate::EntryConfig;
use futures_util::FutureExt;
use portico_core::{
    render, DecodedRequest, Failure, Handler, InvocationContext, ProxyEvent, Response,
};
use portico_extract::{Accept, ClaimsShape, Shape};
use portico_telemetry::{log_invocation_complete, log_invocation_error};
use portico_telemetry::metrics::{record_invocation, InFlightGuard};
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// The request type a handler receives for a given set of shapes.
pub type RequestFor<PS, QS, BS, HS, CS> = DecodedRequest<
    <PS as Shape>::Output,
    <QS as Shape>::Output,
    <BS as Shape>::Output,
    <HS as Shape>::Output,
    <CS as Shape>::Output,
>;

struct Inner<H, PS, QS, BS, HS, CS> {
    config: EntryConfig<PS, QS, BS, HS, CS>,
    handler: H,
}

/// A handler wrapped in the adaptation pipeline.
///
/// Cloning is cheap; clones share the configuration and the handler.
///
/// # Example
///
/// ```rust
/// use portico_core::{handler_fn, DecodedRequest, Failure, InvocationContext, ProxyEvent};
/// use portico_pipeline::EntryPoint;
/// use std::sync::Arc;
///
/// # tokio_test::block_on(async {
/// let entry = EntryPoint::new(handler_fn(
///     |_req: DecodedRequest, _event: Arc<ProxyEvent>, _ctx: InvocationContext| async {
///         Ok::<_, Failure>("ok")
///     },
/// ));
///
/// let response = entry.invoke(ProxyEvent::default(), InvocationContext::mock()).await;
/// assert_eq!(response.status_code, 200);
/// assert_eq!(response.body, "ok");
/// # });
/// ```
pub struct EntryPoint<H, PS = Accept, QS = Accept, BS = Accept, HS = Accept, CS = ClaimsShape> {
    inner: Arc<Inner<H, PS, QS, BS, HS, CS>>,
}

impl<H, PS, QS, BS, HS, CS> Clone for EntryPoint<H, PS, QS, BS, HS, CS> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H> EntryPoint<H>
where
    H: Handler<DecodedRequest>,
{
    /// Wraps a handler with the default configuration.
    pub fn new(handler: H) -> Self {
        Self::with_config(EntryConfig::default(), handler)
    }
}

impl<H, PS, QS, BS, HS, CS> EntryPoint<H, PS, QS, BS, HS, CS>
where
    PS: Shape,
    QS: Shape,
    BS: Shape,
    HS: Shape,
    CS: Shape,
    H: Handler<RequestFor<PS, QS, BS, HS, CS>>,
{
    /// Wraps a handler with an explicit configuration.
    pub fn with_config(config: EntryConfig<PS, QS, BS, HS, CS>, handler: H) -> Self {
        Self {
            inner: Arc::new(Inner { config, handler }),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &EntryConfig<PS, QS, BS, HS, CS> {
        &self.inner.config
    }

    /// Runs the pipeline for one event.
    ///
    /// Never fails: every outcome, including a handler panic, becomes a
    /// status-coded response.
    pub async fn invoke(&self, event: ProxyEvent, ctx: InvocationContext) -> Response {
        let aws_request_id = ctx
            .aws_request_id()
            .or_else(|| event.request_id())
            .unwrap_or_default()
            .to_string();
        let span = tracing::info_span!(
            "invocation",
            invocation_id = %ctx.invocation_id(),
            aws_request_id = %aws_request_id,
        );
        self.run(event, ctx).instrument(span).await
    }

    /// Runs the pipeline and hands the response to `callback`.
    ///
    /// The callback is called exactly once.
    pub async fn handle<F>(&self, event: ProxyEvent, ctx: InvocationContext, callback: F)
    where
        F: FnOnce(Response),
    {
        callback(self.invoke(event, ctx).await);
    }

    /// Runs the pipeline for an event that has not been deserialized yet.
    ///
    /// An event that does not have the proxy event shape is answered with an
    /// unclassified failure.
    pub async fn invoke_value(&self, event: Value, ctx: InvocationContext) -> Response {
        match serde_json::from_value::<ProxyEvent>(event) {
            Ok(event) => self.invoke(event, ctx).await,
            Err(err) => {
                tracing::error!(error = %err, "Event is not a proxy event");
                failure_response(&Failure::unclassified(err))
            }
        }
    }

    async fn run(&self, event: ProxyEvent, ctx: InvocationContext) -> Response {
        let _in_flight = InFlightGuard::new();
        let started = Instant::now();
        let invocation_id = ctx.invocation_id();

        let response = match self.dispatch(event, ctx).await {
            Ok(value) => Response::ok(render(&value)),
            Err(failure) => failure_response(&failure),
        };

        let elapsed = started.elapsed();
        record_invocation(response.status_code, elapsed);
        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        log_invocation_complete!(invocation_id, response.status_code, duration_ms);
        response
    }

    async fn dispatch(&self, event: ProxyEvent, ctx: InvocationContext) -> Result<Value, Failure> {
        let config = &self.inner.config;
        let DecodedParts {
            path,
            query,
            body,
            headers,
            claims,
        } = decode_parts(config, &event);

        authorize(config.claims_required, claims.as_ref())?;

        let request = DecodedRequest {
            path: path?,
            query: query?,
            body: body?,
            headers: headers?,
            claims: claims.transpose()?,
        };

        tracing::debug!(stage = Stage::Handler.name(), "Invoking handler");
        let invocation_id = ctx.invocation_id();
        let event = Arc::new(event);
        let handler = &self.inner.handler;
        let outcome = AssertUnwindSafe(async move { handler.handle(request, event, ctx).await })
            .catch_unwind()
            .await;

        let output = match outcome {
            Ok(result) => result?,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                log_invocation_error!(invocation_id, format!("handler panicked: {message}"));
                return Err(Failure::msg(message));
            }
        };

        tracing::debug!(stage = Stage::Response.name(), "Rendering handler output");
        serde_json::to_value(output).map_err(Failure::unclassified)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_core::{handler_fn, HttpFailure};

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned boom"));
        assert_eq!(panic_message(payload.as_ref()), "owned boom");

        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(payload.as_ref()), "handler panicked");
    }

    #[tokio::test]
    async fn test_invoke_default_entry() {
        let entry = EntryPoint::new(handler_fn(
            |_req: DecodedRequest, _event: Arc<ProxyEvent>, _ctx: InvocationContext| async {
                Ok::<_, Failure>(serde_json::json!({"a": 1}))
            },
        ));
        let response = entry
            .invoke(ProxyEvent::default(), InvocationContext::mock())
            .await;
        assert_eq!(response, Response::new(200, r#"{"a":1}"#));
    }

    #[tokio::test]
    async fn test_clones_share_the_handler() {
        let entry = EntryPoint::new(handler_fn(
            |_req: DecodedRequest, _event: Arc<ProxyEvent>, _ctx: InvocationContext| async {
                Err::<(), _>(Failure::from(HttpFailure::not_found("Widget", "1")))
            },
        ));
        let clone = entry.clone();
        let response = clone
            .invoke(ProxyEvent::default(), InvocationContext::mock())
            .await;
        assert_eq!(response.status_code, 404);
    }

    #[tokio::test]
    async fn test_invoke_value_rejects_malformed_events() {
        let entry = EntryPoint::new(handler_fn(
            |_req: DecodedRequest, _event: Arc<ProxyEvent>, _ctx: InvocationContext| async {
                Ok::<_, Failure>("ok")
            },
        ));
        let response = entry
            .invoke_value(serde_json::json!({"body": 12}), InvocationContext::mock())
            .await;
        assert_eq!(response.status_code, 500);

        let response = entry
            .invoke_value(serde_json::json!({"body": null}), InvocationContext::mock())
            .await;
        assert_eq!(response.body, "ok");
    }
}
