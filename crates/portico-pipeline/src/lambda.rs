//! AWS Lambda runtime glue.
//!
//! Enabled with the `lambda` feature.
//!
//! ```rust,ignore
//! use portico_pipeline::{lambda, EntryPoint};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lambda_runtime::Error> {
//!     lambda::run(EntryPoint::new(my_handler)).await
//! }
//! ```

use crate::entry::RequestFor;
use crate::EntryPoint;
use lambda_runtime::{service_fn, Context, Error, LambdaEvent};
use portico_core::{Handler, InvocationContext, ProxyEvent, Response};
use portico_extract::Shape;
use std::time::{Duration, UNIX_EPOCH};

/// Serves `entry` from the Lambda runtime until the runtime shuts down.
///
/// # Errors
///
/// Returns the runtime's error if it cannot reach the invocation API.
pub async fn run<H, PS, QS, BS, HS, CS>(
    entry: EntryPoint<H, PS, QS, BS, HS, CS>,
) -> Result<(), Error>
where
    PS: Shape,
    QS: Shape,
    BS: Shape,
    HS: Shape,
    CS: Shape,
    H: Handler<RequestFor<PS, QS, BS, HS, CS>>,
{
    lambda_runtime::run(service_fn(move |event: LambdaEvent<ProxyEvent>| {
        let entry = entry.clone();
        async move {
            let ctx = invocation_context(&event.context);
            Ok::<Response, Error>(entry.invoke(event.payload, ctx).await)
        }
    }))
    .await
}

/// Maps the runtime context into an [`InvocationContext`].
#[must_use]
pub fn invocation_context(context: &Context) -> InvocationContext {
    InvocationContext::new()
        .with_aws_request_id(context.request_id.clone())
        .with_function_name(context.env_config.function_name.clone())
        .with_deadline(UNIX_EPOCH + Duration::from_millis(context.deadline))
}
