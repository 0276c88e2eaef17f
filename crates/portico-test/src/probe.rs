//! Response delivery probe.

use crate::error::TestError;
use crate::response::TestResponse;
use portico_core::Response;
use std::sync::{Arc, Mutex, MutexGuard};

/// Records every response handed to its callbacks.
///
/// Use it to check that an entry point delivers exactly one response.
///
/// # Example
///
/// ```
/// use portico_core::Response;
/// use portico_test::ResponseProbe;
///
/// let probe = ResponseProbe::new();
/// let callback = probe.callback();
/// callback(Response::ok("done"));
///
/// assert_eq!(probe.count(), 1);
/// probe.single().unwrap().assert_status(200).assert_body("done");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResponseProbe {
    deliveries: Arc<Mutex<Vec<Response>>>,
}

impl ResponseProbe {
    /// Creates an empty probe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a callback that records the response it receives.
    pub fn callback(&self) -> impl FnOnce(Response) + Send + 'static {
        let deliveries = Arc::clone(&self.deliveries);
        move |response| lock(&deliveries).push(response)
    }

    /// Number of responses delivered so far.
    #[must_use]
    pub fn count(&self) -> usize {
        lock(&self.deliveries).len()
    }

    /// All delivered responses, in delivery order.
    #[must_use]
    pub fn responses(&self) -> Vec<Response> {
        lock(&self.deliveries).clone()
    }

    /// Returns the only delivered response.
    ///
    /// # Errors
    ///
    /// Fails if nothing, or more than one response, was delivered.
    pub fn single(&self) -> Result<TestResponse, TestError> {
        let deliveries = lock(&self.deliveries);
        match deliveries.as_slice() {
            [] => Err(TestError::NoResponse),
            [response] => Ok(TestResponse::from(response.clone())),
            many => Err(TestError::MultipleResponses(many.len())),
        }
    }
}

// A panicking test thread must not hide earlier deliveries.
fn lock(deliveries: &Mutex<Vec<Response>>) -> MutexGuard<'_, Vec<Response>> {
    deliveries
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
