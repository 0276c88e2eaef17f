//! Invocation metrics.
//!
//! Metrics are recorded through the `metrics` facade. Portico never installs
//! an exporter; the host process decides where metrics go. Without a recorder
//! every call here is a no-op, and [`init_metrics`] with `enabled: false`
//! turns recording off for the whole process.
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `portico_invocations_total` | Counter | `status` | Completed invocations |
//! | `portico_invocation_duration_seconds` | Histogram | - | Invocation latency |
//! | `portico_in_flight_invocations` | Gauge | - | Invocations being processed |
//! | `portico_validation_failures_total` | Counter | `part` | Rejected request parts |
//! | `portico_unauthorized_total` | Counter | - | Authorization gate rejections |

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;
use std::time::Duration;

/// Invocation counter name.
pub const INVOCATIONS_TOTAL: &str = "portico_invocations_total";
/// Invocation latency histogram name.
pub const INVOCATION_DURATION_SECONDS: &str = "portico_invocation_duration_seconds";
/// In-flight gauge name.
pub const IN_FLIGHT_INVOCATIONS: &str = "portico_in_flight_invocations";
/// Validation failure counter name.
pub const VALIDATION_FAILURES_TOTAL: &str = "portico_validation_failures_total";
/// Authorization rejection counter name.
pub const UNAUTHORIZED_TOTAL: &str = "portico_unauthorized_total";

static ENABLED: AtomicBool = AtomicBool::new(true);

/// Metrics configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsConfig {
    /// Whether metrics are recorded.
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Switches recording on or off and registers metric descriptions.
///
/// Call after the host has installed its recorder. Safe to call repeatedly;
/// the last call decides whether metrics are recorded.
pub fn init_metrics(config: &MetricsConfig) {
    static DESCRIBED: Once = Once::new();

    ENABLED.store(config.enabled, Ordering::Relaxed);
    if config.enabled {
        DESCRIBED.call_once(register_metric_descriptions);
    }
}

/// Whether the `record_*` functions currently emit anything.
#[must_use]
pub fn metrics_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

fn register_metric_descriptions() {
    describe_counter!(INVOCATIONS_TOTAL, "Total number of completed invocations");
    describe_histogram!(
        INVOCATION_DURATION_SECONDS,
        "Invocation duration in seconds"
    );
    describe_gauge!(
        IN_FLIGHT_INVOCATIONS,
        "Number of invocations currently being processed"
    );
    describe_counter!(
        VALIDATION_FAILURES_TOTAL,
        "Total request parts rejected during decoding"
    );
    describe_counter!(
        UNAUTHORIZED_TOTAL,
        "Total invocations rejected by the authorization gate"
    );
}

/// Records a completed invocation.
pub fn record_invocation(status_code: u16, duration: Duration) {
    if !metrics_enabled() {
        return;
    }
    counter!(INVOCATIONS_TOTAL, "status" => status_code.to_string()).increment(1);
    histogram!(INVOCATION_DURATION_SECONDS).record(duration.as_secs_f64());
}

/// Records a rejected request part (`path`, `query`, `body`, `headers` or `claims`).
pub fn record_validation_failure(part: &'static str) {
    if !metrics_enabled() {
        return;
    }
    counter!(VALIDATION_FAILURES_TOTAL, "part" => part).increment(1);
}

/// Records an authorization gate rejection.
pub fn record_unauthorized() {
    if !metrics_enabled() {
        return;
    }
    counter!(UNAUTHORIZED_TOTAL).increment(1);
}

/// Guard that tracks an in-flight invocation until dropped.
///
/// The gauge is only touched when metrics were enabled at creation, so a
/// guard always decrements what it incremented.
#[derive(Debug)]
pub struct InFlightGuard {
    counted: bool,
}

impl InFlightGuard {
    /// Increments the in-flight gauge.
    #[must_use]
    pub fn new() -> Self {
        let counted = metrics_enabled();
        if counted {
            gauge!(IN_FLIGHT_INVOCATIONS).increment(1.0);
        }
        Self { counted }
    }
}

impl Default for InFlightGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if self.counted {
            gauge!(IN_FLIGHT_INVOCATIONS).decrement(1.0);
        }
    }
}

/// Serializes tests that flip the process-wide recording switch.
#[cfg(test)]
pub(crate) fn switch_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
