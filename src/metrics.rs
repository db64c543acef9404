//! Metrics hooks for the simulation engine.
//!
//! Recorders are the host's concern; the engine only emits. Without an
//! installed recorder these calls are no-ops.

use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

/// Order submit latency metric name.
pub const METRIC_ORDER_SUBMIT_LATENCY: &str = "order_submit_latency_us";
/// Orders submitted counter metric name.
pub const METRIC_ORDERS_SUBMITTED: &str = "orders_submitted_total";
/// Orders rejected counter metric name.
pub const METRIC_ORDERS_REJECTED: &str = "orders_rejected_total";
/// Simulated matches counter metric name.
pub const METRIC_MATCHES: &str = "matches_total";
/// Book refresh counter metric name.
pub const METRIC_BOOK_REFRESHES: &str = "book_refreshes_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_ORDER_SUBMIT_LATENCY,
        "Order submit latency in microseconds (simulated or measured)"
    );
    describe_counter!(METRIC_ORDERS_SUBMITTED, "Total number of orders recorded");
    describe_counter!(
        METRIC_ORDERS_REJECTED,
        "Total number of structurally invalid orders rejected"
    );
    describe_counter!(METRIC_MATCHES, "Total number of simulated matches");
    describe_counter!(METRIC_BOOK_REFRESHES, "Total number of book refreshes");

    debug!("Metrics initialized");
}

/// Record order submit latency.
pub fn record_submit_latency(latency: Duration) {
    histogram!(METRIC_ORDER_SUBMIT_LATENCY).record(latency.as_secs_f64() * 1_000_000.0);
}

/// Increment the orders submitted counter.
pub fn inc_orders_submitted() {
    counter!(METRIC_ORDERS_SUBMITTED).increment(1);
}

/// Increment the orders rejected counter.
pub fn inc_orders_rejected() {
    counter!(METRIC_ORDERS_REJECTED).increment(1);
}

/// Add simulated matches to the match counter.
pub fn add_matches(count: u64) {
    counter!(METRIC_MATCHES).increment(count);
}

/// Increment the book refresh counter.
pub fn inc_book_refreshes() {
    counter!(METRIC_BOOK_REFRESHES).increment(1);
}
