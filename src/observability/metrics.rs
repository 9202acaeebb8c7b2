//! Metrics collection and exposition.
//!
//! # Metrics
//! - `employee_upstream_latency_seconds` (histogram): upstream call latency
//!   by operation and outcome
//! - `employee_upstream_calls_total` (counter): upstream calls by operation
//!   and outcome
//! - `employee_upstream_circuit_rejections_total` (counter): calls rejected
//!   while the circuit is open

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exposition endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record one upstream call. Emitted exactly once per operation invocation,
/// whatever the outcome.
pub fn record_upstream_call(operation: &'static str, outcome: &'static str, started: Instant) {
    histogram!(
        "employee_upstream_latency_seconds",
        "operation" => operation,
        "status" => outcome,
    )
    .record(started.elapsed().as_secs_f64());
    counter!(
        "employee_upstream_calls_total",
        "operation" => operation,
        "status" => outcome,
    )
    .increment(1);
}

/// Record a call rejected by the open circuit breaker.
pub fn record_circuit_rejection(operation: &'static str) {
    counter!(
        "employee_upstream_circuit_rejections_total",
        "operation" => operation,
    )
    .increment(1);
}
