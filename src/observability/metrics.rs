//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): dispatched requests by method,
//!   status, upstream
//! - `gateway_request_duration_seconds` (histogram): dispatch latency
//! - `gateway_auth_outcomes_total` (counter): gate decisions by outcome
//!   (open, allowed, or a rejection kind)
//!
//! # Design Decisions
//! - Low-overhead updates (atomic operations in the metrics registry)
//! - Recording works with or without the exporter installed
//! - Outcome labels never carry credential material

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => {
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

/// Record one dispatched request.
pub fn record_request(method: &str, status: u16, upstream: &str, start_time: Instant) {
    counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "upstream" => upstream.to_string()
    )
    .increment(1);
    histogram!(
        "gateway_request_duration_seconds",
        "method" => method.to_string(),
        "upstream" => upstream.to_string()
    )
    .record(start_time.elapsed().as_secs_f64());
}

/// Record one authorization gate decision.
pub fn record_gate_outcome(outcome: &'static str) {
    counter!("gateway_auth_outcomes_total", "outcome" => outcome).increment(1);
}
