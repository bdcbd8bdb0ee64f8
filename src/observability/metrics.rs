//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): relay attempts by route, outcome
//! - `relay_request_duration_seconds` (histogram): end-to-end relay latency
//! - `relay_upstream_duration_seconds` (histogram): outbound call latency
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the end of one relay attempt.
pub fn record_relay(route: &'static str, outcome: &'static str, start: Instant) {
    counter!("relay_requests_total", "route" => route, "outcome" => outcome).increment(1);
    histogram!("relay_request_duration_seconds", "route" => route).record(start.elapsed().as_secs_f64());
}

/// Record the latency of one outbound call.
pub fn record_upstream(route: &'static str, start: Instant) {
    histogram!("relay_upstream_duration_seconds", "route" => route).record(start.elapsed().as_secs_f64());
}
