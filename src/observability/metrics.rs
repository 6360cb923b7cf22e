//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define gateway metrics (requests, latency, upstream calls, fallbacks)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `gateway_requests_total` (counter): inbound requests by method, route, status
//! - `gateway_request_duration_seconds` (histogram): inbound latency
//! - `gateway_upstream_calls_total` (counter): upstream calls by operation, outcome
//! - `gateway_upstream_duration_seconds` (histogram): upstream latency
//! - `gateway_fallback_total` (counter): reads served from the fallback dataset
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder};

const LATENCY_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 15.0, 30.0];

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .set_buckets_for_metric(Matcher::Suffix("duration_seconds".to_string()), LATENCY_BUCKETS)?
        .install()?;

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a completed inbound request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let method = method.to_string();
    let route = route.to_string();

    ::metrics::counter!(
        "gateway_requests_total",
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => status.to_string()
    )
    .increment(1);

    ::metrics::histogram!(
        "gateway_request_duration_seconds",
        "method" => method,
        "route" => route
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record an upstream call and how it ended.
pub fn record_upstream_call(operation: &'static str, outcome: &'static str, start: Instant) {
    ::metrics::counter!(
        "gateway_upstream_calls_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);

    ::metrics::histogram!("gateway_upstream_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}

/// Record a read answered from the fallback dataset.
pub fn record_fallback(operation: &'static str) {
    ::metrics::counter!("gateway_fallback_total", "operation" => operation).increment(1);
}
