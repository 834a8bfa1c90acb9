//! Metrics collection and exposition.
//!
//! # Metrics
//! - `inspector_requests_total` (counter): requests by method, status, scope
//! - `inspector_request_duration_seconds` (histogram): latency by scope
//! - `inspector_authorization_total` (counter): authorization outcomes
//! - `inspector_cache_events` (gauge): events held by the cache, by kind
//!
//! Without an installed recorder every call is a no-op.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(method: &str, status: u16, scope: &'static str, start: Instant) {
    counter!(
        "inspector_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "scope" => scope
    )
    .increment(1);
    histogram!("inspector_request_duration_seconds", "scope" => scope)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_authorization(allowed: bool) {
    let outcome = if allowed { "allowed" } else { "denied" };
    counter!("inspector_authorization_total", "outcome" => outcome).increment(1);
}

pub fn record_cache_size(kind: &'static str, size: usize) {
    gauge!("inspector_cache_events", "kind" => kind).set(size as f64);
}
