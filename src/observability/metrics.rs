//! Metrics collection and exposition.
//!
//! # Metrics
//! - `sheet_proxy_requests_total` (counter): requests by status
//! - `sheet_proxy_request_duration_seconds` (histogram): latency distribution
//! - `sheet_proxy_transforms_total` (counter): transforms by stage
//! - `sheet_proxy_rows` (histogram): rows left after each stage

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed inbound request.
pub fn record_request(status: u16, start: Instant) {
    counter!("sheet_proxy_requests_total", "status" => status.to_string()).increment(1);
    histogram!("sheet_proxy_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record one pipeline stage and the rows it left.
pub fn record_transform(stage: &'static str, rows: usize) {
    counter!("sheet_proxy_transforms_total", "stage" => stage).increment(1);
    histogram!("sheet_proxy_rows", "stage" => stage).record(rows as f64);
}
