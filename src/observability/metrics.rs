//! Metrics collection and exposition.
//!
//! # Metrics
//! - `redirect_requests_total` (counter): requests seen, by disposition
//! - `redirect_rule_matches_total` (counter): redirects issued, by rule and status
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op
//! - Prometheus endpoint only when enabled in config

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter")
        }
    }
}

/// Count one request and how the pipeline disposed of it.
pub fn record_request(disposition: &'static str) {
    metrics::counter!("redirect_requests_total", "disposition" => disposition).increment(1);
}

/// Count a redirect issued by `rule`.
pub fn record_rule_match(rule: &'static str, status: u16) {
    metrics::counter!(
        "redirect_rule_matches_total",
        "rule" => rule,
        "status" => status.to_string()
    )
    .increment(1);
}
