//! Prometheus metrics for the directory server.
//!
//! When no exporter is installed every recording function is a no-op.
//!
//! # Metrics
//!
//! - `http_requests_total{method,status}` and `http_request_duration_ms{method}`
//! - `directory_sites`, `directory_tournaments`, `directory_registrations`
//! - `registration_attempts_total{outcome}`

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tournament_directory::DirectoryStats;

/// Initialize Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

// ============================================================================
// HTTP Metrics
// ============================================================================

/// Record HTTP request.
pub fn http_requests_total(method: &str, status: u16) {
    metrics::counter!("http_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record HTTP request duration in milliseconds.
pub fn http_request_duration_ms(method: &str, duration_ms: f64) {
    metrics::histogram!("http_request_duration_ms",
        "method" => method.to_string()
    )
    .record(duration_ms);
}

// ============================================================================
// Directory Metrics
// ============================================================================

/// Publish collection sizes.
pub fn directory_size(stats: DirectoryStats) {
    metrics::gauge!("directory_sites").set(stats.sites as f64);
    metrics::gauge!("directory_tournaments").set(stats.tournaments as f64);
    metrics::gauge!("directory_registrations").set(stats.registrations as f64);
}

/// Count a registration attempt by outcome (`ok` or an error kind).
pub fn registration_attempts_total(outcome: &str) {
    metrics::counter!("registration_attempts_total",
        "outcome" => outcome.to_string()
    )
    .increment(1);
}
