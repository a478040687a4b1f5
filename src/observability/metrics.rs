//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gate_admissions_total` (counter): admission checks by outcome
//! - `gate_validation_failures_total` (counter): rejections by reason
//! - `gate_auth_attempts_total` (counter): login attempts by outcome
//! - `gate_sessions_evicted_total` (counter): idle sessions swept
//!
//! # Design Decisions
//! - Low-overhead counter updates, labels with small fixed cardinality
//! - Recording is safe before the exporter is installed (no-op)

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record an admission check outcome ("admitted" or "rate_limited").
pub fn record_admission(outcome: &'static str) {
    counter!("gate_admissions_total", "outcome" => outcome).increment(1);
}

/// Record a validation rejection by reason.
pub fn record_validation_failure(reason: &'static str) {
    counter!("gate_validation_failures_total", "reason" => reason).increment(1);
}

/// Record a login attempt outcome ("success" or "failure").
pub fn record_auth(outcome: &'static str) {
    counter!("gate_auth_attempts_total", "outcome" => outcome).increment(1);
}

/// Record idle sessions removed by the sweeper.
pub fn record_sessions_evicted(count: usize) {
    counter!("gate_sessions_evicted_total").increment(count as u64);
}
