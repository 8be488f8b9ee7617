//! Metrics collection and exposition.
//!
//! # Metrics
//! - `wallet_accounts_created_total` (counter)
//! - `blockchain_rpc_requests_total` (counter): by method, outcome
//! - `blockchain_transfers_total` (counter): by outcome
//!
//! Without an installed exporter every call here is a no-op.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_account_created() {
    ::metrics::counter!("wallet_accounts_created_total").increment(1);
}

pub fn record_rpc(method: &'static str, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    ::metrics::counter!("blockchain_rpc_requests_total", "method" => method, "outcome" => outcome)
        .increment(1);
}

pub fn record_transfer(outcome: &'static str) {
    ::metrics::counter!("blockchain_transfers_total", "outcome" => outcome).increment(1);
}
