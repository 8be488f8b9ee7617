//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges and URL shapes.
//! Every problem is reported, not just the first one.

use std::fmt;
use std::net::SocketAddr;

use crate::blockchain::types::parse_wei;
use crate::config::schema::DemoConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &DemoConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let chain = &config.blockchain;

    if chain.rpc_url.trim().is_empty() {
        errors.push(ValidationError::new("blockchain.rpc_url", "must not be empty"));
    } else if let Err(e) = url::Url::parse(&chain.rpc_url) {
        errors.push(ValidationError::new(
            "blockchain.rpc_url",
            format!("invalid URL '{}': {}", chain.rpc_url, e),
        ));
    }

    for failover in &chain.failover_urls {
        if let Err(e) = url::Url::parse(failover) {
            errors.push(ValidationError::new(
                "blockchain.failover_urls",
                format!("invalid URL '{}': {}", failover, e),
            ));
        }
    }

    if chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("blockchain.rpc_timeout_secs", "must be > 0"));
    }
    if chain.wait_for_receipt && chain.confirmation_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "blockchain.confirmation_timeout_secs",
            "must be > 0 when wait_for_receipt is set",
        ));
    }
    if chain.receipt_poll_interval_ms == 0 {
        errors.push(ValidationError::new(
            "blockchain.receipt_poll_interval_ms",
            "must be > 0",
        ));
    }
    if !(chain.gas_price_multiplier.is_finite() && chain.gas_price_multiplier > 0.0) {
        errors.push(ValidationError::new(
            "blockchain.gas_price_multiplier",
            "must be a positive number",
        ));
    }

    if parse_wei(&config.demo.value_wei).is_err() {
        errors.push(ValidationError::new(
            "demo.value_wei",
            format!("'{}' is not a wei amount", config.demo.value_wei),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
