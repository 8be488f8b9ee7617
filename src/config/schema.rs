//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the demo client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Default JSON-RPC endpoint of a local development node.
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DemoConfig {
    /// Blockchain node settings.
    pub blockchain: BlockchainConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Walkthrough parameters.
    pub demo: WalkthroughConfig,
}

/// Blockchain integration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockchainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs.
    pub failover_urls: Vec<String>,

    /// Expected chain ID. `0` accepts whatever the node reports.
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Number of block confirmations required before a transfer resolves.
    pub confirmation_blocks: u32,

    /// Upper bound on the time spent waiting for confirmations.
    pub confirmation_timeout_secs: u64,

    /// Poll interval for receipts in milliseconds.
    pub receipt_poll_interval_ms: u64,

    /// Resolve transfers only once a receipt is available.
    pub wait_for_receipt: bool,

    /// Gas price multiplier (1.0 = node price, 1.2 = 20% buffer).
    pub gas_price_multiplier: f64,

    /// Maximum gas price in gwei (protection against spikes).
    pub max_gas_price_gwei: u64,
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            failover_urls: Vec::new(),
            chain_id: 0,
            rpc_timeout_secs: 10,
            confirmation_blocks: 1,
            confirmation_timeout_secs: 60,
            receipt_poll_interval_ms: 1000,
            wait_for_receipt: true,
            gas_price_multiplier: 1.0,
            max_gas_price_gwei: 500,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable text.
    pub json_logs: bool,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Parameters of the account walkthrough.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WalkthroughConfig {
    /// Amount transferred from account 1 to account 2, in wei.
    pub value_wei: String,

    /// Seed for deterministic account generation. Random when unset.
    pub seed: Option<u64>,
}

impl Default for WalkthroughConfig {
    fn default() -> Self {
        Self {
            value_wei: "1000000000000000".to_string(),
            seed: None,
        }
    }
}
