//! Chain-specific types and error definitions.

use alloy::primitives::{Address, TxHash, U256};
use thiserror::Error;

pub use crate::config::schema::BlockchainConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transaction was not confirmed within expected time.
    #[error("Transaction not confirmed after {0} blocks")]
    ConfirmationTimeout(u32),

    /// Invalid private key format or derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Gas price exceeded maximum allowed.
    #[error("Gas price {current_gwei} gwei exceeds maximum {max_gwei} gwei")]
    GasPriceTooHigh { current_gwei: u64, max_gwei: u64 },

    /// Nonce management error.
    #[error("Nonce error: {0}")]
    Nonce(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// Blockchain client not initialized or disabled.
    #[error("Blockchain not available: {0}")]
    NotAvailable(String),

    /// Malformed transfer parameters.
    #[error("Invalid transaction request: {0}")]
    InvalidRequest(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// A plain value transfer: `{from, to, value}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRequest {
    pub from: Address,
    pub to: Address,
    /// Amount in wei.
    pub value: U256,
}

impl TransferRequest {
    pub fn new(from: Address, to: Address, value: U256) -> Self {
        Self { from, to, value }
    }

    /// Build a request from string inputs.
    ///
    /// Addresses are hex; `value` is a decimal or `0x`-prefixed wei amount.
    pub fn parse(from: &str, to: &str, value: &str) -> BlockchainResult<Self> {
        let from = from
            .parse()
            .map_err(|e| BlockchainError::InvalidRequest(format!("from '{}': {}", from, e)))?;
        let to = to
            .parse()
            .map_err(|e| BlockchainError::InvalidRequest(format!("to '{}': {}", to, e)))?;
        let value = parse_wei(value)?;
        Ok(Self { from, to, value })
    }
}

/// Parse a wei amount given in decimal or `0x` hex.
pub fn parse_wei(value: &str) -> BlockchainResult<U256> {
    value
        .trim()
        .parse::<U256>()
        .map_err(|e| BlockchainError::InvalidRequest(format!("value '{}': {}", value, e)))
}

/// Where a submitted transfer ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStatus {
    /// Accepted by the node; no receipt awaited.
    Submitted,
    /// Mined with the required number of confirmations.
    Confirmed,
    /// Mined, but execution failed.
    Reverted,
}

/// Result of a transfer that reached the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub status: TransferStatus,
}

/// How a watched transaction settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Transaction is confirmed with required block depth.
    Confirmed { block_number: u64 },
    /// Transaction was mined but reverted.
    Failed { block_number: Option<u64> },
}
