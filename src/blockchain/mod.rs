//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! AccountGenerator (entropy)
//!     → account.rs (key pair, address)
//!     → wallet.rs (ordered, address-unique collection)
//!     → client.rs (RPC connection with timeouts and failover)
//!     → transaction.rs (build, sign, broadcast, confirm)
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts
//! - Graceful degradation when blockchain unreachable

pub mod account;
pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use account::{Account, AccountGenerator};
pub use client::BlockchainClient;
pub use transaction::{PendingTransfer, TxBuilder};
pub use types::{
    BlockchainConfig, BlockchainError, BlockchainResult, ChainId, TransferOutcome, TransferRequest,
    TransferStatus,
};
pub use wallet::Wallet;
