//! Ethereum account-management walkthrough library.
//!
//! Generates accounts, collects them in an in-memory wallet, lists the
//! node's accounts and submits a value transfer through `alloy`.

pub mod blockchain;
pub mod config;
pub mod demo;
pub mod lifecycle;
pub mod observability;

pub use blockchain::{Account, AccountGenerator, BlockchainClient, TxBuilder, Wallet};
pub use config::DemoConfig;
pub use demo::{Walkthrough, WalkthroughReport};
pub use lifecycle::Shutdown;
