//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to a JSON-RPC endpoint (plus optional failovers)
//! - Query chain state (chain id, block number, balances, nonces, receipts)
//! - List node-managed accounts, awaited or through a one-shot callback
//! - Hand transactions to the node, either pre-signed or node-signed

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainConfig, BlockchainError, BlockchainResult, ChainId};
use crate::observability::metrics;

/// Blockchain RPC client wrapper with failover support.
#[derive(Clone)]
pub struct BlockchainClient {
    /// List of providers (primary + failovers).
    providers: Vec<Arc<dyn Provider + Send + Sync>>,
    /// Primary endpoint, used for anything that must not be replayed.
    primary_url: url::Url,
    /// Configuration.
    config: BlockchainConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a new blockchain client.
    ///
    /// Succeeds even when the node is unreachable; the chain check only warns.
    pub async fn new(config: BlockchainConfig) -> BlockchainResult<Self> {
        let client = Self::connect(config)?;

        match client.verify_chain_id().await {
            Ok(()) => {
                tracing::info!(
                    rpc_url = %client.config.rpc_url,
                    chain_id = client.config.chain_id,
                    "Blockchain client initialized"
                );
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Blockchain client initialized but chain verification failed"
                );
            }
        }

        Ok(client)
    }

    /// Build the provider list without touching the network.
    pub fn connect(config: BlockchainConfig) -> BlockchainResult<Self> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);
        let mut providers = Vec::new();

        let primary_url: url::Url = config.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        providers.push(Arc::new(ProviderBuilder::new().connect_http(primary_url.clone()))
            as Arc<dyn Provider + Send + Sync>);

        for url_str in &config.failover_urls {
            if let Ok(url) = url_str.parse() {
                providers.push(Arc::new(ProviderBuilder::new().connect_http(url))
                    as Arc<dyn Provider + Send + Sync>);
            } else {
                tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL");
            }
        }

        Ok(Self {
            providers,
            primary_url,
            config,
            timeout_duration,
        })
    }

    /// Verify the connected chain ID matches configuration.
    ///
    /// A configured chain ID of `0` accepts any chain.
    pub async fn verify_chain_id(&self) -> BlockchainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if self.config.chain_id != 0 && chain_id.0 != self.config.chain_id {
            return Err(BlockchainError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_chain_id();
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => {
                    metrics::record_rpc("eth_chainId", true);
                    return Ok(ChainId(result));
                }
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, error = %e, "RPC error, trying next provider");
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, "RPC timeout, trying next provider");
                }
            }
        }
        metrics::record_rpc("eth_chainId", false);
        Err(BlockchainError::Rpc("All RPC providers failed".to_string()))
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> BlockchainResult<u64> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_block_number();
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => {
                    metrics::record_rpc("eth_blockNumber", true);
                    return Ok(result);
                }
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        metrics::record_rpc("eth_blockNumber", false);
        Err(BlockchainError::Rpc("All providers failed to get block number".to_string()))
    }

    /// Get the accounts managed by the node (`eth_accounts`).
    pub async fn get_accounts(&self) -> BlockchainResult<Vec<Address>> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_accounts();
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => {
                    metrics::record_rpc("eth_accounts", true);
                    return Ok(result);
                }
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        metrics::record_rpc("eth_accounts", false);
        Err(BlockchainError::Rpc("All providers failed to list accounts".to_string()))
    }

    /// Query node accounts in the background and hand the single result to
    /// `callback`.
    ///
    /// The callback runs exactly once, with an error if no provider answered.
    /// The returned handle may be awaited or dropped; dropping does not cancel.
    pub fn get_accounts_with<F>(&self, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(BlockchainResult<Vec<Address>>) + Send + 'static,
    {
        let client = self.clone();
        tokio::spawn(async move {
            let result = client.get_accounts().await;
            callback(result);
        })
    }

    /// Get the balance of an address.
    pub async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_balance(address);
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => {
                    metrics::record_rpc("eth_getBalance", true);
                    return Ok(result);
                }
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        metrics::record_rpc("eth_getBalance", false);
        Err(BlockchainError::Rpc("All providers failed to get balance".to_string()))
    }

    /// Get the transaction count (nonce) for an address.
    pub async fn get_transaction_count(&self, address: Address) -> BlockchainResult<u64> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_transaction_count(address).pending();
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => {
                    metrics::record_rpc("eth_getTransactionCount", true);
                    return Ok(result);
                }
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        metrics::record_rpc("eth_getTransactionCount", false);
        Err(BlockchainError::Nonce(format!(
            "All providers failed to get transaction count for {}",
            address
        )))
    }

    /// Get a transaction receipt by hash.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> BlockchainResult<Option<TransactionReceipt>> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_transaction_receipt(tx_hash);
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => {
                    metrics::record_rpc("eth_getTransactionReceipt", true);
                    return Ok(result);
                }
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        metrics::record_rpc("eth_getTransactionReceipt", false);
        Err(BlockchainError::Rpc("All providers failed to get receipt".to_string()))
    }

    /// Get current gas price in wei.
    pub async fn get_gas_price(&self) -> BlockchainResult<u128> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_gas_price();
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => {
                    metrics::record_rpc("eth_gasPrice", true);
                    return Ok(result);
                }
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        metrics::record_rpc("eth_gasPrice", false);
        Err(BlockchainError::Rpc("All providers failed to get gas price".to_string()))
    }

    /// Hand an unsigned transaction to the node (`eth_sendTransaction`).
    ///
    /// The node must manage the `from` account. Only the primary provider is
    /// used so a timed-out submission is never replayed elsewhere.
    pub async fn send_transaction(&self, tx: TransactionRequest) -> BlockchainResult<TxHash> {
        let fut = self.providers[0].send_transaction(tx);
        let result = match timeout(self.timeout_duration, fut).await {
            Ok(Ok(pending)) => Ok(*pending.tx_hash()),
            Ok(Err(e)) => Err(BlockchainError::Rpc(format!("eth_sendTransaction failed: {}", e))),
            Err(_) => Err(BlockchainError::Timeout(self.config.rpc_timeout_secs)),
        };
        metrics::record_rpc("eth_sendTransaction", result.is_ok());
        result
    }

    /// Sign `tx` locally with `wallet` and broadcast it through the primary endpoint.
    pub async fn send_signed_transaction(
        &self,
        tx: TransactionRequest,
        wallet: EthereumWallet,
    ) -> BlockchainResult<TxHash> {
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(self.primary_url.clone());

        let result = match timeout(self.timeout_duration, provider.send_transaction(tx)).await {
            Ok(Ok(pending)) => Ok(*pending.tx_hash()),
            Ok(Err(e)) => Err(BlockchainError::Rpc(format!(
                "eth_sendRawTransaction failed: {}",
                e
            ))),
            Err(_) => Err(BlockchainError::Timeout(self.config.rpc_timeout_secs)),
        };
        metrics::record_rpc("eth_sendRawTransaction", result.is_ok());
        result
    }

    /// Check if the blockchain is reachable and healthy.
    ///
    /// Returns true if we can query the block number.
    pub async fn is_healthy(&self) -> bool {
        self.get_block_number().await.is_ok()
    }

    /// Get the configuration.
    pub fn config(&self) -> &BlockchainConfig {
        &self.config
    }

    /// Get the number of confirmation blocks required.
    pub fn confirmation_blocks(&self) -> u32 {
        self.config.confirmation_blocks
    }

    /// Number of usable providers (primary included).
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
