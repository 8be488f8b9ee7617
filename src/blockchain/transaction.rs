//! Transfer building, submission, and confirmation monitoring.
//!
//! # Responsibilities
//! - Build legacy value transfers with nonce, gas price and chain id filled in
//! - Sign locally when the wallet holds the sender, otherwise defer to the node
//! - Monitor confirmations
//! - Expose the in-flight transfer as a one-shot deferred result

use alloy::network::TransactionBuilder;
use alloy::primitives::TxHash;
use alloy::rpc::types::TransactionRequest;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{
    BlockchainError, BlockchainResult, ConfirmationStatus, TransferOutcome, TransferRequest,
    TransferStatus,
};
use crate::blockchain::wallet::Wallet;
use crate::observability::metrics;

/// Intrinsic gas of a plain value transfer.
pub const TRANSFER_GAS_LIMIT: u64 = 21_000;

/// Transaction builder for value transfers.
#[derive(Debug, Clone)]
pub struct TxBuilder {
    client: BlockchainClient,
    wallet: Wallet,
}

impl TxBuilder {
    /// Create a new transaction builder.
    pub fn new(client: BlockchainClient, wallet: Wallet) -> Self {
        Self { client, wallet }
    }

    /// Build a transaction request for `request`.
    ///
    /// Fails with `GasPriceTooHigh` before anything is signed if the gas price
    /// that would be sent (node price times multiplier) exceeds the cap.
    pub async fn build(&self, request: &TransferRequest) -> BlockchainResult<TransactionRequest> {
        let nonce = self.client.get_transaction_count(request.from).await?;

        let config = self.client.config();
        let gas_price = self.client.get_gas_price().await?;
        let adjusted_gas_price = (gas_price as f64 * config.gas_price_multiplier) as u128;
        let adjusted_gwei = adjusted_gas_price / 1_000_000_000;

        if adjusted_gwei > config.max_gas_price_gwei as u128 {
            return Err(BlockchainError::GasPriceTooHigh {
                current_gwei: u64::try_from(adjusted_gwei).unwrap_or(u64::MAX),
                max_gwei: config.max_gas_price_gwei,
            });
        }

        let chain_id = if config.chain_id != 0 {
            config.chain_id
        } else {
            self.client.get_chain_id().await?.0
        };

        let tx = TransactionRequest::default()
            .with_from(request.from)
            .with_to(request.to)
            .with_value(request.value)
            .with_nonce(nonce)
            .with_gas_price(adjusted_gas_price)
            .with_chain_id(chain_id)
            .with_gas_limit(TRANSFER_GAS_LIMIT);

        Ok(tx)
    }

    /// Build, send, and (when configured) wait for the transfer to confirm.
    pub async fn submit(&self, request: TransferRequest) -> BlockchainResult<TransferOutcome> {
        let result = self.submit_inner(request).await;
        let outcome = match &result {
            Ok(o) => match o.status {
                TransferStatus::Submitted => "submitted",
                TransferStatus::Confirmed => "confirmed",
                TransferStatus::Reverted => "reverted",
            },
            Err(_) => "failed",
        };
        metrics::record_transfer(outcome);
        result
    }

    async fn submit_inner(&self, request: TransferRequest) -> BlockchainResult<TransferOutcome> {
        let tx = self.build(&request).await?;

        let tx_hash = match self.signing_wallet_for(&request) {
            Some(signing) => {
                tracing::debug!(from = %request.from, "Signing transfer locally");
                self.client.send_signed_transaction(tx, signing).await?
            }
            None => {
                tracing::debug!(from = %request.from, "Sender not in wallet, node will sign");
                self.client.send_transaction(tx).await?
            }
        };

        tracing::info!(
            tx_hash = %tx_hash,
            from = %request.from,
            to = %request.to,
            value = %request.value,
            "Transfer submitted"
        );

        let config = self.client.config();
        if !config.wait_for_receipt {
            return Ok(TransferOutcome {
                tx_hash,
                block_number: None,
                status: TransferStatus::Submitted,
            });
        }

        match self
            .wait_for_confirmation(tx_hash, config.confirmation_timeout_secs)
            .await?
        {
            ConfirmationStatus::Confirmed { block_number } => Ok(TransferOutcome {
                tx_hash,
                block_number: Some(block_number),
                status: TransferStatus::Confirmed,
            }),
            ConfirmationStatus::Failed { block_number } => Ok(TransferOutcome {
                tx_hash,
                block_number,
                status: TransferStatus::Reverted,
            }),
        }
    }

    /// Start the transfer in the background and return its deferred result.
    pub fn send(&self, request: TransferRequest) -> PendingTransfer {
        let builder = self.clone();
        PendingTransfer {
            handle: tokio::spawn(async move { builder.submit(request).await }),
        }
    }

    /// Wait for a transaction to be confirmed.
    ///
    /// # Arguments
    /// * `tx_hash` - Transaction hash to monitor
    /// * `timeout_secs` - Maximum time to wait for confirmation
    pub async fn wait_for_confirmation(
        &self,
        tx_hash: TxHash,
        timeout_secs: u64,
    ) -> BlockchainResult<ConfirmationStatus> {
        let required_confirmations = self.client.confirmation_blocks();
        let timeout_duration = Duration::from_secs(timeout_secs);
        let poll_interval =
            Duration::from_millis(self.client.config().receipt_poll_interval_ms.max(1));

        let result = timeout(timeout_duration, async {
            let mut ticker = interval(poll_interval);

            loop {
                ticker.tick().await;

                let receipt = match self.client.get_transaction_receipt(tx_hash).await? {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                };

                if !receipt.status() {
                    return Ok(ConfirmationStatus::Failed {
                        block_number: receipt.block_number,
                    });
                }

                let current_block = self.client.get_block_number().await?;
                let tx_block = receipt.block_number.unwrap_or(current_block);
                // The inclusion block counts as the first confirmation.
                let confirmations = (current_block.saturating_sub(tx_block) + 1) as u32;

                if confirmations >= required_confirmations {
                    return Ok(ConfirmationStatus::Confirmed {
                        block_number: tx_block,
                    });
                }

                tracing::debug!(
                    tx_hash = %tx_hash,
                    confirmations = confirmations,
                    required = required_confirmations,
                    "Waiting for confirmations"
                );
            }
        })
        .await;

        match result {
            Ok(status) => status,
            Err(_) => Err(BlockchainError::ConfirmationTimeout(required_confirmations)),
        }
    }

    fn signing_wallet_for(&self, request: &TransferRequest) -> Option<alloy::network::EthereumWallet> {
        if self.wallet.contains(request.from) {
            self.wallet.to_ethereum_wallet()
        } else {
            None
        }
    }
}

/// Deferred result of a transfer running in the background.
///
/// Resolves exactly once, to either the outcome or the error.
#[derive(Debug)]
pub struct PendingTransfer {
    handle: JoinHandle<BlockchainResult<TransferOutcome>>,
}

impl PendingTransfer {
    /// Run `on_ok` or `on_err` (exactly one of them) when the transfer settles.
    pub fn observe<S, E>(self, on_ok: S, on_err: E) -> JoinHandle<()>
    where
        S: FnOnce(TransferOutcome) + Send + 'static,
        E: FnOnce(BlockchainError) + Send + 'static,
    {
        tokio::spawn(async move {
            match self.await {
                Ok(outcome) => on_ok(outcome),
                Err(e) => on_err(e),
            }
        })
    }

    /// Stop the background task. Awaiting afterwards yields an error.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

impl Future for PendingTransfer {
    type Output = BlockchainResult<TransferOutcome>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.handle).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(e)) => {
                Poll::Ready(Err(BlockchainError::Rpc(format!("transfer task failed: {}", e))))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
