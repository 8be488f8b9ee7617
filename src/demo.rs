//! The account-management walkthrough.
//!
//! Runs the labeled steps in order against one node:
//!
//! ```text
//! 01 Create wallet
//! 02 Create account 1
//! 03 Create account 2
//! 04 Save wallet          (add both accounts)
//! 04 getAccounts          (background, callback)
//! 05 sendTransaction      (background, deferred result)
//! ... then both results, in arrival order
//! ```

use std::sync::{Arc, Mutex};

use alloy::primitives::Address;
use tokio::sync::oneshot;

use crate::blockchain::types::parse_wei;
use crate::blockchain::{
    AccountGenerator, BlockchainClient, BlockchainResult, TransferOutcome, TransferRequest,
    TxBuilder, Wallet,
};
use crate::config::WalkthroughConfig;
use crate::lifecycle::Shutdown;

/// Extra entropy given when creating the second account.
const ACCOUNT_2_ENTROPY: &[u8] = b"0";

/// Ordered record of the step labels that were logged.
#[derive(Debug, Clone, Default)]
pub struct StepLog {
    steps: Arc<Mutex<Vec<String>>>,
}

impl StepLog {
    fn record(&self, label: &str) {
        tracing::info!(step = label, "{}", label);
        if let Ok(mut steps) = self.steps.lock() {
            steps.push(label.to_string());
        }
    }

    /// Labels logged so far.
    pub fn snapshot(&self) -> Vec<String> {
        self.steps.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

/// What a finished walkthrough observed.
#[derive(Debug)]
pub struct WalkthroughReport {
    pub wallet: Wallet,
    /// `None` when shutdown cut the wait short.
    pub node_accounts: Option<BlockchainResult<Vec<Address>>>,
    /// `None` when shutdown cut the wait short.
    pub transfer: Option<BlockchainResult<TransferOutcome>>,
    pub steps: Vec<String>,
}

/// Sequences the walkthrough against a connected client.
pub struct Walkthrough {
    client: BlockchainClient,
    config: WalkthroughConfig,
    shutdown: Shutdown,
}

impl Walkthrough {
    pub fn new(client: BlockchainClient, config: WalkthroughConfig, shutdown: Shutdown) -> Self {
        Self {
            client,
            config,
            shutdown,
        }
    }

    /// Run every step and wait for both background results (or shutdown).
    pub async fn run(self) -> BlockchainResult<WalkthroughReport> {
        let log = StepLog::default();
        let value = parse_wei(&self.config.value_wei)?;
        let mut generator = AccountGenerator::from_seed(self.config.seed);
        let mut shutdown_rx = self.shutdown.subscribe();

        log.record("01 Create wallet");
        let mut wallet = Wallet::new();
        tracing::info!(accounts = wallet.len(), "Wallet created");

        log.record("02 Create account 1");
        let account1 = generator.create(None)?;
        tracing::info!(account = ?account1, "Account 1");

        log.record("03 Create account 2");
        let account2 = generator.create(Some(ACCOUNT_2_ENTROPY))?;
        tracing::info!(account = ?account2, "Account 2");

        log.record("04 Save wallet");
        wallet.add(account1.clone());
        wallet.add(account2.clone());
        tracing::info!(accounts = wallet.len(), addresses = ?wallet.addresses(), "Wallet populated");

        log.record("04 getAccounts");
        let (accounts_tx, accounts_rx) = oneshot::channel();
        let accounts_log = log.clone();
        let accounts_task = self.client.get_accounts_with(move |result| {
            report_accounts(&result);
            accounts_log.record("04 getAccounts result");
            let _ = accounts_tx.send(result);
        });

        log.record("05 sendTransaction");
        let request = TransferRequest::new(account1.address(), account2.address(), value);
        let pending = TxBuilder::new(self.client.clone(), wallet.clone()).send(request);

        let (transfer_tx, transfer_rx) = oneshot::channel();
        let transfer_tx = Arc::new(Mutex::new(Some(transfer_tx)));
        let (ok_tx, err_tx) = (transfer_tx.clone(), transfer_tx);
        let (ok_log, err_log) = (log.clone(), log.clone());
        let transfer_task = pending.observe(
            move |outcome| settle_transfer(Ok(outcome), &ok_log, &ok_tx),
            move |error| settle_transfer(Err(error), &err_log, &err_tx),
        );

        let (node_accounts, transfer) = tokio::select! {
            (accounts, transfer) = async { tokio::join!(accounts_rx, transfer_rx) } => {
                (accounts.ok(), transfer.ok())
            }
            _ = shutdown_rx.recv() => {
                accounts_task.abort();
                transfer_task.abort();
                (None, None)
            }
        };

        Ok(WalkthroughReport {
            wallet,
            node_accounts,
            transfer,
            steps: log.snapshot(),
        })
    }
}

type TransferSlot = Arc<Mutex<Option<oneshot::Sender<BlockchainResult<TransferOutcome>>>>>;

fn settle_transfer(result: BlockchainResult<TransferOutcome>, log: &StepLog, slot: &TransferSlot) {
    report_transfer(&result);
    log.record("05 sendTransaction result");
    if let Some(tx) = slot.lock().ok().and_then(|mut s| s.take()) {
        let _ = tx.send(result);
    }
}

/// Log the node's account list.
pub fn report_accounts(result: &BlockchainResult<Vec<Address>>) {
    match result {
        Ok(accounts) => tracing::info!(count = accounts.len(), accounts = ?accounts, "Node accounts"),
        Err(e) => tracing::warn!(error = %e, "Node accounts unavailable"),
    }
}

/// Log a settled transfer. Both outcomes go through here with the same message.
pub fn report_transfer(result: &BlockchainResult<TransferOutcome>) {
    match result {
        Ok(outcome) => tracing::info!(
            tx_hash = %outcome.tx_hash,
            status = ?outcome.status,
            block_number = ?outcome.block_number,
            "Transfer settled"
        ),
        Err(e) => tracing::warn!(error = %e, "Transfer settled"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::BlockchainConfig;

    #[tokio::test]
    async fn test_walkthrough_without_node_still_finishes() {
        let config = BlockchainConfig {
            rpc_url: "http://127.0.0.1:9".to_string(),
            rpc_timeout_secs: 2,
            ..BlockchainConfig::default()
        };
        let client = BlockchainClient::connect(config).unwrap();
        let walkthrough = Walkthrough::new(
            client,
            WalkthroughConfig {
                seed: Some(5),
                ..WalkthroughConfig::default()
            },
            Shutdown::new(),
        );

        let report = walkthrough.run().await.unwrap();
        assert_eq!(report.wallet.len(), 2);
        assert!(matches!(report.node_accounts, Some(Err(_))));
        assert!(matches!(report.transfer, Some(Err(_))));
        assert_eq!(
            &report.steps[..6],
            &[
                "01 Create wallet",
                "02 Create account 1",
                "03 Create account 2",
                "04 Save wallet",
                "04 getAccounts",
                "05 sendTransaction",
            ]
        );
        assert_eq!(report.steps.len(), 8);
    }

    #[tokio::test]
    async fn test_shutdown_abandons_wait() {
        // Accepts TCP connections into the backlog but never answers.
        let silent = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = BlockchainConfig {
            rpc_url: format!("http://{}", silent.local_addr().unwrap()),
            rpc_timeout_secs: 30,
            ..BlockchainConfig::default()
        };
        let client = BlockchainClient::connect(config).unwrap();
        let shutdown = Shutdown::new();
        let walkthrough = Walkthrough::new(client, WalkthroughConfig::default(), shutdown.clone());

        let trigger = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(200)).await;
            trigger.trigger();
        });

        let report = walkthrough.run().await.unwrap();
        assert!(report.node_accounts.is_none());
        assert!(report.transfer.is_none());
    }

    #[tokio::test]
    async fn test_bad_value_rejected_up_front() {
        let client = BlockchainClient::connect(BlockchainConfig::default()).unwrap();
        let walkthrough = Walkthrough::new(
            client,
            WalkthroughConfig {
                value_wei: "lots".to_string(),
                seed: None,
            },
            Shutdown::new(),
        );
        assert!(walkthrough.run().await.is_err());
    }
}
