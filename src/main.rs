//! wallet-demo
//!
//! Walks through the account-management surface of an Ethereum node client.
//!
//! # Flow
//!
//! ```text
//!   config file ─┐
//!   ETH_PROVIDER_URL ─┼─▶ DemoConfig ─▶ BlockchainClient ──▶ JSON-RPC node
//!   CLI flags ───┘                         │
//!                                          ▼
//!        AccountGenerator ─▶ Wallet ─▶ Walkthrough (01..05)
//!                                          │
//!                          getAccounts ◀───┴───▶ sendTransaction
//!                          (callback)            (deferred result)
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use wallet_demo::blockchain::{AccountGenerator, BlockchainClient};
use wallet_demo::config::validation::validate_config;
use wallet_demo::config::{
    apply_cli_overrides, apply_env_overrides, load_config, CliOverrides, ConfigError, DemoConfig,
};
use wallet_demo::demo::{report_accounts, Walkthrough};
use wallet_demo::lifecycle::{signals, Shutdown};
use wallet_demo::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "wallet-demo")]
#[command(about = "Create accounts, fill a wallet, list node accounts and send a transfer", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// JSON-RPC endpoint (overrides config and ETH_PROVIDER_URL)
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit JSON log lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full walkthrough (default)
    Demo {
        /// Amount to transfer, in wei (decimal or 0x hex)
        #[arg(long)]
        value: Option<String>,

        /// Seed for deterministic account generation
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List the accounts managed by the node, with balances in wei
    Accounts,
    /// Generate accounts locally and print their addresses
    Create {
        /// Number of accounts to generate
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Seed for deterministic account generation
        #[arg(long)]
        seed: Option<u64>,

        /// Also print private keys
        #[arg(long)]
        show_keys: bool,
    },
}

fn resolve_config(cli: &Cli) -> Result<DemoConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DemoConfig::default(),
    };

    let (value_wei, seed) = match &cli.command {
        Some(Commands::Demo { value, seed }) => (value.clone(), *seed),
        _ => (None, None),
    };

    apply_env_overrides(&mut config);
    apply_cli_overrides(
        &mut config,
        &CliOverrides {
            rpc_url: cli.rpc_url.clone(),
            log_level: cli.log_level.clone(),
            json_logs: cli.json_logs,
            value_wei,
            seed,
        },
    );

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    logging::init(&config.observability);

    tracing::info!(
        rpc_url = %config.blockchain.rpc_url,
        chain_id = config.blockchain.chain_id,
        rpc_timeout_secs = config.blockchain.rpc_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    match cli.command.unwrap_or(Commands::Demo {
        value: None,
        seed: None,
    }) {
        Commands::Demo { .. } => {
            let client = BlockchainClient::new(config.blockchain.clone()).await?;
            let shutdown = Shutdown::new();
            let listener = signals::spawn_ctrl_c_listener(shutdown.clone());

            let report = Walkthrough::new(client, config.demo.clone(), shutdown)
                .run()
                .await?;
            listener.abort();

            tracing::info!(
                steps = report.steps.len(),
                wallet_accounts = report.wallet.len(),
                "Walkthrough finished"
            );
        }
        Commands::Accounts => {
            let client = BlockchainClient::new(config.blockchain.clone()).await?;
            let result = client.get_accounts().await;
            report_accounts(&result);
            for address in result? {
                match client.get_balance(address).await {
                    Ok(balance) => println!("{} {}", address, balance),
                    Err(e) => {
                        tracing::warn!(address = %address, error = %e, "Balance unavailable");
                        println!("{}", address);
                    }
                }
            }
        }
        Commands::Create {
            count,
            seed,
            show_keys,
        } => {
            let mut generator = AccountGenerator::from_seed(seed);
            for _ in 0..count {
                let account = generator.create(None)?;
                if show_keys {
                    println!("{} {}", account.address(), account.private_key_hex());
                } else {
                    println!("{}", account.address());
                }
            }
        }
    }

    Ok(())
}
