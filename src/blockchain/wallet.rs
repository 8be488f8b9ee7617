//! In-memory wallet: an ordered set of accounts keyed by address.
//!
//! # Security
//! - Keys live only in process memory; nothing is persisted
//! - Keys are never logged or serialized

use alloy::network::EthereumWallet;
use alloy::primitives::Address;

use crate::blockchain::account::Account;

/// Ordered collection of accounts with unique addresses.
#[derive(Debug, Clone, Default)]
pub struct Wallet {
    accounts: Vec<Account>,
}

impl Wallet {
    /// Create an empty wallet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account and return its index.
    ///
    /// An account whose address is already present is not added twice; the
    /// existing index is returned instead.
    pub fn add(&mut self, account: Account) -> usize {
        let address = account.address();
        if let Some(index) = self.index_of(address) {
            tracing::debug!(address = %address, index, "Account already in wallet");
            return index;
        }

        self.accounts.push(account);
        let index = self.accounts.len() - 1;
        tracing::info!(address = %address, index, "Account added to wallet");
        index
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Account> {
        self.accounts.get(index)
    }

    pub fn get_by_address(&self, address: Address) -> Option<&Account> {
        self.accounts.iter().find(|a| a.address() == address)
    }

    pub fn contains(&self, address: Address) -> bool {
        self.index_of(address).is_some()
    }

    /// Remove the account with `address`. Later accounts shift down one index.
    pub fn remove(&mut self, address: Address) -> bool {
        match self.index_of(address) {
            Some(index) => {
                self.accounts.remove(index);
                tracing::info!(address = %address, "Account removed from wallet");
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.accounts.clear();
    }

    /// Accounts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.accounts.iter().map(Account::address).collect()
    }

    /// Signing wallet holding every account; the first one is the default signer.
    ///
    /// Returns `None` for an empty wallet.
    pub fn to_ethereum_wallet(&self) -> Option<EthereumWallet> {
        let (first, rest) = self.accounts.split_first()?;
        let mut wallet = EthereumWallet::new(first.signer().clone());
        for account in rest {
            wallet.register_signer(account.signer().clone());
        }
        Some(wallet)
    }

    fn index_of(&self, address: Address) -> Option<usize> {
        self.accounts.iter().position(|a| a.address() == address)
    }
}
