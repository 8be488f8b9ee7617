//! Account generation and import.
//!
//! # Security
//! - The private key is never logged; `Debug` prints the address only
//! - Export of the raw key is explicit (`private_key_hex`)

use alloy::primitives::{keccak256, Address, B256};
use alloy::signers::local::PrivateKeySigner;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::observability::metrics;

/// An address together with the key that controls it.
#[derive(Clone)]
pub struct Account {
    signer: PrivateKeySigner,
}

impl Account {
    /// Import an account from a hex-encoded private key (with or without 0x prefix).
    pub fn from_private_key(private_key_hex: &str) -> BlockchainResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;

        Ok(Self { signer })
    }

    /// Build an account from raw key bytes.
    pub fn from_bytes(key: &B256) -> BlockchainResult<Self> {
        let signer = PrivateKeySigner::from_bytes(key)
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key: {}", e)))?;
        Ok(Self { signer })
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Raw private key bytes.
    pub fn private_key(&self) -> B256 {
        self.signer.to_bytes()
    }

    /// Private key as 0x-prefixed hex.
    pub fn private_key_hex(&self) -> String {
        self.private_key().to_string()
    }

    /// The underlying signer, used when assembling a signing wallet.
    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address())
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for Account {}

/// Creates fresh accounts from an entropy source.
///
/// Each key is `keccak256(32 random bytes || extra)`, where `extra` is the
/// caller's entropy or another 32 random bytes.
pub struct AccountGenerator {
    rng: Box<dyn RngCore + Send>,
}

impl AccountGenerator {
    /// Generator backed by OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Box::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic generator; equal seeds give equal account sequences.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Box::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Generator from an optional seed.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(),
        }
    }

    /// Create a new account, optionally mixing in caller-supplied entropy.
    pub fn create(&mut self, entropy: Option<&[u8]>) -> BlockchainResult<Account> {
        let mut material = vec![0u8; 32];
        self.rng.fill_bytes(&mut material);

        match entropy {
            Some(extra) => material.extend_from_slice(extra),
            None => {
                let mut extra = [0u8; 32];
                self.rng.fill_bytes(&mut extra);
                material.extend_from_slice(&extra);
            }
        }

        let account = Account::from_bytes(&keccak256(&material))?;
        metrics::record_account_created();
        tracing::debug!(address = %account.address(), "Account created");
        Ok(account)
    }
}

impl Default for AccountGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AccountGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountGenerator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_create_without_entropy() {
        let account = AccountGenerator::new().create(None).unwrap();
        let address = account.address().to_string();
        assert!(address.starts_with("0x"));
        assert_eq!(address.len(), 42);
        assert_ne!(account.address(), Address::ZERO);
        assert_ne!(account.private_key(), B256::ZERO);
    }

    #[test]
    fn test_seeded_generators_agree() {
        let a = AccountGenerator::seeded(42).create(Some(b"0")).unwrap();
        let b = AccountGenerator::seeded(42).create(Some(b"0")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.private_key(), b.private_key());
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = AccountGenerator::seeded(1).create(None).unwrap();
        let b = AccountGenerator::seeded(2).create(None).unwrap();
        assert_ne!(a.address(), b.address());
    }

    #[test]
    fn test_entropy_changes_key() {
        let a = AccountGenerator::seeded(9).create(Some(b"alpha")).unwrap();
        let b = AccountGenerator::seeded(9).create(Some(b"beta")).unwrap();
        assert_ne!(a.address(), b.address());
    }

    #[test]
    fn test_successive_accounts_differ() {
        let mut generator = AccountGenerator::seeded(3);
        let a = generator.create(None).unwrap();
        let b = generator.create(None).unwrap();
        assert_ne!(a.address(), b.address());
    }

    #[test]
    fn test_import_known_key() {
        let account = Account::from_private_key(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(
            account.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );

        let prefixed = Account::from_private_key(&format!("0x{}", TEST_PRIVATE_KEY)).unwrap();
        assert_eq!(prefixed, account);
        assert_eq!(account.private_key_hex(), format!("0x{}", TEST_PRIVATE_KEY));
    }

    #[test]
    fn test_invalid_private_key() {
        let result = Account::from_private_key("invalid_key");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid private key"));
    }

    #[test]
    fn test_zero_key_rejected() {
        assert!(Account::from_bytes(&B256::ZERO).is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let account = Account::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let debug = format!("{:?}", account);
        assert!(debug.contains("redacted"));
        assert!(!debug.contains(TEST_PRIVATE_KEY));
    }
}
