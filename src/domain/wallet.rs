//! Wallet Registry
//!
//! The fixed, ordered set of holder wallets whose balances make up the
//! token's circulating supply. Order defines display order and lines up
//! positionally with `PriceSnapshot::per_wallet_balances`.

use std::sync::Arc;

/// Field delimiter used by the wallet source file
pub const FIELD_DELIMITER: char = '|';

/// A single tracked wallet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wallet {
    /// Display name
    pub name: String,
    /// Locator of the balance element on the holders page (XPath)
    pub locator: String,
    /// On-chain address, used for explorer links
    pub address: String,
}

impl Wallet {
    /// Parse a `name|locator|address` line.
    ///
    /// Returns `None` for lines that do not have exactly three non-empty
    /// fields. Fields are trimmed.
    pub fn from_line(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.trim().split(FIELD_DELIMITER).map(str::trim).collect();
        match parts.as_slice() {
            [name, locator, address]
                if !name.is_empty() && !locator.is_empty() && !address.is_empty() =>
            {
                Some(Self {
                    name: name.to_string(),
                    locator: locator.to_string(),
                    address: address.to_string(),
                })
            }
            _ => None,
        }
    }
}

/// Immutable, ordered wallet collection
///
/// Cheap to clone; built once at startup and shared with the aggregator.
#[derive(Debug, Clone)]
pub struct WalletRegistry {
    wallets: Arc<[Wallet]>,
}

impl WalletRegistry {
    pub fn new(wallets: Vec<Wallet>) -> Self {
        Self { wallets: wallets.into() }
    }

    /// Build a registry from wallet source text.
    ///
    /// Blank lines are ignored and malformed lines are dropped, so this never
    /// fails.
    pub fn parse(source: &str) -> Self {
        let mut wallets = Vec::new();
        for (idx, line) in source.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match Wallet::from_line(line) {
                Some(wallet) => wallets.push(wallet),
                None => tracing::debug!("Skipping malformed wallet line {}", idx + 1),
            }
        }
        Self::new(wallets)
    }

    pub fn wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    pub fn iter(&self) -> impl Iterator<Item = &Wallet> {
        self.wallets.iter()
    }

    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    /// Balance locators in registry order
    pub fn locators(&self) -> Vec<String> {
        self.wallets.iter().map(|w| w.locator.clone()).collect()
    }
}
