//! Wallet source loading

use std::path::Path;

use crate::domain::WalletRegistry;
use super::loader::ConfigError;

/// Load the wallet registry from a `name|locator|address` file.
///
/// Fails only if the file cannot be read. Malformed lines are dropped.
pub fn load_wallets<P: AsRef<Path>>(path: P) -> Result<WalletRegistry, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::WalletSourceError {
        path: path.to_path_buf(),
        source,
    })?;

    let registry = WalletRegistry::parse(&content);
    tracing::info!("Loaded {} wallets from {}", registry.len(), path.display());
    if registry.is_empty() {
        tracing::warn!("Wallet source {} has no valid entries", path.display());
    }
    Ok(registry)
}
