use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BalanceError {
    #[error("HTTP error talking to WebDriver: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Failed to open browser session: {0}")]
    SessionError(String),
    #[error("Failed to load holders page: {0}")]
    NavigationError(String),
    #[error("WebDriver protocol error: {0}")]
    ProtocolError(String),
}

/// Source of on-page wallet balances
///
/// One call covers every wallet so an implementation can reuse a single page
/// load. The result has one entry per locator, in the same order; `None`
/// means the element for that wallet could not be read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletBalanceProvider: Send + Sync {
    async fn read_balances(&self, locators: &[String])
        -> Result<Vec<Option<String>>, BalanceError>;
}
