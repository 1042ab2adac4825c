use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RateError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Unexpected HTTP status {0}")]
    StatusError(u16),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Currency {0} not found in feed")]
    MissingCurrency(String),
}

/// A single exchange-rate feed
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Short feed name for logs and error messages
    fn feed_name(&self) -> &'static str;

    /// Fetch the current rate
    async fn fetch_rate(&self) -> Result<f64, RateError>;
}
