use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::ports::{RateError, RateProvider};

pub const BINANCE_TICKER_API: &str = "https://api.binance.com/api/v3/ticker/price";
pub const DEFAULT_SYMBOL: &str = "TONUSDT";

/// Anchor-currency USD price from the Binance spot ticker
#[derive(Debug, Clone)]
pub struct BinanceTickerClient {
    http: Client,
    api_url: String,
    symbol: String,
}

impl BinanceTickerClient {
    pub fn new(api_url: impl Into<String>, symbol: impl Into<String>, timeout: Duration) -> Result<Self, RateError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            api_url: api_url.into(),
            symbol: symbol.into(),
        })
    }

    /// Get the last traded price for the configured symbol
    pub async fn get_price(&self) -> Result<f64, RateError> {
        let response = self.http
            .get(&self.api_url)
            .query(&[("symbol", self.symbol.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RateError::StatusError(response.status().as_u16()));
        }

        let ticker: TickerResponse = response.json().await?;
        if ticker.symbol != self.symbol {
            return Err(RateError::ParseError(format!(
                "ticker for {} returned symbol {}",
                self.symbol, ticker.symbol
            )));
        }

        ticker.price
            .parse::<f64>()
            .map_err(|e| RateError::ParseError(format!("price '{}': {}", ticker.price, e)))
    }
}

#[async_trait]
impl RateProvider for BinanceTickerClient {
    fn feed_name(&self) -> &'static str {
        "binance"
    }

    async fn fetch_rate(&self) -> Result<f64, RateError> {
        self.get_price().await
    }
}

/// `/api/v3/ticker/price` response, price is a decimal string
#[derive(Debug, Deserialize)]
struct TickerResponse {
    symbol: String,
    price: String,
}
