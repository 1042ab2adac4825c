//! Price Aggregator
//!
//! Scrapes every wallet balance, sums the supply, and converts the fixed
//! token allocation into a price in the anchor currency, USD and the local
//! currency. Every call performs the full scrape and both rate fetches.

use std::sync::Arc;
use chrono::Utc;
use thiserror::Error;

use crate::domain::{parse_balance_text, PriceSnapshot, WalletRegistry};
use crate::ports::{BalanceError, RateError, RateProvider, WalletBalanceProvider};

/// Total token allocation used as the price numerator
pub const DEFAULT_ALLOCATION: f64 = 571_365.0;

/// A price could not be produced; reported to the user, never retried
#[derive(Debug, Error)]
pub enum DataUnavailable {
    #[error("Wallet balances unavailable: {0}")]
    Balances(#[from] BalanceError),
    #[error("Balance provider returned {got} readings for {expected} wallets")]
    MalformedBalances { expected: usize, got: usize },
    #[error("Total supply is zero, price is undefined")]
    ZeroSupply,
    #[error("Rate feed {feed} failed: {source}")]
    RateFeed {
        feed: &'static str,
        #[source]
        source: RateError,
    },
    #[error("Rate feed {feed} returned invalid rate {rate}")]
    InvalidRate { feed: &'static str, rate: f64 },
    #[error("Computed {field} is not a finite number")]
    NonFinite { field: &'static str },
}

/// Builds fresh price snapshots from the collaborators
#[derive(Clone)]
pub struct PriceAggregator {
    wallets: WalletRegistry,
    balances: Arc<dyn WalletBalanceProvider>,
    anchor_rate: Arc<dyn RateProvider>,
    local_rate: Arc<dyn RateProvider>,
    allocation: f64,
}

impl PriceAggregator {
    pub fn new(
        wallets: WalletRegistry,
        balances: Arc<dyn WalletBalanceProvider>,
        anchor_rate: Arc<dyn RateProvider>,
        local_rate: Arc<dyn RateProvider>,
    ) -> Self {
        Self {
            wallets,
            balances,
            anchor_rate,
            local_rate,
            allocation: DEFAULT_ALLOCATION,
        }
    }

    /// Override the allocation constant
    pub fn with_allocation(mut self, allocation: f64) -> Self {
        self.allocation = allocation;
        self
    }

    pub fn wallets(&self) -> &WalletRegistry {
        &self.wallets
    }

    pub fn allocation(&self) -> f64 {
        self.allocation
    }

    /// Compute a fresh snapshot
    pub async fn compute_price(&self) -> Result<PriceSnapshot, DataUnavailable> {
        tracing::info!("Scraping {} wallet balances...", self.wallets.len());
        let per_wallet_balances = self.collect_balances().await?;

        let total_supply: f64 = per_wallet_balances.iter().sum();
        if total_supply == 0.0 {
            tracing::error!("Total supply is zero across {} wallets", self.wallets.len());
            return Err(DataUnavailable::ZeroSupply);
        }

        let price_in_anchor = finite("price_in_anchor", self.allocation / total_supply)?;

        let anchor_usd_rate = fetch_rate(self.anchor_rate.as_ref()).await?;
        let price_in_usd = finite("price_in_usd", price_in_anchor * anchor_usd_rate)?;

        let usd_to_local_rate = fetch_rate(self.local_rate.as_ref()).await?;
        let price_in_local = finite("price_in_local", price_in_usd * usd_to_local_rate)?;

        let snapshot = PriceSnapshot {
            per_wallet_balances,
            total_supply,
            price_in_anchor,
            anchor_usd_rate,
            price_in_usd,
            usd_to_local_rate,
            price_in_local,
            fetched_at: Utc::now(),
        };

        let rounded = snapshot.rounded();
        tracing::info!(
            "Price computed: balances={:?} supply={} anchor={} usd={} local={}",
            snapshot.per_wallet_balances,
            snapshot.total_supply,
            rounded.price_in_anchor,
            rounded.price_in_usd,
            rounded.price_in_local
        );
        Ok(snapshot)
    }

    async fn collect_balances(&self) -> Result<Vec<f64>, DataUnavailable> {
        let readings = self.balances.read_balances(&self.wallets.locators()).await?;

        if readings.len() != self.wallets.len() {
            return Err(DataUnavailable::MalformedBalances {
                expected: self.wallets.len(),
                got: readings.len(),
            });
        }

        let balances = self
            .wallets
            .iter()
            .zip(readings)
            .map(|(wallet, reading)| {
                match reading.as_deref().and_then(parse_balance_text) {
                    Some(balance) => balance,
                    None => {
                        tracing::warn!(
                            "Could not read balance for wallet '{}' (got {:?}), using 0",
                            wallet.name,
                            reading
                        );
                        0.0
                    }
                }
            })
            .collect();

        Ok(balances)
    }
}

async fn fetch_rate(feed: &dyn RateProvider) -> Result<f64, DataUnavailable> {
    let name = feed.feed_name();
    let rate = feed.fetch_rate().await.map_err(|source| {
        tracing::error!("Rate feed {} failed: {}", name, source);
        DataUnavailable::RateFeed { feed: name, source }
    })?;

    if !rate.is_finite() || rate <= 0.0 {
        return Err(DataUnavailable::InvalidRate { feed: name, rate });
    }
    tracing::debug!("Rate feed {} -> {}", name, rate);
    Ok(rate)
}

fn finite(field: &'static str, value: f64) -> Result<f64, DataUnavailable> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DataUnavailable::NonFinite { field })
    }
}
