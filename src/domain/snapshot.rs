//! Price Snapshot
//!
//! The result of one full price computation: scraped balances, total supply
//! and the token price in the anchor currency, USD and the local currency.
//! Fields hold raw, unrounded values. Rounding is only applied through
//! `PriceSnapshot::rounded` for display.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Decimal places kept in the display form
pub const DISPLAY_DECIMALS: i32 = 3;

/// Round to `DISPLAY_DECIMALS` places
pub fn round_display(value: f64) -> f64 {
    let factor = 10f64.powi(DISPLAY_DECIMALS);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSnapshot {
    /// One balance per wallet, in registry order
    pub per_wallet_balances: Vec<f64>,
    pub total_supply: f64,
    pub price_in_anchor: f64,
    pub anchor_usd_rate: f64,
    pub price_in_usd: f64,
    pub usd_to_local_rate: f64,
    pub price_in_local: f64,
    pub fetched_at: DateTime<Utc>,
}

/// Display form of a snapshot's prices and rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoundedPrices {
    pub price_in_anchor: f64,
    pub anchor_usd_rate: f64,
    pub price_in_usd: f64,
    pub usd_to_local_rate: f64,
    pub price_in_local: f64,
}

impl PriceSnapshot {
    pub fn rounded(&self) -> RoundedPrices {
        RoundedPrices {
            price_in_anchor: round_display(self.price_in_anchor),
            anchor_usd_rate: round_display(self.anchor_usd_rate),
            price_in_usd: round_display(self.price_in_usd),
            usd_to_local_rate: round_display(self.usd_to_local_rate),
            price_in_local: round_display(self.price_in_local),
        }
    }

    /// Value `amount` tokens at this snapshot's raw prices
    pub fn value_of(&self, amount: f64) -> Valuation {
        Valuation {
            amount,
            in_anchor: amount * self.price_in_anchor,
            in_usd: amount * self.price_in_usd,
            in_local: amount * self.price_in_local,
        }
    }
}

/// Value of a token amount in the three currencies
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Valuation {
    pub amount: f64,
    pub in_anchor: f64,
    pub in_usd: f64,
    pub in_local: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn snapshot(price_in_anchor: f64, anchor_usd: f64, usd_local: f64) -> PriceSnapshot {
        let price_in_usd = price_in_anchor * anchor_usd;
        PriceSnapshot {
            per_wallet_balances: vec![],
            total_supply: 0.0,
            price_in_anchor,
            anchor_usd_rate: anchor_usd,
            price_in_usd,
            usd_to_local_rate: usd_local,
            price_in_local: price_in_usd * usd_local,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_round_display() {
        assert_relative_eq!(round_display(1.23456), 1.235);
        assert_relative_eq!(round_display(10.0), 10.0);
        assert_relative_eq!(round_display(0.0004), 0.0);
    }

    #[test]
    fn test_rounded_prices() {
        let snap = snapshot(1.0 / 3.0, 5.4321, 81.98765);
        let rounded = snap.rounded();
        assert_relative_eq!(rounded.price_in_anchor, 0.333);
        assert_relative_eq!(rounded.anchor_usd_rate, 5.432);
        assert_relative_eq!(rounded.usd_to_local_rate, 81.988);
    }

    #[test]
    fn test_valuation_uses_raw_prices() {
        // Rounded anchor price is 0.333; 3000 * 0.333 would give 999.0
        let snap = snapshot(1.0 / 3.0, 2.0, 90.0);
        let valuation = snap.value_of(3000.0);
        assert_relative_eq!(valuation.in_anchor, 1000.0, epsilon = 1e-9);
        assert_relative_eq!(valuation.in_usd, 2000.0, epsilon = 1e-9);
        assert_relative_eq!(valuation.in_local, 180_000.0, epsilon = 1e-6);
    }
}
