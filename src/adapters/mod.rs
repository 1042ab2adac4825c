//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - WebDriver: holder balance scraping through a browser session
//! - Rates: Binance ticker and central bank daily rates
//! - Telegram: chat transport
//! - CLI: Command-line interface definitions

pub mod webdriver;
pub mod rates;
pub mod telegram;
pub mod cli;

pub use webdriver::{WebDriverBalances, WebDriverConfig};
pub use rates::{BinanceTickerClient, CbrDailyClient};
pub use cli::CliApp;
