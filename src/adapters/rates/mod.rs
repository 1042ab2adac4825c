//! Exchange-Rate Feeds
//!
//! - `BinanceTickerClient`: anchor currency (TON) price in USD
//! - `CbrDailyClient`: USD to local currency (RUB) from the central bank

mod binance;
mod cbr;

pub use binance::{BinanceTickerClient, BINANCE_TICKER_API, DEFAULT_SYMBOL};
pub use cbr::{rate_from_daily_xml, CbrDailyClient, CBR_DAILY_API, DEFAULT_CHAR_CODE};
