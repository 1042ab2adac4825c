//! TYVM Price Bot Library
//!
//! Prices the TYVM token from scraped holder balances and two exchange-rate
//! feeds, and serves a per-user price / calculator conversation over Telegram.
//!
//! # Modules
//!
//! - `domain`: Core types (Wallet, PriceSnapshot, amount parsing, MarkdownV2 formatting)
//! - `ports`: Trait abstractions (WalletBalanceProvider, RateProvider, ReplySink)
//! - `application`: PriceAggregator and ConversationEngine
//! - `adapters`: External implementations (WebDriver, Binance, CBR, Telegram, CLI)
//! - `config`: Configuration and wallet source loading

pub mod domain;
pub mod ports;
pub mod application;
pub mod adapters;
pub mod config;
