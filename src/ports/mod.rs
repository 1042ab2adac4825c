//! Ports Layer - Trait definitions for external collaborators
//!
//! Adapters implement these seams; the application layer only sees traits:
//! - Wallet balances scraped from the holders page
//! - Exchange-rate feeds (anchor/USD, USD/local)
//! - Chat transport for outbound replies

pub mod balances;
pub mod rates;
pub mod chat;
pub mod mocks;

pub use balances::{BalanceError, WalletBalanceProvider};
pub use rates::{RateError, RateProvider};
pub use chat::{OutboundMessage, ReplySink, TextFormat, TransportError, UserId};
