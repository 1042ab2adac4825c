//! Domain Layer - Core pricing types with no I/O
//!
//! - `wallet`: tracked wallets and the ordered registry
//! - `balance`: parsing of scraped balance text
//! - `snapshot`: price snapshot, display rounding, valuations
//! - `amount`: calculator amount parsing
//! - `markdown`: MarkdownV2 number formatting and escaping

pub mod wallet;
pub mod balance;
pub mod snapshot;
pub mod amount;
pub mod markdown;

pub use wallet::{Wallet, WalletRegistry};
pub use balance::parse_balance_text;
pub use snapshot::{PriceSnapshot, RoundedPrices, Valuation, round_display};
pub use amount::{parse_amount, InputError};
pub use markdown::{escape_markdown, format_grouped, format_grouped_escaped, markdown_link};
