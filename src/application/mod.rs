//! Application Layer
//!
//! - `aggregator`: builds fresh price snapshots from the collaborators
//! - `conversation`: per-user menu and calculator state machine
//! - `messages`: MarkdownV2 rendering of replies

pub mod aggregator;
pub mod conversation;
pub mod messages;

pub use aggregator::{DataUnavailable, PriceAggregator, DEFAULT_ALLOCATION};
pub use conversation::{
    transition, Action, ConversationEngine, Input, SessionState, SessionStore,
    CALCULATOR_TRIGGER, PRICE_TRIGGER, START_COMMAND,
};
pub use messages::MessageLabels;
