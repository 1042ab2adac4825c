//! Configuration Module
//!
//! Loads and validates configuration from TOML files and the wallet source.

pub mod loader;
pub mod wallets;

pub use loader::{
    Config, ConfigError, load_config,
};
pub use wallets::load_wallets;
