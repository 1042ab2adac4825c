//! CLI Adapter
//!
//! Command-line interface for the price bot.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{CliApp, Command, RunCmd, PriceCmd, CalcCmd, WalletsCmd};
