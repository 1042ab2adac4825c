//! CLI Command Definitions
//!
//! Subcommands for running the bot and for one-shot price queries.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// TYVM price bot - token price from holder balances and exchange rates
#[derive(Parser, Debug)]
#[command(
    name = "tyvm-pricebot",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Telegram bot reporting the TYVM price in TON, USD and RUB",
    long_about = "Scrapes TYVM holder balances from the explorer through WebDriver, \
                  combines them with the Binance TON/USDT ticker and the central bank \
                  USD/RUB rate, and answers price and calculator requests over Telegram."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the Telegram bot
    Run(RunCmd),

    /// Compute and print the current price
    Price(PriceCmd),

    /// Value an amount of tokens at the current price
    Calc(CalcCmd),

    /// List the tracked wallets
    Wallets(WalletsCmd),
}

impl Command {
    /// Configuration file the command was given
    pub fn config_path(&self) -> &Path {
        match self {
            Command::Run(cmd) => &cmd.config,
            Command::Price(cmd) => &cmd.config,
            Command::Calc(cmd) => &cmd.config,
            Command::Wallets(cmd) => &cmd.config,
        }
    }
}

/// Start the Telegram bot
#[derive(Parser, Debug)]
pub struct RunCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/pricebot.toml")]
    pub config: PathBuf,
}

/// One-shot price query
#[derive(Parser, Debug)]
pub struct PriceCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/pricebot.toml")]
    pub config: PathBuf,

    /// Print the snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

/// One-shot valuation
#[derive(Parser, Debug)]
pub struct CalcCmd {
    /// Number of tokens (spaces allowed, e.g. "1 000")
    #[arg(value_name = "AMOUNT")]
    pub amount: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/pricebot.toml")]
    pub config: PathBuf,
}

/// Wallet registry listing
#[derive(Parser, Debug)]
pub struct WalletsCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/pricebot.toml")]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let app = CliApp::try_parse_from(["tyvm-pricebot", "run", "--config", "bot.toml"]).unwrap();
        match app.command {
            Command::Run(cmd) => assert_eq!(cmd.config, PathBuf::from("bot.toml")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_config_path_for_every_command() {
        let app = CliApp::try_parse_from(["tyvm-pricebot", "wallets", "-c", "alt.toml"]).unwrap();
        assert_eq!(app.command.config_path(), Path::new("alt.toml"));
    }

    #[test]
    fn test_parse_calc_with_global_flag() {
        let app = CliApp::try_parse_from(["tyvm-pricebot", "calc", "1 000", "-v"]).unwrap();
        assert!(app.verbose);
        match app.command {
            Command::Calc(cmd) => {
                assert_eq!(cmd.amount, "1 000");
                assert_eq!(cmd.config, PathBuf::from("config/pricebot.toml"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_price_json() {
        let app = CliApp::try_parse_from(["tyvm-pricebot", "price", "--json"]).unwrap();
        assert!(matches!(app.command, Command::Price(PriceCmd { json: true, .. })));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(CliApp::try_parse_from(["tyvm-pricebot"]).is_err());
    }
}
