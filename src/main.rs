//! TYVM Price Bot
//!
//! Telegram bot and CLI reporting the TYVM price in TON, USD and RUB.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use teloxide::Bot;
use tracing_subscriber::{fmt, EnvFilter};

use tyvm_pricebot::adapters::cli::{CalcCmd, CliApp, Command, PriceCmd};
use tyvm_pricebot::adapters::rates::{BinanceTickerClient, CbrDailyClient};
use tyvm_pricebot::adapters::telegram::run_bot;
use tyvm_pricebot::adapters::webdriver::{WebDriverBalances, WebDriverConfig};
use tyvm_pricebot::application::{ConversationEngine, MessageLabels, PriceAggregator};
use tyvm_pricebot::config::{load_config, load_wallets, Config};
use tyvm_pricebot::domain::{format_grouped, parse_amount};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (bot token goes here, not in the config)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    let config_path = app.command.config_path().to_path_buf();
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    init_logging(app.verbose, app.debug, &config.logging.level);

    match app.command {
        Command::Run(_) => run_command(&config).await,
        Command::Price(cmd) => price_command(cmd, &config).await,
        Command::Calc(cmd) => calc_command(cmd, &config).await,
        Command::Wallets(_) => wallets_command(&config),
    }
}

/// RUST_LOG wins, then --debug / --verbose, then the configured level
fn init_logging(verbose: bool, debug: bool, config_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("debug")
        } else if verbose {
            EnvFilter::new("info")
        } else {
            EnvFilter::new(config_level)
        }
    });

    fmt().with_env_filter(filter).init();
}

fn build_aggregator(config: &Config) -> Result<PriceAggregator> {
    let wallets = load_wallets(config.wallets_path())
        .context("Failed to load wallet source")?;

    let balances = WebDriverBalances::new(WebDriverConfig::from(config))
        .context("Failed to create WebDriver client")?;
    let anchor = BinanceTickerClient::new(
        config.rates.anchor_ticker_url.clone(),
        config.rates.anchor_pair.clone(),
        config.rate_timeout(),
    )
    .context("Failed to create Binance client")?;
    let local = CbrDailyClient::new(
        config.rates.local_feed_url.clone(),
        config.rates.local_char_code.clone(),
        config.rate_timeout(),
    )
    .context("Failed to create central bank client")?;

    Ok(PriceAggregator::new(wallets, Arc::new(balances), Arc::new(anchor), Arc::new(local))
        .with_allocation(config.token.allocation))
}

async fn run_command(config: &Config) -> Result<()> {
    tracing::info!("Starting TYVM price bot...");

    let token = config.telegram.get_bot_token()
        .context("Telegram bot token missing: set TELEGRAM_BOT_TOKEN or telegram.bot_token")?;

    let aggregator = build_aggregator(config)?;
    let engine = ConversationEngine::new(aggregator, MessageLabels::from(config));

    run_bot(Bot::new(token), Arc::new(engine)).await;
    Ok(())
}

async fn price_command(cmd: PriceCmd, config: &Config) -> Result<()> {
    let aggregator = build_aggregator(config)?;

    let snapshot = aggregator.compute_price().await
        .context("Failed to compute price")?;
    let rounded = snapshot.rounded();

    if cmd.json {
        let out = serde_json::json!({ "snapshot": snapshot, "rounded": rounded });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let symbol = &config.token.symbol;
    for (wallet, balance) in aggregator.wallets().iter().zip(&snapshot.per_wallet_balances) {
        println!("{:<24} {:>20}", wallet.name, format_grouped(*balance));
    }
    println!();
    println!("Total tokens: {}", format_grouped(snapshot.total_supply));
    println!("Allocation:   {}", format_grouped(aggregator.allocation()));
    println!("{} in {}: {}", symbol, config.token.anchor_symbol, rounded.price_in_anchor);
    println!("{} in USD: ${} ({} ${})", symbol, rounded.price_in_usd, config.token.anchor_symbol, rounded.anchor_usd_rate);
    println!("{} in {}: {} (USD {})", symbol, config.token.local_symbol, rounded.price_in_local, rounded.usd_to_local_rate);
    println!("Fetched at {}", snapshot.fetched_at.to_rfc3339());
    Ok(())
}

async fn calc_command(cmd: CalcCmd, config: &Config) -> Result<()> {
    let amount = parse_amount(&cmd.amount)
        .with_context(|| format!("Invalid amount '{}'", cmd.amount))?;

    let aggregator = build_aggregator(config)?;
    let snapshot = aggregator.compute_price().await
        .context("Failed to compute price")?;
    let valuation = snapshot.value_of(amount);

    println!("Value of {} {}:", format_grouped(amount), config.token.symbol);
    println!("  In {}: {}", config.token.anchor_symbol, format_grouped(valuation.in_anchor));
    println!("  In USD: {}", format_grouped(valuation.in_usd));
    println!("  In {}: {}", config.token.local_symbol, format_grouped(valuation.in_local));
    Ok(())
}

fn wallets_command(config: &Config) -> Result<()> {
    let wallets = load_wallets(config.wallets_path())?;

    for (i, wallet) in wallets.iter().enumerate() {
        println!("{}. {} ({})", i + 1, wallet.name, wallet.address);
        println!("   locator: {}", wallet.locator);
    }
    println!("{} wallets", wallets.len());
    Ok(())
}
