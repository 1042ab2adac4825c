//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching
//! config/pricebot.toml.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::adapters::rates::{BINANCE_TICKER_API, CBR_DAILY_API, DEFAULT_CHAR_CODE, DEFAULT_SYMBOL};
use crate::adapters::webdriver::WebDriverConfig;
use crate::application::{MessageLabels, DEFAULT_ALLOCATION};

/// Main configuration structure matching config/pricebot.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub token: TokenSection,
    pub wallets: WalletsSection,
    pub scraper: ScraperSection,
    #[serde(default)]
    pub rates: RatesSection,
    #[serde(default)]
    pub telegram: TelegramSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Token being priced
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSection {
    /// Token symbol shown in replies
    pub symbol: String,
    /// Total token allocation, numerator of the price
    #[serde(default = "default_allocation")]
    pub allocation: f64,
    /// Base chain currency (price is first expressed in it)
    #[serde(default = "default_anchor_symbol")]
    pub anchor_symbol: String,
    /// Local currency for the third price
    #[serde(default = "default_local_symbol")]
    pub local_symbol: String,
}

/// Wallet source
#[derive(Debug, Clone, Deserialize)]
pub struct WalletsSection {
    /// Path to the `name|locator|address` file (~ is expanded)
    pub path: String,
    /// Explorer base URL used for wallet links
    #[serde(default = "default_explorer_url")]
    pub explorer_url: String,
}

/// Holders page scraping
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperSection {
    /// W3C WebDriver endpoint (chromedriver)
    pub webdriver_url: String,
    /// Page showing the holder balances
    pub page_url: String,
    #[serde(default = "default_true")]
    pub headless: bool,
    /// Implicit element wait in milliseconds
    #[serde(default = "default_implicit_wait_ms")]
    pub implicit_wait_ms: u64,
    /// Per-command timeout in seconds
    #[serde(default = "default_scrape_timeout")]
    pub timeout_secs: u64,
}

impl ScraperSection {
    /// Get WebDriver URL with environment variable override
    /// Checks WEBDRIVER_URL env var first, falls back to config value
    pub fn get_webdriver_url(&self) -> String {
        std::env::var("WEBDRIVER_URL").unwrap_or_else(|_| self.webdriver_url.clone())
    }
}

/// Exchange-rate feeds
#[derive(Debug, Clone, Deserialize)]
pub struct RatesSection {
    /// Binance ticker endpoint
    #[serde(default = "default_anchor_url")]
    pub anchor_ticker_url: String,
    /// Ticker symbol, e.g. TONUSDT
    #[serde(default = "default_anchor_pair")]
    pub anchor_pair: String,
    /// Central bank daily rates XML endpoint
    #[serde(default = "default_local_url")]
    pub local_feed_url: String,
    /// Currency code looked up in the daily feed
    #[serde(default = "default_char_code")]
    pub local_char_code: String,
    /// HTTP timeout in seconds
    #[serde(default = "default_rate_timeout")]
    pub timeout_secs: u64,
}

impl Default for RatesSection {
    fn default() -> Self {
        Self {
            anchor_ticker_url: default_anchor_url(),
            anchor_pair: default_anchor_pair(),
            local_feed_url: default_local_url(),
            local_char_code: default_char_code(),
            timeout_secs: default_rate_timeout(),
        }
    }
}

/// Telegram bot section (optional)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TelegramSection {
    /// Bot token; prefer the TELEGRAM_BOT_TOKEN env var
    #[serde(default)]
    pub bot_token: Option<String>,
}

impl TelegramSection {
    /// Get bot token with environment variable fallback
    /// Checks TELEGRAM_BOT_TOKEN env var first, then the config value
    pub fn get_bot_token(&self) -> Option<String> {
        if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
            if !token.is_empty() {
                return Some(token);
            }
        }
        self.bot_token.clone().filter(|t| !t.is_empty())
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

fn default_allocation() -> f64 { DEFAULT_ALLOCATION }
fn default_anchor_symbol() -> String { "TON".to_string() }
fn default_local_symbol() -> String { "RUB".to_string() }
fn default_explorer_url() -> String { "https://tonviewer.com".to_string() }
fn default_true() -> bool { true }
fn default_implicit_wait_ms() -> u64 { 10_000 }
fn default_scrape_timeout() -> u64 { 60 }
fn default_anchor_url() -> String { BINANCE_TICKER_API.to_string() }
fn default_anchor_pair() -> String { DEFAULT_SYMBOL.to_string() }
fn default_local_url() -> String { CBR_DAILY_API.to_string() }
fn default_char_code() -> String { DEFAULT_CHAR_CODE.to_string() }
fn default_rate_timeout() -> u64 { 10 }

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Failed to read wallet source {path}: {source}")]
    WalletSourceError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.symbol.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "token.symbol cannot be empty".to_string(),
            ));
        }

        if !self.token.allocation.is_finite() || self.token.allocation <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "token.allocation must be > 0, got {}",
                self.token.allocation
            )));
        }

        if self.wallets.path.is_empty() {
            return Err(ConfigError::ValidationError(
                "wallets.path cannot be empty".to_string(),
            ));
        }

        let urls = [
            ("scraper.webdriver_url", &self.scraper.webdriver_url),
            ("scraper.page_url", &self.scraper.page_url),
            ("rates.anchor_ticker_url", &self.rates.anchor_ticker_url),
            ("rates.local_feed_url", &self.rates.local_feed_url),
        ];
        for (name, url) in urls {
            if url.is_empty() {
                return Err(ConfigError::ValidationError(format!("{} cannot be empty", name)));
            }
        }

        if self.scraper.timeout_secs == 0 || self.rates.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeouts must be > 0 seconds".to_string(),
            ));
        }

        if self.rates.anchor_pair.is_empty() || self.rates.local_char_code.is_empty() {
            return Err(ConfigError::ValidationError(
                "rates.anchor_pair and rates.local_char_code cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Wallet source path with ~ expanded
    pub fn wallets_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.wallets.path).to_string())
    }

    pub fn rate_timeout(&self) -> Duration {
        Duration::from_secs(self.rates.timeout_secs)
    }
}

impl From<&Config> for WebDriverConfig {
    fn from(config: &Config) -> Self {
        WebDriverConfig {
            webdriver_url: config.scraper.get_webdriver_url(),
            page_url: config.scraper.page_url.clone(),
            headless: config.scraper.headless,
            implicit_wait: Duration::from_millis(config.scraper.implicit_wait_ms),
            timeout: Duration::from_secs(config.scraper.timeout_secs),
        }
    }
}

impl From<&Config> for MessageLabels {
    fn from(config: &Config) -> Self {
        MessageLabels {
            token_symbol: config.token.symbol.clone(),
            anchor_symbol: config.token.anchor_symbol.clone(),
            local_symbol: config.token.local_symbol.clone(),
            explorer_url: config.wallets.explorer_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_valid_config() -> String {
        r#"
[token]
symbol = "TYVM"
allocation = 571365.0
anchor_symbol = "TON"
local_symbol = "RUB"

[wallets]
path = "wallets.txt"
explorer_url = "https://tonviewer.com"

[scraper]
webdriver_url = "http://localhost:9515"
page_url = "https://tonviewer.com/EQAaAXF948uK1jAi4RyM5ywd_ggIjx8uZK4WL5GZX6HlkEAX?section=holders"
headless = true
implicit_wait_ms = 5000
timeout_secs = 60

[rates]
anchor_ticker_url = "https://api.binance.com/api/v3/ticker/price"
anchor_pair = "TONUSDT"
local_feed_url = "https://www.cbr.ru/scripts/XML_daily.asp"
local_char_code = "USD"
timeout_secs = 10

[logging]
level = "info"
"#
        .to_string()
    }

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let file = write_config(&create_valid_config());
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.token.symbol, "TYVM");
        assert_eq!(config.token.allocation, 571365.0);
        assert_eq!(config.rates.anchor_pair, "TONUSDT");
        assert_eq!(config.scraper.implicit_wait_ms, 5000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("/nonexistent/path/pricebot.toml");
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_optional_sections_use_defaults() {
        let minimal = r#"
[token]
symbol = "TYVM"

[wallets]
path = "wallets.txt"

[scraper]
webdriver_url = "http://localhost:9515"
page_url = "https://tonviewer.com/holders"
"#;
        let file = write_config(minimal);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.token.allocation, DEFAULT_ALLOCATION);
        assert_eq!(config.token.anchor_symbol, "TON");
        assert_eq!(config.rates.local_feed_url, CBR_DAILY_API);
        assert_eq!(config.rates.local_char_code, "USD");
        assert!(config.scraper.headless);
        assert_eq!(config.wallets.explorer_url, "https://tonviewer.com");
        assert!(config.telegram.bot_token.is_none());
    }

    #[test]
    fn test_invalid_allocation() {
        let invalid = create_valid_config().replace("allocation = 571365.0", "allocation = 0.0");
        let file = write_config(&invalid);
        assert!(matches!(
            load_config(file.path()).unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_empty_page_url_rejected() {
        let invalid = create_valid_config().replace(
            "page_url = \"https://tonviewer.com/EQAaAXF948uK1jAi4RyM5ywd_ggIjx8uZK4WL5GZX6HlkEAX?section=holders\"",
            "page_url = \"\"",
        );
        let file = write_config(&invalid);
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(msg) if msg.contains("page_url")));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let invalid = create_valid_config().replace("timeout_secs = 10", "timeout_secs = 0");
        let file = write_config(&invalid);
        assert!(matches!(
            load_config(file.path()).unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let file = write_config("[token\nsymbol = ");
        assert!(matches!(load_config(file.path()).unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_config_to_webdriver_config() {
        let file = write_config(&create_valid_config());
        let config = load_config(file.path()).unwrap();
        let wd = WebDriverConfig::from(&config);

        assert!(wd.page_url.ends_with("section=holders"));
        assert_eq!(wd.implicit_wait, Duration::from_millis(5000));
        assert_eq!(wd.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_config_to_labels() {
        let file = write_config(&create_valid_config());
        let config = load_config(file.path()).unwrap();
        let labels = MessageLabels::from(&config);

        assert_eq!(labels.token_symbol, "TYVM");
        assert_eq!(labels.local_symbol, "RUB");
    }
}
