//! W3C WebDriver client
//!
//! Talks to a running chromedriver (or any W3C-compliant driver) over HTTP.
//! One browser session is opened per scrape: navigate to the holders page,
//! read every locator, then delete the session.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::ports::{BalanceError, WalletBalanceProvider};

/// Key under which W3C drivers return element references
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Driver error codes that only affect a single wallet
const ELEMENT_ERRORS: &[&str] = &["no such element", "stale element reference", "invalid selector"];

/// WebDriver scraper configuration
#[derive(Debug, Clone)]
pub struct WebDriverConfig {
    /// Driver endpoint, e.g. http://localhost:9515
    pub webdriver_url: String,
    /// Page that displays the holder balances
    pub page_url: String,
    pub headless: bool,
    /// How long the driver waits for an element to appear
    pub implicit_wait: Duration,
    /// HTTP timeout for each driver command
    pub timeout: Duration,
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            page_url: "https://tonviewer.com/EQAaAXF948uK1jAi4RyM5ywd_ggIjx8uZK4WL5GZX6HlkEAX?section=holders".to_string(),
            headless: true,
            implicit_wait: Duration::from_secs(10),
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug)]
enum CommandError {
    Http(reqwest::Error),
    Driver { error: String, message: String },
}

impl CommandError {
    fn is_element_error(&self) -> bool {
        matches!(self, CommandError::Driver { error, .. } if ELEMENT_ERRORS.contains(&error.as_str()))
    }

    fn describe(&self) -> String {
        match self {
            CommandError::Http(e) => e.to_string(),
            CommandError::Driver { error, message } => format!("{}: {}", error, message),
        }
    }
}

impl From<reqwest::Error> for CommandError {
    fn from(e: reqwest::Error) -> Self {
        CommandError::Http(e)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    value: Value,
}

#[derive(Debug, Deserialize)]
struct NewSession {
    #[serde(rename = "sessionId")]
    session_id: String,
}

/// Balance provider backed by a WebDriver browser session
#[derive(Debug, Clone)]
pub struct WebDriverBalances {
    http: Client,
    config: WebDriverConfig,
}

impl WebDriverBalances {
    pub fn new(config: WebDriverConfig) -> Result<Self, BalanceError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.webdriver_url.trim_end_matches('/'), path)
    }

    async fn command(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, CommandError> {
        let mut req = self.http.request(method, self.url(path));
        if let Some(body) = body {
            req = req.json(&body);
        }

        let response = req.send().await?;
        let status = response.status();
        let envelope: Envelope = response.json().await?;

        if status.is_success() {
            return Ok(envelope.value);
        }

        let field = |name: &str| {
            envelope.value
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let error = field("error");
        Err(CommandError::Driver {
            error: if error.is_empty() { format!("HTTP {}", status.as_u16()) } else { error },
            message: field("message"),
        })
    }

    fn capabilities(&self) -> Value {
        let mut args = vec!["--no-sandbox", "--disable-dev-shm-usage"];
        if self.config.headless {
            args.push("--headless=new");
        }
        json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "goog:chromeOptions": { "args": args }
                }
            }
        })
    }

    async fn open_session(&self) -> Result<String, BalanceError> {
        let value = self
            .command(Method::POST, "/session", Some(self.capabilities()))
            .await
            .map_err(|e| BalanceError::SessionError(e.describe()))?;

        let session: NewSession = serde_json::from_value(value)
            .map_err(|e| BalanceError::ProtocolError(format!("new session response: {}", e)))?;
        tracing::debug!("Opened WebDriver session {}", session.session_id);
        Ok(session.session_id)
    }

    async fn close_session(&self, session: &str) {
        let path = format!("/session/{}", session);
        if let Err(e) = self.command(Method::DELETE, &path, None).await {
            tracing::warn!("Failed to close WebDriver session {}: {}", session, e.describe());
        }
    }

    async fn load_page(&self, session: &str) -> Result<(), BalanceError> {
        let implicit_ms = self.config.implicit_wait.as_millis() as u64;
        self.command(
            Method::POST,
            &format!("/session/{}/timeouts", session),
            Some(json!({ "implicit": implicit_ms })),
        )
        .await
        .map_err(|e| BalanceError::ProtocolError(e.describe()))?;

        self.command(
            Method::POST,
            &format!("/session/{}/url", session),
            Some(json!({ "url": self.config.page_url })),
        )
        .await
        .map_err(|e| BalanceError::NavigationError(e.describe()))?;
        Ok(())
    }

    async fn element_text(&self, session: &str, xpath: &str) -> Result<String, CommandError> {
        let value = self
            .command(
                Method::POST,
                &format!("/session/{}/element", session),
                Some(json!({ "using": "xpath", "value": xpath })),
            )
            .await?;

        let element = value
            .get(ELEMENT_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| CommandError::Driver {
                error: "invalid element reference".to_string(),
                message: value.to_string(),
            })?;

        let text = self
            .command(
                Method::GET,
                &format!("/session/{}/element/{}/text", session, element),
                None,
            )
            .await?;
        Ok(text.as_str().unwrap_or_default().to_string())
    }

    async fn read_in_session(&self, session: &str, locators: &[String])
        -> Result<Vec<Option<String>>, BalanceError> {
        self.load_page(session).await?;

        let mut readings = Vec::with_capacity(locators.len());
        for locator in locators {
            match self.element_text(session, locator).await {
                Ok(text) => readings.push(Some(text)),
                Err(e) if e.is_element_error() => {
                    tracing::warn!("Balance element '{}' unreadable: {}", locator, e.describe());
                    readings.push(None);
                }
                Err(CommandError::Http(e)) => return Err(BalanceError::HttpError(e)),
                Err(e) => return Err(BalanceError::ProtocolError(e.describe())),
            }
        }
        Ok(readings)
    }
}

#[async_trait]
impl WalletBalanceProvider for WebDriverBalances {
    async fn read_balances(&self, locators: &[String])
        -> Result<Vec<Option<String>>, BalanceError> {
        let session = self.open_session().await?;
        let result = self.read_in_session(&session, locators).await;
        self.close_session(&session).await;
        result
    }
}
