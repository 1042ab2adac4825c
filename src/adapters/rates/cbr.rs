use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::ports::{RateError, RateProvider};

pub const CBR_DAILY_API: &str = "https://www.cbr.ru/scripts/XML_daily.asp";
pub const DEFAULT_CHAR_CODE: &str = "USD";

/// USD-to-RUB rate from the Bank of Russia daily rates feed
#[derive(Debug, Clone)]
pub struct CbrDailyClient {
    http: Client,
    api_url: String,
    char_code: String,
}

impl CbrDailyClient {
    pub fn new(api_url: impl Into<String>, char_code: impl Into<String>, timeout: Duration) -> Result<Self, RateError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            api_url: api_url.into(),
            char_code: char_code.into(),
        })
    }

    /// Rubles per one unit of the configured currency
    pub async fn get_rate(&self) -> Result<f64, RateError> {
        let response = self.http.get(&self.api_url).send().await?;

        if !response.status().is_success() {
            return Err(RateError::StatusError(response.status().as_u16()));
        }

        // reqwest decodes windows-1251 from the Content-Type charset
        let body = response.text().await?;
        rate_from_daily_xml(&body, &self.char_code)
    }
}

#[async_trait]
impl RateProvider for CbrDailyClient {
    fn feed_name(&self) -> &'static str {
        "cbr"
    }

    async fn fetch_rate(&self) -> Result<f64, RateError> {
        self.get_rate().await
    }
}

#[derive(Debug, Deserialize)]
struct ValCurs {
    #[serde(rename = "Valute", default)]
    valutes: Vec<Valute>,
}

#[derive(Debug, Deserialize)]
struct Valute {
    #[serde(rename = "CharCode")]
    char_code: String,
    #[serde(rename = "Nominal")]
    nominal: String,
    #[serde(rename = "Value")]
    value: String,
}

/// Extract `Value / Nominal` for `char_code` from a `ValCurs` document.
///
/// Values use a comma as the decimal separator ("81,1234").
pub fn rate_from_daily_xml(xml: &str, char_code: &str) -> Result<f64, RateError> {
    let doc: ValCurs = quick_xml::de::from_str(xml)
        .map_err(|e| RateError::ParseError(format!("daily rates XML: {}", e)))?;

    let valute = doc.valutes
        .iter()
        .find(|v| v.char_code.trim() == char_code)
        .ok_or_else(|| RateError::MissingCurrency(char_code.to_string()))?;

    let value: f64 = valute.value
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|e| RateError::ParseError(format!("{} value '{}': {}", char_code, valute.value, e)))?;

    let nominal: u32 = valute.nominal
        .trim()
        .parse()
        .map_err(|e| RateError::ParseError(format!("{} nominal '{}': {}", char_code, valute.nominal, e)))?;

    if nominal == 0 {
        return Err(RateError::ParseError(format!("{} nominal is zero", char_code)));
    }

    Ok(value / nominal as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DAILY_XML: &str = r#"<?xml version="1.0" encoding="windows-1251"?>
<ValCurs Date="14.10.2026" name="Foreign Currency Market">
    <Valute ID="R01235">
        <NumCode>840</NumCode>
        <CharCode>USD</CharCode>
        <Nominal>1</Nominal>
        <Name>US Dollar</Name>
        <Value>81,5432</Value>
        <VunitRate>81,5432</VunitRate>
    </Valute>
    <Valute ID="R01375">
        <NumCode>156</NumCode>
        <CharCode>CNY</CharCode>
        <Nominal>10</Nominal>
        <Name>Yuan</Name>
        <Value>112,3450</Value>
        <VunitRate>11,2345</VunitRate>
    </Valute>
</ValCurs>"#;

    #[test]
    fn test_usd_rate() {
        let rate = rate_from_daily_xml(DAILY_XML, "USD").unwrap();
        assert!((rate - 81.5432).abs() < 1e-9);
    }

    #[test]
    fn test_rate_divided_by_nominal() {
        let rate = rate_from_daily_xml(DAILY_XML, "CNY").unwrap();
        assert!((rate - 11.2345).abs() < 1e-9);
    }

    #[test]
    fn test_missing_currency() {
        let err = rate_from_daily_xml(DAILY_XML, "EUR").unwrap_err();
        assert!(matches!(err, RateError::MissingCurrency(code) if code == "EUR"));
    }

    #[test]
    fn test_bad_value() {
        let xml = r#"<ValCurs><Valute><CharCode>USD</CharCode><Nominal>1</Nominal><Value>--</Value></Valute></ValCurs>"#;
        assert!(matches!(rate_from_daily_xml(xml, "USD"), Err(RateError::ParseError(_))));
    }

    #[test]
    fn test_zero_nominal() {
        let xml = r#"<ValCurs><Valute><CharCode>USD</CharCode><Nominal>0</Nominal><Value>80,0</Value></Valute></ValCurs>"#;
        assert!(matches!(rate_from_daily_xml(xml, "USD"), Err(RateError::ParseError(_))));
    }

    #[test]
    fn test_not_xml() {
        assert!(rate_from_daily_xml("<html><body>maintenance", "USD").is_err());
    }

    #[tokio::test]
    async fn test_fetch_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/scripts/XML_daily.asp"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(DAILY_XML, "application/xml"))
            .mount(&server)
            .await;

        let client = CbrDailyClient::new(
            format!("{}/scripts/XML_daily.asp", server.uri()),
            DEFAULT_CHAR_CODE,
            Duration::from_secs(5),
        )
        .unwrap();

        let rate = client.fetch_rate().await.unwrap();
        assert!((rate - 81.5432).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = CbrDailyClient::new(server.uri(), DEFAULT_CHAR_CODE, Duration::from_secs(5)).unwrap();
        assert!(matches!(client.fetch_rate().await, Err(RateError::StatusError(500))));
    }
}
