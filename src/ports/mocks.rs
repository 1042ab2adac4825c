//! Stub collaborators for tests and offline runs
//!
//! Controlled responses plus call recording, mirroring the port traits.

use std::sync::{Arc, Mutex};
use async_trait::async_trait;

use super::balances::{BalanceError, WalletBalanceProvider};
use super::chat::{OutboundMessage, ReplySink, TransportError};
use super::rates::{RateError, RateProvider};

/// Balance provider that returns fixed readings
#[derive(Debug, Default, Clone)]
pub struct StubBalances {
    readings: Arc<Mutex<Option<Vec<Option<String>>>>>,
    calls: Arc<Mutex<usize>>,
}

impl StubBalances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: every locator reads as the given number
    pub fn with_balances(self, balances: &[f64]) -> Self {
        let readings = balances.iter().map(|b| Some(b.to_string())).collect();
        self.with_readings(readings)
    }

    /// Builder method: raw readings, `None` for a missing element
    pub fn with_readings(self, readings: Vec<Option<String>>) -> Self {
        *self.readings.lock().unwrap() = Some(readings);
        self
    }

    /// Number of times balances were read
    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl WalletBalanceProvider for StubBalances {
    async fn read_balances(&self, _locators: &[String])
        -> Result<Vec<Option<String>>, BalanceError> {
        *self.calls.lock().unwrap() += 1;
        self.readings
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| BalanceError::NavigationError("No readings configured".to_string()))
    }
}

/// Rate feed that returns a fixed rate
#[derive(Debug, Clone)]
pub struct StubRate {
    name: &'static str,
    rate: Option<f64>,
    calls: Arc<Mutex<usize>>,
}

impl StubRate {
    pub fn new(name: &'static str, rate: f64) -> Self {
        Self { name, rate: Some(rate), calls: Arc::default() }
    }

    /// A feed whose every fetch fails
    pub fn failing(name: &'static str) -> Self {
        Self { name, rate: None, calls: Arc::default() }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl RateProvider for StubRate {
    fn feed_name(&self) -> &'static str {
        self.name
    }

    async fn fetch_rate(&self) -> Result<f64, RateError> {
        *self.calls.lock().unwrap() += 1;
        self.rate
            .ok_or_else(|| RateError::ParseError("No rate configured".to_string()))
    }
}

/// Reply sink that records every message
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<OutboundMessage> {
        self.sent.lock().unwrap().last().cloned()
    }

    /// Drain recorded messages
    pub fn take(&self) -> Vec<OutboundMessage> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }
}

#[async_trait]
impl ReplySink for RecordingSink {
    async fn send(&self, message: OutboundMessage) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}
