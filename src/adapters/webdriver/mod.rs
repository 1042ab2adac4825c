//! WebDriver Adapter
//!
//! Scrapes holder balances from the explorer page through a W3C WebDriver
//! endpoint. Locators are XPath expressions.

mod client;

pub use client::{WebDriverBalances, WebDriverConfig, ELEMENT_KEY};
