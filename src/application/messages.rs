//! Outbound message rendering
//!
//! Every piece of free text and every number is escaped exactly once here,
//! right before it is joined into the final MarkdownV2 message.

use crate::domain::{
    escape_markdown, format_grouped_escaped, markdown_link, PriceSnapshot, Valuation,
    WalletRegistry,
};
use crate::ports::OutboundMessage;

use super::aggregator::DataUnavailable;

/// Names and links used in replies
#[derive(Debug, Clone)]
pub struct MessageLabels {
    pub token_symbol: String,
    pub anchor_symbol: String,
    pub local_symbol: String,
    /// Explorer base URL, wallet addresses are appended as a path segment
    pub explorer_url: String,
}

impl Default for MessageLabels {
    fn default() -> Self {
        Self {
            token_symbol: "TYVM".to_string(),
            anchor_symbol: "TON".to_string(),
            local_symbol: "RUB".to_string(),
            explorer_url: "https://tonviewer.com".to_string(),
        }
    }
}

impl MessageLabels {
    pub fn greeting(&self) -> OutboundMessage {
        let text = format!(
            "Hi! Press 'Price' to see the current {} price or 'Calculator' to value an amount of tokens.",
            self.token_symbol
        );
        OutboundMessage::markdown(escape_markdown(&text)).with_menu()
    }

    pub fn computing_notice(&self) -> OutboundMessage {
        OutboundMessage::plain("Calculating, this may take a few seconds...")
    }

    pub fn amount_prompt(&self) -> OutboundMessage {
        OutboundMessage::plain(format!(
            "Enter the number of {} tokens you want to value:",
            self.token_symbol
        ))
    }

    pub fn invalid_amount(&self) -> OutboundMessage {
        OutboundMessage::plain("Please enter a valid number of tokens.")
    }

    pub fn failure(&self, error: &DataUnavailable) -> OutboundMessage {
        OutboundMessage::markdown(escape_markdown(&format!("Price calculation failed: {error}")))
    }

    fn explorer_link(&self, address: &str) -> String {
        format!("{}/{}", self.explorer_url.trim_end_matches('/'), address)
    }

    /// Full price report: per-wallet balances, supply, three prices
    pub fn snapshot(&self, snapshot: &PriceSnapshot, wallets: &WalletRegistry) -> OutboundMessage {
        let mut lines = Vec::with_capacity(wallets.len() + 6);

        for (i, (wallet, balance)) in wallets.iter().zip(&snapshot.per_wallet_balances).enumerate() {
            let link = markdown_link(&wallet.name, &self.explorer_link(&wallet.address));
            lines.push(format!(
                "{}\\. {}, tokens: {}",
                i + 1,
                link,
                format_grouped_escaped(*balance)
            ));
        }

        let rounded = snapshot.rounded();
        let token = escape_markdown(&self.token_symbol);
        let anchor = escape_markdown(&self.anchor_symbol);
        let local = escape_markdown(&self.local_symbol);

        lines.push(String::new());
        lines.push(format!("Total tokens: {}", format_grouped_escaped(snapshot.total_supply)));
        lines.push(String::new());
        lines.push(format!(
            "{token} price in {anchor}: {}",
            format_grouped_escaped(rounded.price_in_anchor)
        ));
        lines.push(format!(
            "{token} price in USD: \\${} \\({anchor} \\${}\\)",
            format_grouped_escaped(rounded.price_in_usd),
            format_grouped_escaped(rounded.anchor_usd_rate)
        ));
        lines.push(format!(
            "{token} price in {local}: {} \\(USD {}\\)",
            format_grouped_escaped(rounded.price_in_local),
            format_grouped_escaped(rounded.usd_to_local_rate)
        ));

        OutboundMessage::markdown(lines.join("\n"))
    }

    /// Calculator result for one amount
    pub fn valuation(&self, valuation: &Valuation) -> OutboundMessage {
        let text = format!(
            "Value of {} {}:\n\nIn {}: {}\nIn USD: {}\nIn {}: {}",
            format_grouped_escaped(valuation.amount),
            escape_markdown(&self.token_symbol),
            escape_markdown(&self.anchor_symbol),
            format_grouped_escaped(valuation.in_anchor),
            format_grouped_escaped(valuation.in_usd),
            escape_markdown(&self.local_symbol),
            format_grouped_escaped(valuation.in_local),
        );
        OutboundMessage::markdown(text)
    }
}
