use async_trait::async_trait;
use thiserror::Error;

/// Chat user identifier
pub type UserId = i64;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to deliver message: {0}")]
    SendError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    MarkdownV2,
}

/// A message to deliver to the user who sent the current update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub text: String,
    pub format: TextFormat,
    /// Attach the Price / Calculator menu keyboard
    pub show_menu: bool,
}

impl OutboundMessage {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), format: TextFormat::Plain, show_menu: false }
    }

    /// `text` must already be escaped
    pub fn markdown(text: impl Into<String>) -> Self {
        Self { text: text.into(), format: TextFormat::MarkdownV2, show_menu: false }
    }

    pub fn with_menu(mut self) -> Self {
        self.show_menu = true;
        self
    }
}

/// Outbound side of the chat transport
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send(&self, message: OutboundMessage) -> Result<(), TransportError>;
}
