//! Telegram Adapter
//!
//! Long-polling bot built on teloxide. Each text message is handed to the
//! `ConversationEngine` under the sender's user id, together with a
//! `ReplySink` bound to the chat it came from. The dispatcher runs chats concurrently and keeps the updates
//! of a single chat in order.

use std::sync::Arc;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, KeyboardButton, KeyboardMarkup, Message, ParseMode, Update};

use crate::application::{ConversationEngine, CALCULATOR_TRIGGER, PRICE_TRIGGER};
use crate::ports::{OutboundMessage, ReplySink, TextFormat, TransportError, UserId};

/// Two-button reply keyboard shown with the greeting
pub fn main_menu() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new(PRICE_TRIGGER),
        KeyboardButton::new(CALCULATOR_TRIGGER),
    ]])
    .resize_keyboard()
}

/// Session key for a message: the sender, never the chat
pub(crate) fn session_key(msg: &Message) -> Option<UserId> {
    msg.from.as_ref().map(|user| user.id.0 as UserId)
}

/// Replies to one chat
#[derive(Clone)]
pub struct ChatReplies {
    bot: Bot,
    chat: ChatId,
}

impl ChatReplies {
    pub fn new(bot: Bot, chat: ChatId) -> Self {
        Self { bot, chat }
    }
}

#[async_trait]
impl ReplySink for ChatReplies {
    async fn send(&self, message: OutboundMessage) -> Result<(), TransportError> {
        let mut request = self.bot.send_message(self.chat, message.text);
        if message.format == TextFormat::MarkdownV2 {
            request = request.parse_mode(ParseMode::MarkdownV2);
        }
        if message.show_menu {
            request = request.reply_markup(main_menu());
        }

        request
            .await
            .map(|_| ())
            .map_err(|e| TransportError::SendError(e.to_string()))
    }
}

async fn handle_message(
    bot: Bot,
    msg: Message,
    engine: Arc<ConversationEngine>,
) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let Some(user) = session_key(&msg) else {
        tracing::debug!("Ignoring message without sender in chat {}", msg.chat.id);
        return Ok(());
    };
    let replies = ChatReplies::new(bot, msg.chat.id);
    if let Err(e) = engine.handle(user, text, &replies).await {
        tracing::error!("Failed to reply to user {}: {}", user, e);
    }
    Ok(())
}

/// Poll for updates until Ctrl+C
pub async fn run_bot(bot: Bot, engine: Arc<ConversationEngine>) {
    tracing::info!("Telegram bot started, polling for updates");

    let handler = Update::filter_message().endpoint(handle_message);
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![engine])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    tracing::info!("Telegram bot stopped");
}
