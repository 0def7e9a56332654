//! Telegram adapter (teloxide).
//!
//! This crate implements the `hsb-core` Notifier port over the Telegram
//! Bot API. Sends are single-shot: retrying is the poll loop's business.

use async_trait::async_trait;

use teloxide::prelude::*;

use hsb_core::{domain::ChatId, errors::Error, ports::Notifier, Result};

#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    pub fn from_token(token: &str) -> Self {
        Self::new(Bot::new(token))
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<()> {
        tracing::debug!("sending message to chat {}: {text}", chat_id.0);

        self.bot
            .send_message(Self::tg_chat(chat_id), text.to_string())
            .await
            .map_err(|e| Error::Delivery(format!("failed to send {text:?}: {e}")))?;

        tracing::debug!("message delivered to chat {}", chat_id.0);
        Ok(())
    }
}
