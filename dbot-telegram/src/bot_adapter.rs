//! Wraps teloxide::Bot and implements [`dbot_core::Bot`]. Production code talks to Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use dbot_core::{parse_message_id, Bot as CoreBot, Chat, DbotError, Message, Result};
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{ChatAction, ChatId, FileId, MessageId, ReplyParameters};
use tracing::{debug, warn};

/// Thin wrapper around teloxide::Bot that implements dbot-core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        let id = match parse_message_id(&message.id) {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Cannot quote message, sending plain message");
                return self.send_message(&message.chat, text).await;
            }
        };
        self.bot
            .send_message(ChatId(message.chat.id), text.to_string())
            .reply_parameters(ReplyParameters::new(MessageId(id)))
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_typing(&self, chat: &Chat) -> Result<()> {
        self.bot
            .send_chat_action(ChatId(chat.id), ChatAction::Typing)
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn fetch_file(&self, file_id: &str) -> Result<Vec<u8>> {
        let file = self
            .bot
            .get_file(FileId(file_id.to_string()))
            .await
            .map_err(|e| DbotError::Download(e.to_string()))?;

        let mut buf: Vec<u8> = Vec::with_capacity(file.meta.size as usize);
        self.bot
            .download_file(&file.path, &mut buf)
            .await
            .map_err(|e| DbotError::Download(e.to_string()))?;

        debug!(file_id = %file_id, bytes = buf.len(), "Downloaded file");
        Ok(buf)
    }
}
