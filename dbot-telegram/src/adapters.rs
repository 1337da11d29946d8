//! Adapters from Telegram (teloxide) types to dbot_core types.
//! Depends only on teloxide and dbot_core type definitions.

use dbot_core::{Chat, Message, MessageContent, ToCoreMessage, ToCoreUser, User};
use teloxide::types::PhotoSize;

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Picks the highest-resolution variant Telegram sent for a photo.
pub fn largest_photo(sizes: &[PhotoSize]) -> Option<&PhotoSize> {
    sizes
        .iter()
        .max_by_key(|p| u64::from(p.width) * u64::from(p.height))
}

/// Wraps a teloxide Message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: 0,
                    username: None,
                    first_name: None,
                    last_name: None,
                }),
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: format!("{:?}", self.0.chat.kind),
            },
            content: self.content(),
            created_at: chrono::Utc::now(),
        }
    }
}

impl<'a> TelegramMessageWrapper<'a> {
    fn content(&self) -> MessageContent {
        if let Some(text) = self.0.text() {
            return MessageContent::Text(text.to_string());
        }
        match self.0.photo().and_then(largest_photo) {
            Some(photo) => MessageContent::Photo {
                file_id: photo.file.id.0.clone(),
                caption: self.0.caption().map(str::to_string),
            },
            None => MessageContent::Other,
        }
    }
}
