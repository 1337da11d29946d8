//! Core types: user, chat, message content, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat (channel or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// What an incoming message carries. Photos keep only the transport file reference of the
/// largest variant; bytes are fetched on demand through [`crate::Bot::fetch_file`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageContent {
    Text(String),
    Photo {
        file_id: String,
        caption: Option<String>,
    },
    /// Stickers, voice, documents and anything else the bot does not react to.
    Other,
}

impl MessageContent {
    /// Short label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            MessageContent::Text(_) => "text",
            MessageContent::Photo { .. } => "photo",
            MessageContent::Other => "other",
        }
    }
}

/// A single incoming message with user, chat and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: MessageContent,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Text body if this is a text message.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            MessageContent::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// True for text messages that start with `/`.
    pub fn is_command(&self) -> bool {
        self.text()
            .map(|t| t.trim_start().starts_with('/'))
            .unwrap_or(false)
    }
}

/// Handler result for the chain. `Reply(text)` carries the response body so later handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach the reply text that was sent.
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(content: MessageContent) -> Message {
        Message {
            id: "1".to_string(),
            user: User {
                id: 1,
                username: None,
                first_name: None,
                last_name: None,
            },
            chat: Chat {
                id: 1,
                chat_type: "private".to_string(),
            },
            content,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_text_only_for_text_content() {
        assert_eq!(
            message(MessageContent::Text("hi".to_string())).text(),
            Some("hi")
        );
        let photo = message(MessageContent::Photo {
            file_id: "f".to_string(),
            caption: Some("caption".to_string()),
        });
        assert_eq!(photo.text(), None);
        assert_eq!(message(MessageContent::Other).text(), None);
    }

    #[test]
    fn test_is_command() {
        assert!(message(MessageContent::Text("/start".to_string())).is_command());
        assert!(message(MessageContent::Text("  /help me".to_string())).is_command());
        assert!(!message(MessageContent::Text("hello /start".to_string())).is_command());
        assert!(!message(MessageContent::Other).is_command());
    }

    #[test]
    fn test_content_kind() {
        assert_eq!(MessageContent::Text(String::new()).kind(), "text");
        assert_eq!(
            MessageContent::Photo {
                file_id: "f".to_string(),
                caption: None
            }
            .kind(),
            "photo"
        );
        assert_eq!(MessageContent::Other.kind(), "other");
    }
}
