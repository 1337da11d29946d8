//! Bot abstraction for talking back to the chat transport.
//!
//! [`Bot`] is transport-agnostic; dbot-telegram implements it via teloxide and tests substitute
//! recording mocks.

use crate::error::{DbotError, Result};
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Outbound side of the transport: replies, the typing indicator and file downloads.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat, quoting it when the transport supports it).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Shows the "typing…" indicator in the chat.
    async fn send_typing(&self, chat: &Chat) -> Result<()>;
    /// Downloads a file by its transport file reference and returns the raw bytes.
    async fn fetch_file(&self, file_id: &str) -> Result<Vec<u8>>;
}

/// Parses a message id string into an i32. Used when quoting a message in a reply.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| DbotError::Bot(format!("Invalid message_id: {}", s)))
}
