use async_trait::async_trait;
use dbot_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument};

/// Logs each message in before() and the response in after(); always continues.
/// Message text is not logged, only its kind and size.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            kind = message.content.kind(),
            chars = message.text().map(|t| t.chars().count()).unwrap_or(0),
            "Handling message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        let replied = matches!(response, HandlerResponse::Reply(_));
        debug!(message_id = %message.id, replied = replied, "Processed message");
        Ok(())
    }
}
