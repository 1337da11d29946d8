//! Terminal handler: runs the translate pipeline and sends exactly one reply.

use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerResponse, Message, MessageContent, Result};
use std::sync::Arc;
use translate_pipeline::{InboundMessage, PipelineOrchestrator};
use tracing::{info, instrument, warn};

/// Telegram rejects messages longer than this, counted in UTF-16 code units.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

pub struct TranslateHandler {
    bot: Arc<dyn Bot>,
    orchestrator: PipelineOrchestrator,
}

impl TranslateHandler {
    pub fn new(bot: Arc<dyn Bot>, orchestrator: PipelineOrchestrator) -> Self {
        Self { bot, orchestrator }
    }
}

/// Maps chat content to pipeline input; `None` for content the bot does not react to.
pub fn to_inbound(content: &MessageContent) -> Option<InboundMessage> {
    match content {
        MessageContent::Text(text) => Some(InboundMessage::text(text.as_str())),
        MessageContent::Photo { file_id, .. } => Some(InboundMessage::photo(file_id.as_str())),
        MessageContent::Other => None,
    }
}

/// Cuts `text` to at most `limit` UTF-16 code units, marking the cut with an ellipsis.
/// Never splits a character.
pub fn truncate_for_telegram(text: &str, limit: usize) -> String {
    if text.encode_utf16().count() <= limit {
        return text.to_string();
    }
    let budget = limit.saturating_sub('…'.len_utf16());
    let mut used = 0;
    let mut cut = String::new();
    for c in text.chars() {
        used += c.len_utf16();
        if used > budget {
            break;
        }
        cut.push(c);
    }
    cut.push('…');
    cut
}

#[async_trait]
impl Handler for TranslateHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(inbound) = to_inbound(&message.content) else {
            return Ok(HandlerResponse::Ignore);
        };

        if let Err(e) = self.bot.send_typing(&message.chat).await {
            warn!(error = %e, "Failed to send typing indicator");
        }

        let outcome = self.orchestrator.process(&inbound).await;
        let reply = truncate_for_telegram(&outcome.render(), TELEGRAM_MESSAGE_LIMIT);

        self.bot.reply_to(message, &reply).await?;
        info!(outcome = outcome.kind(), "Reply sent");

        Ok(HandlerResponse::Reply(reply))
    }
}
