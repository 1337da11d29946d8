//! REPL runner: converts teloxide messages to core::Message and passes them to HandlerChain.
//! Each message is handled in its own task, so slow OCR or translation never blocks polling.

use anyhow::Result;
use dbot_core::ToCoreMessage;
use handler_chain::HandlerChain;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use super::adapters::TelegramMessageWrapper;

/// Starts long polling with the given teloxide Bot and HandlerChain. Returns when polling stops
/// (e.g. Ctrl-C).
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => info!(
            username = ?me.user.username,
            "Connected to Telegram, starting polling"
        ),
        Err(e) => error!(error = %e, "getMe failed; polling anyway"),
    }

    teloxide::repl(bot, move |msg: teloxide::types::Message| {
        let chain = handler_chain.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();

            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                kind = core_msg.content.kind(),
                "Received message"
            );

            tokio::spawn(async move {
                if let Err(e) = chain.handle(&core_msg).await {
                    error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
                }
            });

            respond(())
        }
    })
    .await;

    info!("Polling stopped");
    Ok(())
}
