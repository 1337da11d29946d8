use anyhow::Result;
use dbot_core::{init_tracing, Bot};
use dbot_telegram::run_repl;
use handler_chain::HandlerChain;
use openai_client::mask_token;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::components::{build_bot_components, build_handler_chain};
use crate::config::BotConfig;

/// Main entry: init logging, validate config, build components and chain, then run the REPL until
/// polling stops.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    init_tracing(Some(config.log_file()))?;
    config.validate()?;

    info!(
        token = %mask_token(config.bot_token()),
        ocr_backend = %config.ocr.backend,
        ocr_languages = %config.ocr.languages,
        preprocess = config.ocr.preprocess,
        translation_backend = %config.translation.backend,
        "Initializing translator bot"
    );

    let components = build_bot_components(&config, None).await?;
    let handler_chain = build_handler_chain(&components);

    info!(handlers = handler_chain.len(), "Bot started");
    run_repl(components.teloxide_bot, handler_chain).await?;

    info!("Bot stopped");
    Ok(())
}

/// Builds the full handler chain around `bot` without connecting to Telegram.
#[doc(hidden)]
pub async fn build_handler_chain_only(
    config: &BotConfig,
    bot: Arc<dyn Bot>,
) -> Result<HandlerChain> {
    config.validate()?;
    let components = build_bot_components(config, Some(bot)).await?;
    Ok(build_handler_chain(&components))
}
