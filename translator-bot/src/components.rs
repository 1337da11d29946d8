//! Component factory: builds backends, the pipeline orchestrator and the handler chain from config.
//! Isolates assembly logic from runner.

use anyhow::Result;
use async_trait::async_trait;
use dbot_core::Bot;
use dbot_telegram::TelegramBotAdapter;
use handler_chain::HandlerChain;
use ocr_client::{TesseractRecognizer, TextRecognizer, VisionRecognizer};
use openai_client::{mask_token, OpenAIClient};
use std::sync::Arc;
use translate_pipeline::{
    FetchError, FileFetcher, PipelineOptions, PipelineOrchestrator, RecognitionExtractor,
    TranslationResolver,
};
use translation_client::{GoogleTranslateClient, OpenAITranslator, TranslationBackend};
use tracing::{info, instrument, warn};

use crate::config::{BotConfig, OcrBackendKind, TranslationBackendKind};
use crate::handlers::{LoggingHandler, StartHandler, TranslateHandler};

/// Everything run_bot needs: the raw teloxide Bot for polling, the core Bot used for replies, and
/// the shared pipeline.
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    pub bot: Arc<dyn Bot>,
    pub orchestrator: PipelineOrchestrator,
}

/// Downloads photos through the chat transport.
pub struct BotFileFetcher {
    bot: Arc<dyn Bot>,
}

impl BotFileFetcher {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl FileFetcher for BotFileFetcher {
    async fn fetch(&self, file_id: &str) -> std::result::Result<Vec<u8>, FetchError> {
        self.bot
            .fetch_file(file_id)
            .await
            .map_err(|e| FetchError(e.to_string()))
    }
}

fn openai_client(config: &BotConfig) -> Result<OpenAIClient> {
    let api_key = config
        .openai
        .api_key
        .clone()
        .ok_or_else(|| anyhow::anyhow!("OPENAI_API_KEY is required for the OpenAI backends"))?;
    info!(
        api_key = %mask_token(&api_key),
        base_url = %config.openai.base_url,
        "Using OpenAI-compatible API"
    );
    Ok(OpenAIClient::with_base_url(
        api_key,
        config.openai.base_url.clone(),
    ))
}

/// Builds the configured OCR backend. For Tesseract, missing language data is only warned about:
/// recognition itself reports EngineUnavailable per message.
#[instrument(skip(config))]
pub async fn build_recognizer(config: &BotConfig) -> Result<Arc<dyn TextRecognizer>> {
    match config.ocr_backend()? {
        OcrBackendKind::Tesseract => {
            let recognizer = TesseractRecognizer::with_command(config.ocr.tesseract_cmd.clone());
            match recognizer.missing_languages(&config.language_hint()).await {
                Ok(missing) if missing.is_empty() => {
                    info!(command = %recognizer.command(), languages = %config.ocr.languages, "Tesseract ready");
                }
                Ok(missing) => {
                    warn!(missing = ?missing, "Tesseract language data not installed");
                }
                Err(e) => {
                    warn!(error = %e, command = %recognizer.command(), "Tesseract not usable, photos will fail until it is installed");
                }
            }
            Ok(Arc::new(recognizer))
        }
        OcrBackendKind::Vision => {
            let client = openai_client(config)?;
            info!(model = %config.openai.vision_model, "Using vision model for OCR");
            Ok(Arc::new(VisionRecognizer::new(
                client,
                config.openai.vision_model.clone(),
            )))
        }
    }
}

/// Builds the configured translation backend.
pub fn build_translation_backend(config: &BotConfig) -> Result<Arc<dyn TranslationBackend>> {
    match config.translation_backend()? {
        TranslationBackendKind::Google => {
            info!(url = %config.translation.google_url, "Using Google Translate");
            Ok(Arc::new(GoogleTranslateClient::with_base_url(
                config.translation.google_url.clone(),
            )))
        }
        TranslationBackendKind::OpenAI => {
            let client = openai_client(config)?;
            info!(model = %config.openai.translation_model, "Using LLM translation");
            Ok(Arc::new(OpenAITranslator::new(
                client,
                config.openai.translation_model.clone(),
            )))
        }
    }
}

/// Assembles the pipeline around the given transport Bot.
pub async fn build_orchestrator(
    config: &BotConfig,
    bot: Arc<dyn Bot>,
) -> Result<PipelineOrchestrator> {
    let recognizer = build_recognizer(config).await?;
    let backend = build_translation_backend(config)?;

    let options = PipelineOptions {
        preprocess: config.ocr.preprocess,
        temp_dir: config.pipeline.temp_dir.clone(),
        stage_timeout: config.stage_timeout(),
    };

    Ok(PipelineOrchestrator::new(
        Arc::new(BotFileFetcher::new(bot)),
        RecognitionExtractor::new(recognizer, config.language_hint()),
        TranslationResolver::new(backend),
        options,
    ))
}

/// Builds all components. `bot_override` replaces the Telegram adapter (tests use a recording Bot).
#[instrument(skip(config, bot_override))]
pub async fn build_bot_components(
    config: &BotConfig,
    bot_override: Option<Arc<dyn Bot>>,
) -> Result<BotComponents> {
    let teloxide_bot = config.telegram.build_bot()?;
    let bot: Arc<dyn Bot> = match bot_override {
        Some(bot) => bot,
        None => Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())),
    };
    let orchestrator = build_orchestrator(config, bot.clone()).await?;

    Ok(BotComponents {
        teloxide_bot,
        bot,
        orchestrator,
    })
}

/// Chain order: logging → `/start` → translate.
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(StartHandler::new(components.bot.clone())))
        .add_handler(Arc::new(TranslateHandler::new(
            components.bot.clone(),
            components.orchestrator.clone(),
        )))
}
