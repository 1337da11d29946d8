//! Bot configuration: Telegram connectivity (from dbot-telegram) + OCR, translation and pipeline
//! settings. Loaded from env.

mod backends;
mod bot_config;


pub use backends::{OcrBackendKind, TranslationBackendKind};
pub use bot_config::{
    BotConfig, OcrConfig, OpenAIConfig, PipelineConfig, TranslationConfig, DEFAULT_LOG_FILE,
    DEFAULT_MODEL, DEFAULT_OPENAI_BASE_URL,
};
