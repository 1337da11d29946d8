//! # Translator bot
//!
//! Telegram bot that translates text and photos: Russian goes to English, everything else goes to
//! Russian. Photos are binarized and run through OCR first.
//!
//! Wires dbot-telegram (transport), handler-chain and translate-pipeline. Loads config from env
//! and runs the REPL.

pub mod cli;
pub mod components;
pub mod config;
pub mod handlers;
pub mod runner;

pub use cli::{load_config, Cli, Commands};
pub use components::{
    build_bot_components, build_handler_chain, build_orchestrator, build_recognizer,
    build_translation_backend, BotComponents, BotFileFetcher,
};
pub use config::{BotConfig, OcrBackendKind, TranslationBackendKind};
pub use handlers::{LoggingHandler, StartHandler, TranslateHandler, TELEGRAM_MESSAGE_LIMIT};
pub use runner::{build_handler_chain_only, run_bot};
