//! # Translation backends
//!
//! This crate defines the [`TranslationBackend`] interface (language detection + translation)
//! and two implementations:
//!
//! - [`GoogleTranslateClient`]: the public `translate_a/single` web endpoint. No key needed.
//! - [`OpenAITranslator`]: an OpenAI-compatible chat model prompted to detect and translate.
//!
//! Backends hold no per-call state; one instance is shared behind an `Arc` by every
//! concurrent caller.
//!
//! ## Example
//!
//! ```rust,no_run
//! use translation_client::{GoogleTranslateClient, TranslationBackend};
//!
//! async fn example() -> Result<(), translation_client::TranslationError> {
//!     let backend = GoogleTranslateClient::new();
//!     let source = backend.detect("Привет").await?;
//!     let text = backend.translate("Привет", &source, "en").await?;
//!     println!("{} -> en: {}", source, text);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

mod google;
mod openai;

pub use google::{GoogleTranslateClient, DEFAULT_GOOGLE_TRANSLATE_URL};
pub use openai::{parse_language_code, OpenAITranslator};

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    Parse(String),

    #[error("Language could not be determined")]
    UnknownLanguage,

    #[error("Backend returned an empty translation")]
    EmptyResult,

    #[error("LLM error: {0}")]
    Llm(String),
}

/// Detects languages and translates text.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Best-guess language code of `text` as reported by the backend (e.g. `ru`, `en`, `zh-CN`).
    async fn detect(&self, text: &str) -> Result<String, TranslationError>;

    /// Translates `text` from `source` to `target`.
    async fn translate(&self, text: &str, source: &str, target: &str)
        -> Result<String, TranslationError>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}
