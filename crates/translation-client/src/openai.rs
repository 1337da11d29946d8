//! Detection and translation through an OpenAI-compatible chat model.

use async_trait::async_trait;
use openai_client::OpenAIClient;
use tracing::{debug, instrument};

use crate::{TranslationBackend, TranslationError};

const DETECT_PROMPT: &str = "Identify the language of the user's message. \
Reply with only its ISO 639-1 code in lowercase, for example: ru, en, fr. \
If the language cannot be determined, reply with und.";

#[derive(Clone)]
pub struct OpenAITranslator {
    client: OpenAIClient,
    model: String,
}

impl OpenAITranslator {
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl TranslationBackend for OpenAITranslator {
    #[instrument(skip(self, text), fields(model = %self.model))]
    async fn detect(&self, text: &str) -> Result<String, TranslationError> {
        let reply = self
            .client
            .complete(&self.model, DETECT_PROMPT, text)
            .await
            .map_err(|e| TranslationError::Llm(e.to_string()))?;
        debug!(reply = %reply, "LLM detect");
        parse_language_code(&reply)
    }

    #[instrument(skip(self, text), fields(model = %self.model))]
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        let system = format!(
            "Translate the user's message from language '{}' to language '{}'. \
             Reply with the translation only, keeping line breaks. Do not add notes.",
            source, target
        );
        let reply = self
            .client
            .complete(&self.model, &system, text)
            .await
            .map_err(|e| TranslationError::Llm(e.to_string()))?;

        let translated = reply.trim();
        if translated.is_empty() {
            return Err(TranslationError::EmptyResult);
        }
        Ok(translated.to_string())
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

/// Extracts a language code from a model reply such as `"ru"`, `Ru.` or `Language: en`.
pub fn parse_language_code(reply: &str) -> Result<String, TranslationError> {
    let token = reply
        .split(|c: char| c.is_whitespace() || c == ':')
        .map(|t| t.trim_matches(|c: char| !c.is_ascii_alphanumeric() && c != '-'))
        .filter(|t| !t.is_empty())
        .last()
        .ok_or(TranslationError::UnknownLanguage)?
        .to_ascii_lowercase();

    let primary = token.split('-').next().unwrap_or_default();
    let valid = (2..=3).contains(&primary.len()) && primary.chars().all(|c| c.is_ascii_lowercase());
    if !valid || primary == "und" {
        return Err(TranslationError::UnknownLanguage);
    }
    Ok(token)
}
