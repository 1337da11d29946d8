//! Recognition through an OpenAI-compatible multimodal chat model.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use openai_client::OpenAIClient;
use std::path::Path;
use tracing::{debug, instrument};

use crate::{LanguageHint, OcrError, TextRecognizer};

/// Reply the model is asked to give when the picture has no text.
const NO_TEXT_SENTINEL: &str = "NO_TEXT";

#[derive(Clone)]
pub struct VisionRecognizer {
    client: OpenAIClient,
    model: String,
}

impl VisionRecognizer {
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    fn prompt(hint: &LanguageHint) -> String {
        format!(
            "Transcribe all text visible in this image exactly as written, preserving line breaks. \
             Expected languages: {}. Do not translate, explain or add anything. \
             If the image contains no text, reply with exactly {}.",
            hint.describe(),
            NO_TEXT_SENTINEL
        )
    }
}

#[async_trait]
impl TextRecognizer for VisionRecognizer {
    #[instrument(skip(self, hint), fields(model = %self.model))]
    async fn recognize(&self, image: &Path, hint: &LanguageHint) -> Result<String, OcrError> {
        let bytes = tokio::fs::read(image).await?;
        let data_url = format!("data:{};base64,{}", sniff_mime(&bytes), STANDARD.encode(&bytes));
        debug!(bytes = bytes.len(), "Sending image to vision model");

        let reply = self
            .client
            .vision_completion(&self.model, &Self::prompt(hint), &data_url)
            .await
            .map_err(|e| OcrError::EngineUnavailable(format!("vision model request failed: {}", e)))?;

        let text = strip_code_fence(&reply);
        if text.trim() == NO_TEXT_SENTINEL {
            return Ok(String::new());
        }
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "vision"
    }
}

/// MIME type for the data URL, from the file's magic bytes.
fn sniff_mime(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}

/// Models sometimes wrap the transcription in a Markdown fence; returns the inner text.
pub fn strip_code_fence(reply: &str) -> String {
    let trimmed = reply.trim();
    if let Some(rest) = trimmed.strip_prefix("```") {
        if let Some(inner) = rest.strip_suffix("```") {
            // Drop the optional info string on the opening fence line.
            return match inner.split_once('\n') {
                Some((_, body)) => body.trim().to_string(),
                None => inner.trim().to_string(),
            };
        }
    }
    trimmed.to_string()
}
