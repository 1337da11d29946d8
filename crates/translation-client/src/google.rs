//! Google Translate public web endpoint (`client=gtx`).
//!
//! Response shape: `[[["<translated>", "<original>", ...], ...], null, "<detected>", ...]`.
//! Long inputs come back split into several segments that are concatenated in order.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{TranslationBackend, TranslationError};

pub const DEFAULT_GOOGLE_TRANSLATE_URL: &str = "https://translate.googleapis.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone)]
pub struct GoogleTranslateClient {
    client: Client,
    base_url: String,
}

impl Default for GoogleTranslateClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GoogleTranslateClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_GOOGLE_TRANSLATE_URL)
    }

    /// Points the client at another host (a proxy or a mock server in tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request(&self, text: &str, source: &str, target: &str) -> Result<Value, TranslationError> {
        let url = format!("{}/translate_a/single", self.base_url);
        let response = self
            .client
            .post(&url)
            .query(&[("client", "gtx"), ("sl", source), ("tl", target), ("dt", "t")])
            .form(&[("q", text)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl TranslationBackend for GoogleTranslateClient {
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn detect(&self, text: &str) -> Result<String, TranslationError> {
        let body = self.request(text, "auto", "en").await?;
        let code = detected_language(&body)?;
        debug!(detected = %code, "Google detect");
        Ok(code)
    }

    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        let body = self.request(text, source, target).await?;
        translated_text(&body)
    }

    fn name(&self) -> &'static str {
        "google"
    }
}

fn detected_language(body: &Value) -> Result<String, TranslationError> {
    match body.get(2).and_then(Value::as_str).map(str::trim) {
        Some(code) if !code.is_empty() => Ok(code.to_string()),
        _ => Err(TranslationError::UnknownLanguage),
    }
}

fn translated_text(body: &Value) -> Result<String, TranslationError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::Parse("missing translation segments".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if text.trim().is_empty() {
        return Err(TranslationError::EmptyResult);
    }
    Ok(text)
}
