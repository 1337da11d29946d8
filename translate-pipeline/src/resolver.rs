//! Language detection, target selection and translation.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, instrument};
use translation_client::TranslationBackend;

use crate::error::PipelineError;
use crate::language::{normalize_language_code, LanguagePair};
use crate::stage::{run_stage, Stage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub translated_text: String,
    pub pair: LanguagePair,
}

/// The only failure callers see; backend detail stays in the logs.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("translation unavailable")]
pub struct TranslationFailure;

pub type TranslationResult = Result<Translation, TranslationFailure>;

/// Detect → derive pair → translate, over one shared backend.
#[derive(Clone)]
pub struct TranslationResolver {
    backend: Arc<dyn TranslationBackend>,
    stage_timeout: Option<Duration>,
}

impl TranslationResolver {
    pub fn new(backend: Arc<dyn TranslationBackend>) -> Self {
        Self {
            backend,
            stage_timeout: None,
        }
    }

    /// Bounds each backend call (detect, translate) separately.
    pub fn with_stage_timeout(mut self, stage_timeout: Option<Duration>) -> Self {
        self.stage_timeout = stage_timeout;
        self
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// `text` must be non-empty; the orchestrator checks this before calling.
    #[instrument(skip(self, text), fields(backend = self.backend.name(), chars = text.chars().count()))]
    pub async fn resolve(&self, text: &str) -> TranslationResult {
        match self.try_resolve(text).await {
            Ok(translation) => {
                info!(
                    source = %translation.pair.source,
                    target = %translation.pair.target,
                    "Translated"
                );
                Ok(translation)
            }
            Err(e) => {
                error!(error = %e, step = "translate", "Translation failed");
                Err(TranslationFailure)
            }
        }
    }

    async fn try_resolve(&self, text: &str) -> Result<Translation, PipelineError> {
        let detected = run_stage(Stage::Detect, self.stage_timeout, async {
            self.backend
                .detect(text)
                .await
                .map_err(|e| PipelineError::backend(Stage::Detect, e))
        })
        .await?;

        let source = normalize_language_code(&detected).ok_or_else(|| {
            PipelineError::backend(Stage::Detect, format!("unusable language code {:?}", detected))
        })?;
        let pair = LanguagePair::for_source(&source);

        let translated_text = run_stage(Stage::Translate, self.stage_timeout, async {
            self.backend
                .translate(text, &pair.source, &pair.target)
                .await
                .map_err(|e| PipelineError::backend(Stage::Translate, e))
        })
        .await?;

        Ok(Translation {
            translated_text,
            pair,
        })
    }
}
