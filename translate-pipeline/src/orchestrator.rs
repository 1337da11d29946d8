//! Per-message state machine:
//! `Received → Classified → (ImageFetched →)? Extracted → Translated | ShortCircuited`.
//!
//! Every stage error is converted here; [`PipelineOrchestrator::process`] always yields exactly
//! one [`PipelineOutcome`].

use futures::FutureExt;
use image_preprocess::{encode_png, preprocess_image, DynamicImage};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::error::PipelineError;
use crate::extractor::{ExtractedText, RecognitionExtractor};
use crate::fetch::FileFetcher;
use crate::message::{InboundMessage, PhotoRef};
use crate::outcome::PipelineOutcome;
use crate::resolver::TranslationResolver;
use crate::scoped_image::ScopedImage;
use crate::stage::{run_stage, Stage};

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Binarize photos before recognition.
    pub preprocess: bool,
    /// Where photo temp files are written; system temp dir when `None`.
    pub temp_dir: Option<PathBuf>,
    /// Limit for each I/O stage (fetch, preprocess, recognize, detect, translate).
    pub stage_timeout: Option<Duration>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            preprocess: true,
            temp_dir: None,
            stage_timeout: None,
        }
    }
}

#[derive(Clone)]
pub struct PipelineOrchestrator {
    fetcher: Arc<dyn FileFetcher>,
    extractor: RecognitionExtractor,
    resolver: TranslationResolver,
    options: PipelineOptions,
}

impl PipelineOrchestrator {
    pub fn new(
        fetcher: Arc<dyn FileFetcher>,
        extractor: RecognitionExtractor,
        resolver: TranslationResolver,
        options: PipelineOptions,
    ) -> Self {
        let resolver = resolver.with_stage_timeout(options.stage_timeout);
        Self {
            fetcher,
            extractor,
            resolver,
            options,
        }
    }

    /// Runs the whole pipeline for one message. Never fails and never panics outward.
    #[instrument(skip(self, message), fields(kind = message.kind()))]
    pub async fn process(&self, message: &InboundMessage) -> PipelineOutcome {
        let outcome = match AssertUnwindSafe(self.run(message)).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(panic) => {
                error!(panic = %panic_message(&*panic), "Pipeline panicked");
                PipelineOutcome::Failed
            }
        };
        info!(outcome = outcome.kind(), "Pipeline finished");
        outcome
    }

    async fn run(&self, message: &InboundMessage) -> PipelineOutcome {
        match message {
            InboundMessage::Text(content) => self.process_text(content).await,
            InboundMessage::Photo(photo) => self.process_photo(photo).await,
        }
    }

    async fn process_text(&self, content: &str) -> PipelineOutcome {
        let extracted = ExtractedText::direct(content);
        let text = match extracted.require_text() {
            Ok(text) => text,
            Err(_) => {
                info!(step = "extract", "Nothing to translate");
                return PipelineOutcome::NothingToTranslate;
            }
        };

        match self.resolver.resolve(text).await {
            Ok(translation) => PipelineOutcome::Translated {
                recognized: None,
                translation,
            },
            Err(_) => PipelineOutcome::TranslationFailed { recognized: None },
        }
    }

    async fn process_photo(&self, photo: &PhotoRef) -> PipelineOutcome {
        let extracted = match self.extract_photo(photo).await {
            Ok(extracted) => extracted,
            Err(e) => return failure_outcome(e),
        };
        if extracted.is_empty() {
            return failure_outcome(PipelineError::EmptyInput);
        }

        let recognized = extracted.into_raw();
        match self.resolver.resolve(&recognized).await {
            Ok(translation) => PipelineOutcome::Translated {
                recognized: Some(recognized),
                translation,
            },
            Err(_) => PipelineOutcome::TranslationFailed {
                recognized: Some(recognized),
            },
        }
    }

    /// Fetch → (preprocess) → temp file → recognize. The temp file lives only inside this call.
    async fn extract_photo(&self, photo: &PhotoRef) -> Result<ExtractedText, PipelineError> {
        let limit = self.options.stage_timeout;

        let bytes = run_stage(Stage::Fetch, limit, async {
            self.fetcher
                .fetch(&photo.file_id)
                .await
                .map_err(|e| PipelineError::backend(Stage::Fetch, e))
        })
        .await?;
        debug!(bytes = bytes.len(), "Photo fetched");

        let preprocess = self.options.preprocess;
        let png = run_stage(Stage::Preprocess, limit, async move {
            tokio::task::spawn_blocking(move || prepare_image(&bytes, preprocess))
                .await
                .map_err(|e| PipelineError::backend(Stage::Preprocess, e))?
        })
        .await?;

        let image = ScopedImage::write(self.options.temp_dir.as_deref(), &png, "png")
            .map_err(|e| PipelineError::backend(Stage::Preprocess, e))?;

        run_stage(Stage::Recognize, limit, self.extractor.extract(image.path())).await
    }
}

/// Decodes the photo and re-encodes it as PNG, binarized when `preprocess` is set.
fn prepare_image(bytes: &[u8], preprocess: bool) -> Result<Vec<u8>, PipelineError> {
    let decoded = image_preprocess::decode(bytes)?;
    let prepared = if preprocess {
        DynamicImage::ImageLuma8(preprocess_image(&decoded))
    } else {
        decoded
    };
    Ok(encode_png(&prepared)?)
}

fn failure_outcome(err: PipelineError) -> PipelineOutcome {
    match err {
        PipelineError::Decode(detail) => {
            warn!(error = %detail, step = "decode", "Photo is not a readable image");
            PipelineOutcome::BadImage
        }
        PipelineError::EngineUnavailable(detail) => {
            error!(error = %detail, step = "recognize", "OCR engine unavailable, operator action required");
            PipelineOutcome::ServiceUnavailable
        }
        PipelineError::EmptyInput => {
            info!(step = "recognize", "No text recognized");
            PipelineOutcome::NoTextRecognized
        }
        PipelineError::Backend { stage, detail } => {
            error!(error = %detail, step = %stage, "Pipeline stage failed");
            PipelineOutcome::Failed
        }
        PipelineError::Timeout(stage) => {
            error!(step = %stage, "Pipeline stage timed out");
            PipelineOutcome::Failed
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
