use ocr_client::OcrError;
use std::fmt;
use thiserror::Error;

use crate::stage::Stage;

/// Stage failures; all of them end at the orchestrator and become a
/// [`PipelineOutcome`](crate::PipelineOutcome).
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("cannot decode image: {0}")]
    Decode(String),

    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("no extractable text")]
    EmptyInput,

    #[error("{stage} failed: {detail}")]
    Backend { stage: Stage, detail: String },

    #[error("{0} timed out")]
    Timeout(Stage),
}

impl PipelineError {
    pub fn backend(stage: Stage, detail: impl fmt::Display) -> Self {
        PipelineError::Backend {
            stage,
            detail: detail.to_string(),
        }
    }
}

impl From<OcrError> for PipelineError {
    fn from(err: OcrError) -> Self {
        match err {
            OcrError::EngineUnavailable(detail) => PipelineError::EngineUnavailable(detail),
            other => PipelineError::backend(Stage::Recognize, other),
        }
    }
}

impl From<image_preprocess::PreprocessError> for PipelineError {
    fn from(err: image_preprocess::PreprocessError) -> Self {
        match err {
            image_preprocess::PreprocessError::Decode(detail) => PipelineError::Decode(detail),
            other => PipelineError::backend(Stage::Preprocess, other),
        }
    }
}
