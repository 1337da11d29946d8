use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    /// Engine not installed, language data missing, or remote model unreachable.
    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    /// Engine ran but reported a failure for this image.
    #[error("Recognition failed: {0}")]
    Recognition(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OcrError {
    pub fn is_engine_unavailable(&self) -> bool {
        matches!(self, OcrError::EngineUnavailable(_))
    }
}
