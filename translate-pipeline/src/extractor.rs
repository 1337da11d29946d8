//! Text extraction: verbatim for text messages, OCR for images.

use ocr_client::{LanguageHint, TextRecognizer};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::PipelineError;

/// Raw text plus whether it is blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    raw: String,
    empty: bool,
}

impl ExtractedText {
    /// Text message content, verbatim.
    pub fn direct(content: &str) -> Self {
        Self::new(content.to_string())
    }

    /// Engine output; surrounding whitespace (Tesseract's trailing form feed) is dropped.
    pub fn recognized(output: &str) -> Self {
        Self::new(output.trim().to_string())
    }

    fn new(raw: String) -> Self {
        let empty = raw.trim().is_empty();
        Self { raw, empty }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn into_raw(self) -> String {
        self.raw
    }

    /// The text, or [`PipelineError::EmptyInput`] when there is nothing to translate.
    pub fn require_text(&self) -> Result<&str, PipelineError> {
        if self.empty {
            Err(PipelineError::EmptyInput)
        } else {
            Ok(&self.raw)
        }
    }
}

/// Runs a [`TextRecognizer`] with a fixed language hint. Does not care whether the image was
/// preprocessed.
#[derive(Clone)]
pub struct RecognitionExtractor {
    recognizer: Arc<dyn TextRecognizer>,
    hint: LanguageHint,
}

impl RecognitionExtractor {
    pub fn new(recognizer: Arc<dyn TextRecognizer>, hint: LanguageHint) -> Self {
        Self { recognizer, hint }
    }

    pub fn backend_name(&self) -> &'static str {
        self.recognizer.name()
    }

    #[instrument(skip(self), fields(backend = self.recognizer.name()))]
    pub async fn extract(&self, image: &Path) -> Result<ExtractedText, PipelineError> {
        let output = self.recognizer.recognize(image, &self.hint).await?;
        let extracted = ExtractedText::recognized(&output);
        debug!(chars = extracted.raw().chars().count(), empty = extracted.is_empty(), "Recognition done");
        Ok(extracted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_keeps_text_verbatim() {
        let text = ExtractedText::direct("  Привет  ");
        assert_eq!(text.raw(), "  Привет  ");
        assert!(!text.is_empty());
        assert_eq!(text.require_text().unwrap(), "  Привет  ");
    }

    #[test]
    fn test_whitespace_is_empty() {
        for input in ["", "   ", "\n\t "] {
            let text = ExtractedText::direct(input);
            assert!(text.is_empty(), "{:?} should be empty", input);
            assert!(matches!(text.require_text(), Err(PipelineError::EmptyInput)));
        }
    }

    #[test]
    fn test_recognized_trims_engine_noise() {
        let text = ExtractedText::recognized("Hello world\n\x0c");
        assert_eq!(text.raw(), "Hello world");
        assert!(ExtractedText::recognized("\n\x0c").is_empty());
    }
}
