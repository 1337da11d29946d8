//! # Text recognition
//!
//! Defines the [`TextRecognizer`] interface and two implementations: a local Tesseract
//! subprocess and an OpenAI-compatible multimodal model. Both take an image file on disk and a
//! [`LanguageHint`] and return the recognized text, possibly empty.

use async_trait::async_trait;
use std::path::Path;

mod error;
mod tesseract;
mod vision;

pub use error::OcrError;
pub use tesseract::TesseractRecognizer;
pub use vision::{strip_code_fence, VisionRecognizer};

/// Tesseract language codes for Cyrillic (Russian) and Latin (English) script.
pub const DEFAULT_LANGUAGES: &str = "rus+eng";

/// Fully automatic page segmentation: mixed paragraphs and lines, no OSD.
pub const DEFAULT_PAGE_SEGMENTATION_MODE: u8 = 3;

/// Largest valid Tesseract `--psm` value.
pub const MAX_PAGE_SEGMENTATION_MODE: u8 = 13;

/// Which scripts to expect and how the page is laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageHint {
    /// `+`-separated Tesseract codes, e.g. `rus+eng`.
    pub languages: String,
    pub page_segmentation_mode: u8,
}

impl Default for LanguageHint {
    fn default() -> Self {
        Self {
            languages: DEFAULT_LANGUAGES.to_string(),
            page_segmentation_mode: DEFAULT_PAGE_SEGMENTATION_MODE,
        }
    }
}

impl LanguageHint {
    pub fn new(languages: impl Into<String>, page_segmentation_mode: u8) -> Self {
        Self {
            languages: languages.into(),
            page_segmentation_mode,
        }
    }

    /// Individual language codes, in order, without empties.
    pub fn codes(&self) -> Vec<&str> {
        self.languages
            .split('+')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect()
    }

    /// Human-readable list for model prompts ("Russian, English").
    pub fn describe(&self) -> String {
        self.codes()
            .into_iter()
            .map(|code| match code {
                "rus" => "Russian",
                "eng" => "English",
                "ukr" => "Ukrainian",
                "deu" => "German",
                "fra" => "French",
                other => other,
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Recognizes text in an image file.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Returns the recognized text; an image without glyphs yields an empty (or whitespace) string,
    /// not an error.
    async fn recognize(&self, image: &Path, hint: &LanguageHint) -> Result<String, OcrError>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}
