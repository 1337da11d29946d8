//! Backend selectors parsed from OCR_BACKEND and TRANSLATION_BACKEND.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrBackendKind {
    Tesseract,
    Vision,
}

impl FromStr for OcrBackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tesseract" => Ok(Self::Tesseract),
            "vision" | "openai" => Ok(Self::Vision),
            other => anyhow::bail!("unknown OCR_BACKEND '{}' (expected tesseract or vision)", other),
        }
    }
}

impl fmt::Display for OcrBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tesseract => "tesseract",
            Self::Vision => "vision",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationBackendKind {
    Google,
    OpenAI,
}

impl FromStr for TranslationBackendKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "openai" | "llm" => Ok(Self::OpenAI),
            other => anyhow::bail!(
                "unknown TRANSLATION_BACKEND '{}' (expected google or openai)",
                other
            ),
        }
    }
}

impl fmt::Display for TranslationBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Google => "google",
            Self::OpenAI => "openai",
        })
    }
}
