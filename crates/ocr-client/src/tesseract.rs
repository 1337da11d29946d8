//! Local Tesseract engine driven as a subprocess.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::{LanguageHint, OcrError, TextRecognizer};

/// Stderr fragments Tesseract prints when a language pack cannot be loaded.
const MISSING_LANGUAGE_MARKERS: &[&str] = &[
    "Failed loading language",
    "Error opening data file",
    "Could not initialize tesseract",
];

#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    command: String,
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TesseractRecognizer {
    /// Uses `tesseract` from `PATH`.
    pub fn new() -> Self {
        Self::with_command("tesseract")
    }

    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Installed language packs as reported by `--list-langs` (first line is a header).
    pub async fn available_languages(&self) -> Result<Vec<String>, OcrError> {
        let output = Command::new(&self.command)
            .arg("--list-langs")
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::EngineUnavailable(format!(
                "{} --list-langs failed: {}",
                self.command,
                stderr.trim()
            )));
        }

        Ok(parse_language_list(&String::from_utf8_lossy(&output.stdout)))
    }

    /// Codes from `hint` that are not installed.
    pub async fn missing_languages(&self, hint: &LanguageHint) -> Result<Vec<String>, OcrError> {
        let installed = self.available_languages().await?;
        Ok(hint
            .codes()
            .into_iter()
            .filter(|code| !installed.iter().any(|l| l == code))
            .map(str::to_string)
            .collect())
    }

    fn spawn_error(&self, e: std::io::Error) -> OcrError {
        if e.kind() == ErrorKind::NotFound {
            OcrError::EngineUnavailable(format!("{} not found (is tesseract installed?)", self.command))
        } else {
            OcrError::Io(e)
        }
    }
}

#[async_trait]
impl TextRecognizer for TesseractRecognizer {
    /// The child is killed if this future is dropped (e.g. on a stage timeout).
    #[instrument(skip(self, hint), fields(languages = %hint.languages, psm = hint.page_segmentation_mode))]
    async fn recognize(&self, image: &Path, hint: &LanguageHint) -> Result<String, OcrError> {
        let output = Command::new(&self.command)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&hint.languages)
            .arg("--psm")
            .arg(hint.page_segmentation_mode.to_string())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(classify_failure(&String::from_utf8_lossy(&output.stderr)));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(chars = text.chars().count(), "Tesseract finished");
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "tesseract"
    }
}

fn parse_language_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

fn classify_failure(stderr: &str) -> OcrError {
    let stderr = stderr.trim();
    if MISSING_LANGUAGE_MARKERS.iter().any(|m| stderr.contains(m)) {
        OcrError::EngineUnavailable(format!("tesseract language data missing: {}", stderr))
    } else {
        OcrError::Recognition(format!("tesseract failed: {}", stderr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language_list_skips_header() {
        let stdout = "List of available languages in \"/usr/share/tessdata/\" (3):\neng\nosd\nrus\n";
        assert_eq!(parse_language_list(stdout), vec!["eng", "osd", "rus"]);
    }

    #[test]
    fn test_missing_language_pack_is_engine_unavailable() {
        let stderr = "Error opening data file /usr/share/tessdata/rus.traineddata\n\
                      Failed loading language 'rus'\n\
                      Tesseract couldn't load any languages!";
        assert!(classify_failure(stderr).is_engine_unavailable());
    }

    #[test]
    fn test_other_failures_are_recognition_errors() {
        let err = classify_failure("Error in pixReadStream: Unknown format: no pix returned");
        assert!(matches!(err, OcrError::Recognition(_)));
    }

    #[tokio::test]
    async fn test_missing_binary_is_engine_unavailable() {
        let recognizer = TesseractRecognizer::with_command("tesseract-binary-that-does-not-exist");
        let file = tempfile::NamedTempFile::new().unwrap();

        let err = recognizer
            .recognize(file.path(), &LanguageHint::default())
            .await
            .unwrap_err();

        assert!(err.is_engine_unavailable(), "got {:?}", err);
        assert!(recognizer.available_languages().await.unwrap_err().is_engine_unavailable());
    }
}
