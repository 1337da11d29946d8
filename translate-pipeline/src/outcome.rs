//! The single value rendered back to the user for one inbound message.

use crate::resolver::Translation;

pub const NOTHING_TO_TRANSLATE: &str = "Нечего переводить.";
pub const NO_TEXT_RECOGNIZED: &str =
    "Не удалось распознать текст на картинке. Попробуйте другое изображение.";
pub const BAD_IMAGE: &str =
    "Не удалось прочитать изображение. Отправьте фото в формате JPEG или PNG.";
pub const SERVICE_UNAVAILABLE: &str =
    "Сервис распознавания текста сейчас недоступен. Попробуйте позже.";
pub const TRANSLATION_FAILED: &str = "Не удалось перевести текст.";
pub const GENERIC_FAILURE: &str = "Произошла ошибка при обработке сообщения.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// `recognized` is set on the photo path.
    Translated {
        recognized: Option<String>,
        translation: Translation,
    },
    NothingToTranslate,
    NoTextRecognized,
    BadImage,
    ServiceUnavailable,
    /// Extraction worked, translation did not; the photo path keeps what was recognized.
    TranslationFailed { recognized: Option<String> },
    Failed,
}

impl PipelineOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineOutcome::Translated { .. } => "translated",
            PipelineOutcome::NothingToTranslate => "nothing_to_translate",
            PipelineOutcome::NoTextRecognized => "no_text_recognized",
            PipelineOutcome::BadImage => "bad_image",
            PipelineOutcome::ServiceUnavailable => "service_unavailable",
            PipelineOutcome::TranslationFailed { .. } => "translation_failed",
            PipelineOutcome::Failed => "failed",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Translated { .. })
    }

    pub fn recognized(&self) -> Option<&str> {
        match self {
            PipelineOutcome::Translated { recognized, .. }
            | PipelineOutcome::TranslationFailed { recognized } => recognized.as_deref(),
            _ => None,
        }
    }

    /// User-facing text of the reply.
    pub fn render(&self) -> String {
        match self {
            PipelineOutcome::Translated {
                recognized,
                translation,
            } => {
                let body = format!(
                    "Перевод ({} → {}):\n\n{}",
                    translation.pair.source, translation.pair.target, translation.translated_text
                );
                with_recognized(recognized.as_deref(), &body)
            }
            PipelineOutcome::NothingToTranslate => NOTHING_TO_TRANSLATE.to_string(),
            PipelineOutcome::NoTextRecognized => NO_TEXT_RECOGNIZED.to_string(),
            PipelineOutcome::BadImage => BAD_IMAGE.to_string(),
            PipelineOutcome::ServiceUnavailable => SERVICE_UNAVAILABLE.to_string(),
            PipelineOutcome::TranslationFailed { recognized } => {
                with_recognized(recognized.as_deref(), TRANSLATION_FAILED)
            }
            PipelineOutcome::Failed => GENERIC_FAILURE.to_string(),
        }
    }
}

fn with_recognized(recognized: Option<&str>, body: &str) -> String {
    match recognized {
        Some(text) => format!("Распознанный текст:\n\n{}\n\n{}", text, body),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguagePair;

    fn translation(text: &str, source: &str) -> Translation {
        Translation {
            translated_text: text.to_string(),
            pair: LanguagePair::for_source(source),
        }
    }

    #[test]
    fn test_text_translation_render() {
        let outcome = PipelineOutcome::Translated {
            recognized: None,
            translation: translation("Hello", "ru"),
        };
        assert_eq!(outcome.render(), "Перевод (ru → en):\n\nHello");
        assert!(outcome.is_success());
    }

    #[test]
    fn test_photo_translation_render_includes_recognized() {
        let outcome = PipelineOutcome::Translated {
            recognized: Some("Good morning".to_string()),
            translation: translation("Доброе утро", "en"),
        };
        assert_eq!(
            outcome.render(),
            "Распознанный текст:\n\nGood morning\n\nПеревод (en → ru):\n\nДоброе утро"
        );
    }

    #[test]
    fn test_failure_keeps_recognized_text() {
        let outcome = PipelineOutcome::TranslationFailed {
            recognized: Some("Good morning".to_string()),
        };
        let text = outcome.render();
        assert!(text.contains("Good morning"));
        assert!(text.ends_with(TRANSLATION_FAILED));
        assert_eq!(outcome.recognized(), Some("Good morning"));
    }

    #[test]
    fn test_diagnostics_are_distinct() {
        let rendered: Vec<String> = [
            PipelineOutcome::NothingToTranslate,
            PipelineOutcome::NoTextRecognized,
            PipelineOutcome::BadImage,
            PipelineOutcome::ServiceUnavailable,
            PipelineOutcome::TranslationFailed { recognized: None },
            PipelineOutcome::Failed,
        ]
        .iter()
        .map(PipelineOutcome::render)
        .collect();

        for (i, a) in rendered.iter().enumerate() {
            for b in &rendered[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
