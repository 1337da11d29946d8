//! BotConfig: Telegram connectivity + OCR + translation + OpenAI + pipeline limits.
//! Use load() for env-based loading, then validate() before building components.

use anyhow::{Context, Result};
use dbot_telegram::TelegramConfig;
use ocr_client::{
    LanguageHint, DEFAULT_LANGUAGES, DEFAULT_PAGE_SEGMENTATION_MODE, MAX_PAGE_SEGMENTATION_MODE,
};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use translation_client::DEFAULT_GOOGLE_TRANSLATE_URL;

use super::{OcrBackendKind, TranslationBackendKind};

pub const DEFAULT_LOG_FILE: &str = "logs/translator-bot.log";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OCR_BACKEND, OCR_LANGUAGES, OCR_PSM, TESSERACT_CMD, OCR_PREPROCESS
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub backend: String,
    pub languages: String,
    pub page_segmentation_mode: u8,
    pub tesseract_cmd: String,
    pub preprocess: bool,
}

/// TRANSLATION_BACKEND, GOOGLE_TRANSLATE_URL
#[derive(Debug, Clone)]
pub struct TranslationConfig {
    pub backend: String,
    pub google_url: String,
}

/// OPENAI_API_KEY, OPENAI_BASE_URL, VISION_MODEL, TRANSLATION_MODEL
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub vision_model: String,
    pub translation_model: String,
}

/// STAGE_TIMEOUT_SECS, TEMP_DIR
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub stage_timeout_secs: Option<u64>,
    pub temp_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    pub ocr: OcrConfig,
    pub translation: TranslationConfig,
    pub openai: OpenAIConfig,
    pub pipeline: PipelineConfig,
}

fn env_opt(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(name: &str, default: &str) -> String {
    env_opt(name).unwrap_or_else(|| default.to_string())
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("{} must be true or false, got '{}'", name, value),
    }
}

impl BotConfig {
    /// Loads full config from environment variables. `token` overrides BOT_TOKEN.
    /// Call validate() after load to fail fast before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::load(token)?;

        let page_segmentation_mode = match env_opt("OCR_PSM") {
            Some(v) => v
                .parse::<u8>()
                .with_context(|| format!("OCR_PSM must be a number, got '{}'", v))?,
            None => DEFAULT_PAGE_SEGMENTATION_MODE,
        };
        let preprocess = match env_opt("OCR_PREPROCESS") {
            Some(v) => parse_bool("OCR_PREPROCESS", &v)?,
            None => true,
        };
        let ocr = OcrConfig {
            backend: env_or("OCR_BACKEND", "tesseract"),
            languages: env_or("OCR_LANGUAGES", DEFAULT_LANGUAGES),
            page_segmentation_mode,
            tesseract_cmd: env_or("TESSERACT_CMD", "tesseract"),
            preprocess,
        };

        let translation = TranslationConfig {
            backend: env_or("TRANSLATION_BACKEND", "google"),
            google_url: env_or("GOOGLE_TRANSLATE_URL", DEFAULT_GOOGLE_TRANSLATE_URL),
        };

        let openai = OpenAIConfig {
            api_key: env_opt("OPENAI_API_KEY"),
            base_url: env_or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            vision_model: env_or("VISION_MODEL", DEFAULT_MODEL),
            translation_model: env_or("TRANSLATION_MODEL", DEFAULT_MODEL),
        };

        let stage_timeout_secs = match env_opt("STAGE_TIMEOUT_SECS") {
            Some(v) => Some(
                v.parse::<u64>()
                    .with_context(|| format!("STAGE_TIMEOUT_SECS must be a number, got '{}'", v))?,
            )
            .filter(|secs| *secs > 0),
            None => None,
        };
        let pipeline = PipelineConfig {
            stage_timeout_secs,
            temp_dir: env_opt("TEMP_DIR").map(PathBuf::from),
        };

        Ok(Self {
            telegram,
            ocr,
            translation,
            openai,
            pipeline,
        })
    }

    /// Checks backend names, URLs, required keys and OCR_PSM range.
    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()?;

        let ocr_backend = self.ocr_backend()?;
        let translation_backend = self.translation_backend()?;

        if self.ocr.page_segmentation_mode > MAX_PAGE_SEGMENTATION_MODE {
            anyhow::bail!(
                "OCR_PSM must be between 0 and {}, got {}",
                MAX_PAGE_SEGMENTATION_MODE,
                self.ocr.page_segmentation_mode
            );
        }
        if self.language_hint().codes().is_empty() {
            anyhow::bail!("OCR_LANGUAGES is empty");
        }

        if translation_backend == TranslationBackendKind::Google
            && reqwest::Url::parse(&self.translation.google_url).is_err()
        {
            anyhow::bail!(
                "GOOGLE_TRANSLATE_URL is not a valid URL: {}",
                self.translation.google_url
            );
        }

        let needs_openai = ocr_backend == OcrBackendKind::Vision
            || translation_backend == TranslationBackendKind::OpenAI;
        if needs_openai {
            if self.openai.api_key.is_none() {
                anyhow::bail!(
                    "OPENAI_API_KEY is required when OCR_BACKEND=vision or TRANSLATION_BACKEND=openai"
                );
            }
            if reqwest::Url::parse(&self.openai.base_url).is_err() {
                anyhow::bail!("OPENAI_BASE_URL is not a valid URL: {}", self.openai.base_url);
            }
        }

        if let Some(dir) = &self.pipeline.temp_dir {
            if !dir.is_dir() {
                anyhow::bail!("TEMP_DIR does not exist or is not a directory: {}", dir.display());
            }
        }

        Ok(())
    }

    pub fn ocr_backend(&self) -> Result<OcrBackendKind> {
        self.ocr.backend.parse()
    }

    pub fn translation_backend(&self) -> Result<TranslationBackendKind> {
        self.translation.backend.parse()
    }

    pub fn language_hint(&self) -> LanguageHint {
        LanguageHint::new(self.ocr.languages.clone(), self.ocr.page_segmentation_mode)
    }

    pub fn stage_timeout(&self) -> Option<Duration> {
        self.pipeline.stage_timeout_secs.map(Duration::from_secs)
    }

    pub fn bot_token(&self) -> &str {
        &self.telegram.bot_token
    }

    pub fn telegram_api_url(&self) -> Option<&str> {
        self.telegram.telegram_api_url.as_deref()
    }

    pub fn log_file(&self) -> &str {
        self.telegram.log_file.as_deref().unwrap_or(DEFAULT_LOG_FILE)
    }
}
