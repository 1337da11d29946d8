//! Minimal framework config: token, optional API URL and log file path.
//! Loaded from env: BOT_TOKEN (or TELEGRAM_TOKEN), TELEGRAM_API_URL (or TELOXIDE_API_URL), LOG_FILE.

use anyhow::{Context, Result};
use std::env;

/// Minimal Telegram bot config (connectivity and logging only).
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub log_file: Option<String>,
}

impl TelegramConfig {
    /// Loads from env. `token` overrides BOT_TOKEN / TELEGRAM_TOKEN; without any token this fails.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN")
                .or_else(|_| env::var("TELEGRAM_TOKEN"))
                .context("BOT_TOKEN (or TELEGRAM_TOKEN) not set")?,
        };
        if bot_token.trim().is_empty() {
            anyhow::bail!("Telegram bot token is empty");
        }
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").ok().filter(|s| !s.trim().is_empty());
        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
        })
    }

    /// Builds config with the given token; other fields None.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            log_file: None,
        }
    }

    /// Fails when TELEGRAM_API_URL is set but does not parse as a URL.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }

    /// Creates the teloxide Bot, pointing it at the custom API URL when one is configured.
    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match &self.telegram_api_url {
            Some(url_str) => {
                let url = reqwest::Url::parse(url_str)
                    .with_context(|| format!("invalid TELEGRAM_API_URL: {}", url_str))?;
                Ok(bot.set_api_url(url))
            }
            None => Ok(bot),
        }
    }
}
