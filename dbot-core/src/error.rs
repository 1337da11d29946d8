//! Error types for the bot core.

use thiserror::Error;

/// Top-level error for dbot (bot transport, file download).
#[derive(Error, Debug)]
pub enum DbotError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("File download error: {0}")]
    Download(String),
}

/// Result type for core operations; uses [`DbotError`].
pub type Result<T> = std::result::Result<T, DbotError>;
