//! # Translate pipeline
//!
//! Turns one inbound message (text or photo) into exactly one [`PipelineOutcome`]:
//!
//! - text → [`ExtractedText::direct`] → [`TranslationResolver`]
//! - photo → [`FileFetcher`] → binarization → [`ScopedImage`] → [`RecognitionExtractor`] →
//!   [`TranslationResolver`]
//!
//! Blank input short-circuits before any translation call. Stage failures are typed
//! ([`PipelineError`]) and converted to outcomes by [`PipelineOrchestrator`]; nothing escapes to the
//! transport layer.
//!
//! Backends are injected as trait objects (`ocr_client::TextRecognizer`,
//! `translation_client::TranslationBackend`) and shared across concurrent invocations.

mod error;
mod extractor;
mod fetch;
mod language;
mod message;
mod orchestrator;
mod outcome;
mod resolver;
mod scoped_image;
mod stage;

pub use error::PipelineError;
pub use extractor::{ExtractedText, RecognitionExtractor};
pub use fetch::{FetchError, FileFetcher};
pub use language::{normalize_language_code, LanguagePair, ENGLISH, RUSSIAN};
pub use message::{InboundMessage, PhotoRef};
pub use orchestrator::{PipelineOptions, PipelineOrchestrator};
pub use outcome::PipelineOutcome;
pub use resolver::{Translation, TranslationFailure, TranslationResolver, TranslationResult};
pub use scoped_image::ScopedImage;
pub use stage::Stage;
