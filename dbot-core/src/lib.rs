//! # dbot-core
//!
//! Core types and traits for the Telegram bot: [`Bot`], [`Handler`], message and user types,
//! and tracing initialization. Transport-agnostic; used by dbot-telegram, handler-chain and the
//! translator bot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{DbotError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, Handler, HandlerResponse, Message, MessageContent, ToCoreMessage, ToCoreUser, User,
};
