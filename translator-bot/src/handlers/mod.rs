//! Chain handlers: logging, `/start`, translation.

mod logging_handler;
mod start_handler;
mod translate_handler;

pub use logging_handler::LoggingHandler;
pub use start_handler::{greeting, StartHandler};
pub use translate_handler::{
    to_inbound, truncate_for_telegram, TranslateHandler, TELEGRAM_MESSAGE_LIMIT,
};
