//! `/start` greeting. Other commands are swallowed without a reply.

use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerResponse, Message, Result, User};
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub struct StartHandler {
    bot: Arc<dyn Bot>,
}

impl StartHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

/// Command name without the leading `/` and an optional `@botname` suffix.
fn command_name(text: &str) -> Option<&str> {
    let first = text.trim_start().split_whitespace().next()?;
    let command = first.strip_prefix('/')?;
    Some(command.split('@').next().unwrap_or(command))
}

pub fn greeting(user: &User) -> String {
    let name = user
        .first_name
        .as_deref()
        .or(user.username.as_deref())
        .unwrap_or("друг");
    format!(
        "Привет, {}!\n\n\
         Я бот-переводчик. Пришлите мне текст, и я переведу его на русский или английский.\n\n\
         А если пришлёте картинку с текстом, я распознаю его и тоже переведу!",
        name
    )
}

#[async_trait]
impl Handler for StartHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.is_command() {
            return Ok(HandlerResponse::Continue);
        }
        let Some(command) = message.text().and_then(command_name) else {
            return Ok(HandlerResponse::Continue);
        };

        if command != "start" {
            debug!(command = %command, "Ignoring unknown command");
            return Ok(HandlerResponse::Stop);
        }

        let text = greeting(&message.user);
        self.bot.send_message(&message.chat, &text).await?;
        info!(chat_id = message.chat.id, "Sent greeting");
        Ok(HandlerResponse::Reply(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_name() {
        assert_eq!(command_name("/start"), Some("start"));
        assert_eq!(command_name("  /start@translator_bot now"), Some("start"));
        assert_eq!(command_name("/help"), Some("help"));
        assert_eq!(command_name("start"), None);
        assert_eq!(command_name(""), None);
    }

    #[test]
    fn test_greeting_uses_first_name_then_username() {
        let mut user = User {
            id: 1,
            username: Some("anna_k".to_string()),
            first_name: Some("Анна".to_string()),
            last_name: None,
        };
        assert!(greeting(&user).starts_with("Привет, Анна!"));

        user.first_name = None;
        assert!(greeting(&user).starts_with("Привет, anna_k!"));

        user.username = None;
        assert!(greeting(&user).starts_with("Привет, друг!"));
    }
}
