use crate::application::errors::BotError;
use crate::domain::traits::Bot;

/// Outbound side of the bot: every reply goes through here
pub struct MessageService<B: Bot> {
    bot: B,
}

impl<B: Bot> MessageService<B> {
    pub fn new(bot: B) -> Self {
        Self { bot }
    }

    pub fn bot(&self) -> &B {
        &self.bot
    }

    /// Send a reply. Failures are logged with the chat id and handed back to
    /// the caller, which decides whether to carry on.
    pub async fn send(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        tracing::debug!("Sending to {}: {}", chat_id, text);

        match self.bot.send_message(chat_id, text).await {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::error!("Failed to send message to chat {}: {}", chat_id, e);
                Err(e)
            }
        }
    }
}
