use async_trait::async_trait;
use crate::application::errors::BotError;

/// Bot trait - abstraction for the outbound side of a messaging platform
#[async_trait]
pub trait Bot: Send + Sync {
    /// Send a text message to a chat, returning the platform message id
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<i64, BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotInfo {
    pub id: i64,
    pub username: String,
}
