//! Message parser - Parses raw messages into structured messages

use crate::domain::entities::{Message, Content, User};

/// Parses incoming text into structured Message objects
#[derive(Debug, Clone, Default)]
pub struct MessageParser;

impl MessageParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a text message
    pub fn parse(&self, chat_id: i64, text: impl Into<String>, sender: Option<User>) -> Message {
        let text = text.into();
        let content = Self::parse_content(&text);

        Message::new(chat_id, text, content).with_sender_opt(sender)
    }

    /// Classify raw text as a command, plain text or nothing
    pub fn parse_content(text: &str) -> Content {
        if text.is_empty() {
            return Content::Empty;
        }

        let Some(cmd_text) = text.strip_prefix('/') else {
            return Content::Text(text.to_string());
        };

        // The token is the run of command characters glued to the slash,
        // so "/ start" and "/привет" are not commands
        let name_len = Self::command_span(cmd_text);
        if name_len == 0 {
            return Content::Text(text.to_string());
        }
        let (name, mut rest) = cmd_text.split_at(name_len);

        // `/start@my_bot` addresses a specific bot in group chats
        if let Some(mention) = rest.strip_prefix('@') {
            rest = &mention[Self::command_span(mention)..];
        }

        let args = rest.split_whitespace().map(|s| s.to_string()).collect();

        Content::Command { name: name.to_string(), args }
    }

    /// Byte length of the leading `[A-Za-z0-9_]` run, the only characters
    /// Telegram includes in a bot command
    fn command_span(text: &str) -> usize {
        text.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(text.len())
    }
}
