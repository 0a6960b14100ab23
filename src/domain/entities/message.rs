use super::User;

/// Message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Command { name: String, args: Vec<String> },
    Empty,
}

impl Content {
    /// Command keyword without the slash, or "" for anything else
    pub fn command_name(&self) -> &str {
        match self {
            Content::Command { name, .. } => name,
            _ => "",
        }
    }
}

/// Represents an incoming message
#[derive(Debug, Clone)]
pub struct Message {
    pub id: i64,
    pub chat_id: i64,
    pub sender: Option<User>,
    pub text: String,
    pub content: Content,
}

impl Message {
    pub fn new(chat_id: i64, text: impl Into<String>, content: Content) -> Self {
        Self {
            id: 0,
            chat_id,
            sender: None,
            text: text.into(),
            content,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_sender_opt(mut self, user: Option<User>) -> Self {
        self.sender = user;
        self
    }
}
