use chrono::{DateTime, Utc};
use std::fmt;

/// Sender of an incoming message, as reported by the platform
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

impl User {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            username: None,
            first_name: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_first_name(mut self, first: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self
    }

    pub fn display_name(&self) -> String {
        if let Some(ref username) = self.username {
            username.clone()
        } else if let Some(ref first) = self.first_name {
            first.clone()
        } else {
            self.id.to_string()
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A user the bot has greeted at least once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotUser {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub joined_at: DateTime<Utc>,
    pub message_count: u64,
}

impl BotUser {
    /// Fresh record for a first contact.
    pub fn from_sender(sender: &User) -> Self {
        Self {
            id: sender.id,
            username: sender.username.clone(),
            first_name: sender.first_name.clone(),
            joined_at: Utc::now(),
            message_count: 0,
        }
    }

    /// Name used in greetings; `None` when the platform gave no username.
    pub fn greeting_name(&self) -> Option<&str> {
        self.username.as_deref().filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_username() {
        let user = User::new(7).with_username("ann").with_first_name("Ann");
        assert_eq!(user.display_name(), "ann");

        let user = User::new(7).with_first_name("Ann");
        assert_eq!(user.display_name(), "Ann");

        assert_eq!(User::new(7).to_string(), "7");
    }

    #[test]
    fn test_new_record_starts_at_zero() {
        let sender = User::new(42).with_username("Bob").with_first_name("Robert");
        let record = BotUser::from_sender(&sender);

        assert_eq!(record.id, 42);
        assert_eq!(record.message_count, 0);
        assert_eq!(record.first_name.as_deref(), Some("Robert"));
        assert_eq!(record.greeting_name(), Some("Bob"));
    }

    #[test]
    fn test_empty_username_has_no_greeting_name() {
        let record = BotUser::from_sender(&User::new(1).with_username(""));
        assert_eq!(record.greeting_name(), None);
    }
}
