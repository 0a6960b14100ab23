//! In-memory user registry
//!
//! Records live for the lifetime of the process. The registry is owned by the
//! dispatch loop and handed to handlers by `&mut`, so it needs no locking.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::domain::entities::{BotUser, User};

/// Users the bot has seen, keyed by platform user id
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: HashMap<i64, BotUser>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the record for `sender.id`, creating it on first contact.
    /// An existing record is returned untouched.
    pub fn get_or_create(&mut self, sender: &User) -> &mut BotUser {
        match self.users.entry(sender.id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                tracing::debug!("Registering user {} ({})", sender.id, sender);
                entry.insert(BotUser::from_sender(sender))
            }
        }
    }

    /// Bump the message count of a known user. Unknown ids are ignored.
    pub fn record_message(&mut self, id: i64) {
        if let Some(user) = self.users.get_mut(&id) {
            user.message_count += 1;
        }
    }

    pub fn get(&self, id: i64) -> Option<&BotUser> {
        self.users.get(&id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
