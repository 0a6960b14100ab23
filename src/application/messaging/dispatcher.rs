//! Message dispatcher - Routes messages to command handlers

use crate::application::services::{CommandService, MessageService};
use crate::domain::entities::{Command, Content, Message, UNKNOWN_COMMAND_TEXT};
use crate::domain::traits::Bot;
use crate::infrastructure::storage::UserRegistry;

/// What happened to a single update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A registered command ran and its reply was sent
    Replied(Command),
    /// The fallback reply was sent for an unregistered token
    UnknownCommand(String),
    /// Not a command, or no sender: nothing was sent
    Ignored,
    /// A reply was built but could not be delivered
    SendFailed,
}

/// Message dispatcher - owns the user registry and routes each update
pub struct MessageDispatcher {
    commands: CommandService,
    users: UserRegistry,
}

impl MessageDispatcher {
    pub fn new(commands: CommandService) -> Self {
        Self {
            commands,
            users: UserRegistry::new(),
        }
    }

    pub fn users(&self) -> &UserRegistry {
        &self.users
    }

    /// Process one update. Never fails: send errors are logged by the
    /// sender and reported through the outcome.
    pub async fn dispatch<B: Bot>(&mut self, sender: &MessageService<B>, message: &Message) -> DispatchOutcome {
        let Some(from) = &message.sender else {
            tracing::debug!("[{}] Skipping message {} without sender", message.chat_id, message.id);
            return DispatchOutcome::Ignored;
        };

        tracing::info!("[{}] {}", from, message.text);

        let name = match &message.content {
            Content::Command { name, .. } if !name.is_empty() => name.as_str(),
            _ => {
                self.users.record_message(from.id);
                return DispatchOutcome::Ignored;
            }
        };

        let (reply, outcome) = match self.commands.lookup(name) {
            Some(command) => (
                self.commands.handle(command, message, &mut self.users),
                DispatchOutcome::Replied(command),
            ),
            None => {
                // Only registered commands are exempt from the message count
                self.users.record_message(from.id);
                (
                    UNKNOWN_COMMAND_TEXT.to_string(),
                    DispatchOutcome::UnknownCommand(name.to_string()),
                )
            }
        };

        match sender.send(message.chat_id, &reply).await {
            Ok(()) => outcome,
            Err(e) => {
                tracing::warn!("Error handling command {}: {}", name, e);
                DispatchOutcome::SendFailed
            }
        }
    }
}

impl Default for MessageDispatcher {
    fn default() -> Self {
        Self::new(CommandService::with_defaults())
    }
}
