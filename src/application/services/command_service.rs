use crate::domain::entities::{BotUser, Command, CommandRegistry, Message};
use crate::infrastructure::storage::UserRegistry;

/// Builds replies for the registered commands
pub struct CommandService {
    registry: CommandRegistry,
}

impl CommandService {
    pub fn new(registry: CommandRegistry) -> Self {
        Self { registry }
    }

    pub fn with_defaults() -> Self {
        Self::new(CommandRegistry::with_defaults())
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn lookup(&self, name: &str) -> Option<Command> {
        self.registry.get(name)
    }

    /// Run a command and return the reply text
    pub fn handle(&self, command: Command, message: &Message, users: &mut UserRegistry) -> String {
        match command {
            Command::Start => {
                let user = match &message.sender {
                    Some(sender) => Some(users.get_or_create(sender)),
                    None => None,
                };
                welcome_text(user.as_deref())
            }
            Command::Help => help_text(),
        }
    }
}

impl Default for CommandService {
    fn default() -> Self {
        Self::with_defaults()
    }
}

pub fn welcome_text(user: Option<&BotUser>) -> String {
    match user.and_then(BotUser::greeting_name) {
        Some(name) => format!("Hello, {}! Welcome to my bot! 🤖", name),
        None => "Hello! Welcome to my bot! 🤖".to_string(),
    }
}

pub fn help_text() -> String {
    let mut help = "Available commands:".to_string();
    for cmd in Command::ALL {
        help.push_str(&format!("\n/{} - {}", cmd.name(), cmd.description()));
    }
    help
}
