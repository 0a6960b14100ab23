use std::collections::HashMap;

/// Reply for any command token that is not registered
pub const UNKNOWN_COMMAND_TEXT: &str = "Unknown command. Use /help for the list of commands.";

/// The fixed set of commands the bot understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Start,
    Help,
}

impl Command {
    pub const ALL: [Command; 2] = [Command::Start, Command::Help];

    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Command::Start => "Start using the bot",
            Command::Help => "Show this help",
        }
    }
}

/// Command registry: keyword (without slash) to command.
/// Filled once at startup.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `/start` and `/help`
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for command in Command::ALL {
            registry.register(command);
        }
        registry
    }

    pub fn register(&mut self, command: Command) {
        self.commands.insert(command.name().to_string(), command);
    }

    pub fn get(&self, name: &str) -> Option<Command> {
        self.commands.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
