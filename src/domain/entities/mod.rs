//! Domain entities - Core business objects with no external dependencies

pub mod user;
pub mod message;
pub mod command;

pub use user::{User, BotUser};
pub use message::{Message, Content};
pub use command::{Command, CommandRegistry, UNKNOWN_COMMAND_TEXT};
