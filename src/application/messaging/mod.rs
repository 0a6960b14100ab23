//! Message handling - Parsing and dispatching of incoming updates

pub mod dispatcher;
pub mod parser;

pub use dispatcher::{DispatchOutcome, MessageDispatcher};
pub use parser::MessageParser;
