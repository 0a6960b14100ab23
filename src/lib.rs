//! welcome-bot - a small Telegram bot that greets users
//!
//! Updates are long-polled from the Bot API and dispatched one at a time.
//! `/start` and `/help` get canned replies, anything else starting with a
//! slash gets a pointer to `/help`, and plain text is only counted.

pub mod domain;
pub mod application;
pub mod infrastructure;
