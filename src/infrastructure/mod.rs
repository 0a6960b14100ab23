//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Storage: In-memory user registry
//! - Adapters: Platform integrations (Telegram)

pub mod config;
pub mod storage;
pub mod adapters;
