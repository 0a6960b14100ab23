//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Default Telegram Bot API endpoint
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Default long-poll timeout in seconds
pub const DEFAULT_POLL_TIMEOUT: u64 = 60;

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub telegram: TelegramConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TelegramConfig {
    pub token: Option<String>,
    pub api_url: String,
    pub poll_timeout: u64,
    pub debug: bool,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: DEFAULT_API_URL.to_string(),
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            debug: false,
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Load the optional config file, then apply environment overrides.
    /// A missing or broken file falls back to defaults.
    pub fn resolve(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let config = if path.exists() {
            Config::load(&path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config: {}, using defaults", e);
                Config::default()
            })
        } else {
            Config::default()
        };

        config.load_env()
    }

    /// Overlay environment variables on top of this config
    pub fn load_env(self) -> Result<Self, ConfigError> {
        self.apply_env(|key| std::env::var(key).ok())
    }

    fn apply_env(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(token) = var("TELEGRAM_BOT_TOKEN").filter(|t| !t.is_empty()) {
            self.telegram.token = Some(token);
        }

        if let Some(url) = var("TELEGRAM_API_URL").filter(|u| !u.is_empty()) {
            self.telegram.api_url = url;
        }

        if let Some(timeout) = var("TELEGRAM_POLL_TIMEOUT") {
            self.telegram.poll_timeout = timeout.trim().parse().map_err(|_| {
                ConfigError::InvalidValue(format!("TELEGRAM_POLL_TIMEOUT must be a number of seconds, got {:?}", timeout))
            })?;
        }

        Ok(self)
    }

    /// The bot token, required to start
    pub fn token(&self) -> Result<&str, ConfigError> {
        self.telegram
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::MissingField(
                    "TELEGRAM_BOT_TOKEN is not set. Put it in a .env file or export it: export TELEGRAM_BOT_TOKEN=your_token"
                        .to_string(),
                )
            })
    }
}
