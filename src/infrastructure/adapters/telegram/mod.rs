//! Telegram adapter

mod poller;

pub use poller::UpdatePoller;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::errors::BotError;
use crate::application::messaging::MessageParser;
use crate::domain::entities;
use crate::domain::traits::{Bot, BotInfo};
use crate::infrastructure::config::TelegramConfig;

/// Extra time the HTTP client waits beyond the long-poll timeout
const POLL_GRACE: Duration = Duration::from_secs(10);

/// Telegram update type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

/// Envelope around every Bot API response
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    error_code: Option<u16>,
    description: Option<String>,
}

/// Request URLs embed the bot token, so they never reach error messages
fn network_error(e: reqwest::Error) -> BotError {
    BotError::Network(e.without_url().to_string())
}

impl From<User> for entities::User {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
        }
    }
}

impl Update {
    /// Convert into a domain message. Updates without a message are dropped.
    pub fn into_message(self, parser: &MessageParser) -> Option<entities::Message> {
        let msg = self.message?;
        let sender = msg.from.map(entities::User::from);
        let text = msg.text.unwrap_or_default();

        Some(parser.parse(msg.chat.id, text, sender).with_id(msg.message_id))
    }
}

/// Telegram bot adapter
pub struct TelegramAdapter {
    token: String,
    api_url: String,
    debug: bool,
    client: Client,
    info: BotInfo,
}

impl TelegramAdapter {
    pub fn with_api_url(token: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            debug: false,
            client: Client::new(),
            info: BotInfo {
                id: 0,
                username: "welcome_bot".to_string(),
            },
        }
    }

    pub fn from_config(token: impl Into<String>, config: &TelegramConfig) -> Self {
        Self::with_api_url(token, config.api_url.clone()).with_debug(config.debug)
    }

    /// Log every request and response
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    /// Decode a Bot API response, turning `ok: false` into an error
    async fn decode<T: DeserializeOwned>(&self, method: &str, response: Response) -> Result<T, BotError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(network_error)?;

        if self.debug {
            tracing::info!("{} resp: {}", method, body);
        }

        let data: ApiResponse<T> = match serde_json::from_str(&body) {
            Ok(data) => data,
            Err(e) if status.is_success() => return Err(BotError::Parse(e.to_string())),
            Err(_) => return Err(BotError::Network(format!("Telegram API error: {}", status))),
        };

        if data.ok {
            return data
                .result
                .ok_or_else(|| BotError::Parse(format!("{}: response without result", method)));
        }

        let description = data.description.unwrap_or_else(|| status.to_string());
        let code = data.error_code.unwrap_or(status.as_u16());
        if code == StatusCode::UNAUTHORIZED.as_u16() {
            return Err(BotError::Auth(description));
        }
        Err(BotError::Api { code, description })
    }

    async fn call<Req: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        request: &Req,
        timeout: Option<Duration>,
    ) -> Result<T, BotError> {
        if self.debug {
            let payload = serde_json::to_string(request).unwrap_or_default();
            tracing::info!("Endpoint: {}, params: {}", method, payload);
        }

        let mut builder = self.client.post(self.api_url(method)).json(request);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(network_error)?;

        self.decode(method, response).await
    }

    /// Fetch bot info from Telegram API, verifying the token
    pub async fn fetch_bot_info(&mut self) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct BotInfoResponse {
            id: i64,
            username: Option<String>,
        }

        let url = self.api_url("getMe");
        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(network_error)?;

        let data: BotInfoResponse = self.decode("getMe", response).await?;

        self.info = BotInfo {
            id: data.id,
            username: data.username.unwrap_or_default(),
        };

        Ok(())
    }

    /// Get updates from Telegram using getUpdates API
    pub async fn get_updates(&self, offset: i64, timeout: u64) -> Result<Vec<Update>, BotError> {
        #[derive(Serialize)]
        struct GetUpdatesRequest {
            offset: i64,
            timeout: u64,
            allowed_updates: Vec<String>,
        }

        let request = GetUpdatesRequest {
            offset,
            timeout,
            allowed_updates: vec!["message".to_string()],
        };

        self.call("getUpdates", &request, Some(Duration::from_secs(timeout) + POLL_GRACE))
            .await
    }

    /// Get the next update offset, keeping `current` when nothing arrived
    pub fn get_next_offset(updates: &[Update], current: i64) -> i64 {
        updates.iter()
            .map(|u| u.update_id + 1)
            .max()
            .map_or(current, |next| next.max(current))
    }

    /// Send a plain text message via Telegram API
    pub async fn send_message_api(&self, chat_id: i64, text: &str) -> Result<i64, BotError> {
        #[derive(Serialize)]
        struct SendMessageRequest<'a> {
            chat_id: i64,
            text: &'a str,
        }

        #[derive(Deserialize)]
        struct MessageResult {
            message_id: i64,
        }

        let request = SendMessageRequest { chat_id, text };
        let data: MessageResult = self.call("sendMessage", &request, None).await?;

        Ok(data.message_id)
    }
}

#[async_trait]
impl Bot for TelegramAdapter {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<i64, BotError> {
        self.send_message_api(chat_id, text).await
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
