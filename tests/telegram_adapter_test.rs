//! Telegram adapter tests against a mock Bot API server
//! Run with: cargo test --test telegram_adapter_test

use mockito::Matcher;
use serde_json::json;
use welcome_bot::application::errors::BotError;
use welcome_bot::application::messaging::{DispatchOutcome, MessageDispatcher};
use welcome_bot::application::services::command_service::help_text;
use welcome_bot::application::services::MessageService;
use welcome_bot::domain::entities::Command;
use welcome_bot::domain::traits::Bot;
use welcome_bot::infrastructure::adapters::telegram::{TelegramAdapter, UpdatePoller};

const TEST_BOT_TOKEN: &str = "123456:TEST";

fn path(method: &str) -> String {
    format!("/bot{}/{}", TEST_BOT_TOKEN, method)
}

fn text_update(update_id: i64, text: &str) -> serde_json::Value {
    json!({
        "update_id": update_id,
        "message": {
            "message_id": update_id * 10,
            "from": {"id": 42, "is_bot": false, "first_name": "Robert", "username": "Bob"},
            "chat": {"id": 1042, "type": "private"},
            "date": 1700000000,
            "text": text
        }
    })
}

#[tokio::test]
async fn test_fetch_bot_info() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", path("getMe").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":true,"result":{"id":99,"is_bot":true,"first_name":"Welcome","username":"welcome_bot"}}"#)
        .create_async()
        .await;

    let mut bot = TelegramAdapter::with_api_url(TEST_BOT_TOKEN, server.url());
    bot.fetch_bot_info().await.expect("getMe should succeed");

    mock.assert_async().await;
    assert_eq!(bot.bot_info().id, 99);
    assert_eq!(bot.bot_info().username, "welcome_bot");
}

#[tokio::test]
async fn test_bad_token_is_auth_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", path("getMe").as_str())
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#)
        .create_async()
        .await;

    let mut bot = TelegramAdapter::with_api_url(TEST_BOT_TOKEN, server.url());
    let err = bot.fetch_bot_info().await.unwrap_err();

    assert!(matches!(err, BotError::Auth(ref d) if d == "Unauthorized"), "got {:?}", err);
}

#[tokio::test]
async fn test_send_message() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", path("sendMessage").as_str())
        .match_body(Matcher::PartialJson(json!({"chat_id": 1042, "text": "hello"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":true,"result":{"message_id":555,"chat":{"id":1042},"date":0}}"#)
        .create_async()
        .await;

    let bot = TelegramAdapter::with_api_url(TEST_BOT_TOKEN, server.url());
    let id = bot.send_message(1042, "hello").await.expect("send should succeed");

    mock.assert_async().await;
    assert_eq!(id, 555);
}

#[tokio::test]
async fn test_send_message_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", path("sendMessage").as_str())
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#)
        .create_async()
        .await;

    let bot = TelegramAdapter::with_api_url(TEST_BOT_TOKEN, server.url());
    let err = bot.send_message(1, "hello").await.unwrap_err();

    assert!(matches!(err, BotError::Api { code: 400, .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_non_json_error_is_network_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", path("sendMessage").as_str())
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let bot = TelegramAdapter::with_api_url(TEST_BOT_TOKEN, server.url());
    let err = bot.send_message(1, "hello").await.unwrap_err();

    assert!(matches!(err, BotError::Network(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_poll_once_dispatches_in_order_and_survives_send_failure() {
    let mut server = mockito::Server::new_async().await;

    let updates = json!({
        "ok": true,
        "result": [text_update(10, "/start"), text_update(11, "/help"), text_update(12, "hi")]
    });
    let _get_updates = server
        .mock("POST", path("getUpdates").as_str())
        .match_body(Matcher::PartialJson(json!({"offset": 0, "timeout": 1})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(updates.to_string())
        .create_async()
        .await;

    // The welcome reply fails, the help reply goes through
    let welcome = server
        .mock("POST", path("sendMessage").as_str())
        .match_body(Matcher::PartialJson(json!({"text": "Hello, Bob! Welcome to my bot! 🤖"})))
        .with_status(403)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":false,"error_code":403,"description":"Forbidden: bot was blocked by the user"}"#)
        .expect(1)
        .create_async()
        .await;
    let help = server
        .mock("POST", path("sendMessage").as_str())
        .match_body(Matcher::PartialJson(json!({"chat_id": 1042, "text": help_text()})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":true,"result":{"message_id":1}}"#)
        .expect(1)
        .create_async()
        .await;

    let sender = MessageService::new(TelegramAdapter::with_api_url(TEST_BOT_TOKEN, server.url()));
    let mut dispatcher = MessageDispatcher::default();
    let mut poller = UpdatePoller::new(1);

    let outcomes = poller
        .poll_once(&sender, &mut dispatcher)
        .await
        .expect("poll should succeed");

    assert_eq!(
        outcomes,
        vec![
            DispatchOutcome::SendFailed,
            DispatchOutcome::Replied(Command::Help),
            DispatchOutcome::Ignored,
        ]
    );
    assert_eq!(poller.offset(), 13);
    assert_eq!(dispatcher.users().get(42).map(|u| u.message_count), Some(1));

    welcome.assert_async().await;
    help.assert_async().await;
}

#[tokio::test]
async fn test_poll_failure_keeps_offset() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", path("getUpdates").as_str())
        .with_status(500)
        .with_body("oops")
        .create_async()
        .await;

    let sender = MessageService::new(TelegramAdapter::with_api_url(TEST_BOT_TOKEN, server.url()));
    let mut dispatcher = MessageDispatcher::default();
    let mut poller = UpdatePoller::new(1);

    assert!(poller.poll_once(&sender, &mut dispatcher).await.is_err());
    assert_eq!(poller.offset(), 0);
}
