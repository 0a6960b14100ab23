use std::process::ExitCode;

use welcome_bot::application::errors::BotError;
use welcome_bot::application::messaging::MessageDispatcher;
use welcome_bot::application::services::{CommandService, MessageService};
use welcome_bot::domain::traits::Bot;
use welcome_bot::infrastructure::adapters::telegram::{TelegramAdapter, UpdatePoller};
use welcome_bot::infrastructure::config::Config;

fn main() -> ExitCode {
    // A missing .env is fine; the token may come from the real environment
    let dotenv = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    if let Err(e) = dotenv {
        tracing::debug!("No .env file loaded: {}", e);
    }

    let config_path = std::env::var("BOT_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());
    let config = match Config::resolve(&config_path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run_bot(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_bot(config: Config) -> Result<(), BotError> {
    let token = config.token()?;

    let mut bot = TelegramAdapter::from_config(token, &config.telegram);
    bot.fetch_bot_info().await?;
    let info = bot.bot_info();
    tracing::info!("Authorized on account {} (id {})", info.username, info.id);

    let sender = MessageService::new(bot);
    let commands = CommandService::with_defaults();
    tracing::info!("Registered {} commands", commands.len());
    let mut dispatcher = MessageDispatcher::new(commands);
    let mut poller = UpdatePoller::new(config.telegram.poll_timeout);

    poller.run(&sender, &mut dispatcher).await;
    Ok(())
}
