//! Long-polling loop over getUpdates

use std::time::Duration;

use super::TelegramAdapter;
use crate::application::errors::BotError;
use crate::application::messaging::{DispatchOutcome, MessageDispatcher, MessageParser};
use crate::application::services::MessageService;

/// Pause before re-polling after a failed getUpdates call
const ERROR_PAUSE: Duration = Duration::from_secs(5);

/// Pulls updates one batch at a time and feeds them to the dispatcher in order
pub struct UpdatePoller {
    offset: i64,
    timeout: u64,
    parser: MessageParser,
}

impl UpdatePoller {
    pub fn new(timeout: u64) -> Self {
        Self {
            offset: 0,
            timeout,
            parser: MessageParser::new(),
        }
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// One long-poll round. Blocks until updates arrive or the poll times out,
    /// then dispatches each update. Returns the outcomes in arrival order.
    pub async fn poll_once(
        &mut self,
        sender: &MessageService<TelegramAdapter>,
        dispatcher: &mut MessageDispatcher,
    ) -> Result<Vec<DispatchOutcome>, BotError> {
        let updates = sender.bot().get_updates(self.offset, self.timeout).await?;
        if !updates.is_empty() {
            tracing::debug!("Received {} updates", updates.len());
        }

        self.offset = TelegramAdapter::get_next_offset(&updates, self.offset);

        let mut outcomes = Vec::with_capacity(updates.len());
        for update in updates {
            let Some(message) = update.into_message(&self.parser) else {
                continue;
            };
            outcomes.push(dispatcher.dispatch(sender, &message).await);
        }

        Ok(outcomes)
    }

    /// Poll forever. Only process termination stops the loop.
    pub async fn run(&mut self, sender: &MessageService<TelegramAdapter>, dispatcher: &mut MessageDispatcher) {
        tracing::info!("Starting message loop...");

        loop {
            if let Err(e) = self.poll_once(sender, dispatcher).await {
                tracing::error!("Failed to get updates: {}", e);
                tokio::time::sleep(ERROR_PAUSE).await;
            }
        }
    }
}
