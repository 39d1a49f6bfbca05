//! Telegram implementation of `MessageSink`.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::notify::MessageSink;

/// Request body for the Bot API `sendMessage` method.
#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Sink that delivers messages to a Telegram chat through the Bot API.
pub struct TelegramSink {
    client: Client,
    url: String,
    chat_id: String,
}

impl TelegramSink {
    pub fn new(bot_token: &str, chat_id: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: format!("https://api.telegram.org/bot{}/sendMessage", bot_token),
            chat_id: chat_id.to_string(),
        })
    }
}

#[async_trait]
impl MessageSink for TelegramSink {
    async fn send(&self, text: &str) -> Result<()> {
        let body = SendMessage {
            chat_id: &self.chat_id,
            text,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .context("Failed to reach the Telegram Bot API")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Telegram Bot API returned {}", status);
        }

        Ok(())
    }
}
