//! Notification delivery.
//!
//! `MessageSink` is the seam to the external messaging service; `Notifier`
//! is the scoped wrapper the loop actually calls. A sink failure is logged
//! and swallowed — the polling cadence must never starve on a flaky
//! downstream.

pub mod telegram;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub use telegram::TelegramSink;

/// Trait for message sinks.
/// Implementations can be Telegram, a webhook, a test recorder, etc.
#[async_trait]
pub trait MessageSink {
    async fn send(&self, text: &str) -> Result<()>;
}

/// Delivery wrapper over a sink. Logs the outcome, never raises.
#[derive(Clone)]
pub struct Notifier {
    sink: Arc<dyn MessageSink + Send + Sync>,
}

impl Notifier {
    pub fn new(sink: Arc<dyn MessageSink + Send + Sync>) -> Self {
        Self { sink }
    }

    /// Send `text` to the sink. Failures are logged and dropped.
    pub async fn notify(&self, text: &str) {
        match self.sink.send(text).await {
            Ok(()) => tracing::debug!("notification delivered"),
            Err(e) => tracing::error!("failed to deliver notification: {:#}", e),
        }
    }
}
