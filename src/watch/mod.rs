//! The poll loop — fetch, validate, diff, notify, sleep.
//!
//! One cycle completes fully (including its sleep) before the next begins:
//! exactly one outstanding request at a time, no overlapping sends. The
//! watcher owns all mutable loop state (watermark and error memo), so no
//! locking is needed.
//!
//! Failure policy: every recoverable error is caught at this boundary,
//! logged, and notified at most once per distinct text. The watermark only
//! advances on a fully successful cycle — a failed cycle retries the same
//! window next round, trading duplicate delivery for never silently
//! skipping an interval.

pub mod memo;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;

use crate::api::{FetchError, StatusSource};
use crate::notify::Notifier;
use crate::status::{extract_latest, parse_status, validate, ItemError, SchemaError};

pub use memo::ErrorMemo;

/// Chat-facing prefix for cycle failure diagnostics.
const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Any recoverable error a cycle can produce. Caught at the loop boundary,
/// never propagated past it.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Item(#[from] ItemError),
}

/// What a single cycle did. Returned by `run_cycle` so tests can drive the
/// loop one deterministic step at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A status change was parsed and handed to the notifier.
    Notified,
    /// Nothing new upstream.
    NoChange,
    /// The cycle failed; carries the diagnostic text.
    Failed(String),
}

/// The long-lived poll loop controller.
pub struct StatusWatcher {
    source: Arc<dyn StatusSource + Send + Sync>,
    notifier: Notifier,
    watermark: i64,
    memo: ErrorMemo,
    poll_interval: Duration,
}

impl StatusWatcher {
    pub fn new(
        source: Arc<dyn StatusSource + Send + Sync>,
        notifier: Notifier,
        start_watermark: i64,
        poll_interval: Duration,
    ) -> Self {
        Self {
            source,
            notifier,
            watermark: start_watermark,
            memo: ErrorMemo::default(),
            poll_interval,
        }
    }

    /// The current watermark. Advances only after a successful cycle.
    pub fn watermark(&self) -> i64 {
        self.watermark
    }

    /// Number of distinct failure texts notified so far.
    pub fn remembered_failures(&self) -> usize {
        self.memo.len()
    }

    /// Run cycles until the shutdown signal flips. The sleep runs after
    /// every cycle regardless of outcome, so the loop cannot busy-spin;
    /// shutdown is checked both before the cycle and during the sleep.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        loop {
            if *shutdown.borrow() {
                break;
            }

            self.run_cycle().await;

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {}
                changed = shutdown.changed() => {
                    // A dropped sender means no further signals can arrive;
                    // stop rather than spin through an unsleepable select.
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("watcher stopped");
    }

    /// One fetch-validate-diff-notify cycle, without the sleep.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll_once().await {
            Ok(Some(message)) => {
                self.notifier.notify(&message).await;
                tracing::info!(watermark = self.watermark, "status change notified");
                CycleOutcome::Notified
            }
            Ok(None) => {
                tracing::info!("no status change");
                CycleOutcome::NoChange
            }
            Err(error) => self.report_failure(&error).await,
        }
    }

    /// Fetch and interpret one payload. `Ok(None)` means no new statuses.
    /// The watermark advances here, after everything else succeeded.
    async fn poll_once(&mut self) -> Result<Option<String>, CycleError> {
        let raw = self.source.fetch(self.watermark).await?;

        let payload = match validate(&raw) {
            Ok(payload) => payload,
            // An empty list is a quiet interval, not a fault. Still logged:
            // strictly speaking the payload failed validation.
            Err(error @ SchemaError::EmptyList) => {
                tracing::debug!("schema note: {}", error);
                return Ok(None);
            }
            Err(error) => return Err(error.into()),
        };

        let Some(latest) = extract_latest(&payload) else {
            return Ok(None);
        };

        let message = parse_status(latest)?;
        self.watermark = payload.as_of;
        Ok(Some(message))
    }

    /// Log a cycle failure and notify it once per distinct text.
    async fn report_failure(&mut self, error: &CycleError) -> CycleOutcome {
        let text = format!("{}: {}", FAILURE_PREFIX, error);
        tracing::error!("{}", text);

        if self.memo.contains(&text) {
            tracing::debug!("failure already notified, suppressing");
        } else {
            self.notifier.notify(&text).await;
            self.memo.record(text.clone());
        }

        CycleOutcome::Failed(text)
    }
}
