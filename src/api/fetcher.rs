//! Status fetcher — one outbound request per poll cycle.
//!
//! Every failure path (transport, non-200 status, undecodable body, the
//! upstream's own error envelope) collapses into a single opaque
//! `FetchError` carrying the cause text. The loop only ever logs it and
//! retries next cycle, so sub-kinds are deliberately not distinguishable.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// A failed fetch attempt. Carries the underlying cause as text only.
#[derive(Debug, Error)]
#[error("status request failed: {cause}")]
pub struct FetchError {
    cause: String,
}

impl FetchError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self { cause: cause.into() }
    }
}

/// Source of status payloads.
/// The production implementation talks HTTP; tests substitute scripted mocks.
#[async_trait]
pub trait StatusSource {
    /// Fetch items updated after `watermark`. Returns the decoded body
    /// before shape validation.
    async fn fetch(&self, watermark: i64) -> Result<Value, FetchError>;
}

/// HTTP implementation of `StatusSource` against the review API.
pub struct HttpStatusSource {
    client: Client,
    endpoint: String,
    token: String,
}

impl HttpStatusSource {
    /// Build a source with its own client and an explicit request timeout.
    /// The timeout must stay below the poll interval so a hung request
    /// cannot overrun the cycle.
    pub fn new(endpoint: &str, token: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            token: token.to_string(),
        })
    }
}

#[async_trait]
impl StatusSource for HttpStatusSource {
    async fn fetch(&self, watermark: i64) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", watermark)])
            .send()
            .await
            .map_err(|e| FetchError::new(format!("request error: {}", e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::new(format!("unexpected HTTP status {}", status)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| FetchError::new(format!("undecodable response body: {}", e)))?;

        // The upstream reports its own failures inside a 200 body.
        if let Some(error) = body.get("error") {
            return Err(FetchError::new(format!("upstream error envelope: {}", error)));
        }
        if let Some(code) = body.get("code") {
            return Err(FetchError::new(format!("upstream error code: {}", code)));
        }

        tracing::debug!("fetched status payload for from_date={}", watermark);
        Ok(body)
    }
}
