//! Process configuration — required credentials and tuning knobs.
//!
//! Everything comes from the environment. Missing (or empty) credentials are
//! a fatal startup condition: the watcher refuses to run half-configured
//! rather than discover the problem mid-loop.

use std::time::Duration;

use thiserror::Error;

/// The review API endpoint polled for homework statuses.
pub const DEFAULT_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// How long to sleep between poll cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(600);

/// Per-request timeout. Must stay well below the poll interval so a hung
/// request can never overrun the cycle.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Required environment variables, in the order they are checked.
pub const REQUIRED_VARS: [&str; 3] =
    ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

/// Fatal configuration errors. Anything here aborts startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required credential is absent or empty.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
}

/// Runtime configuration for the watcher.
#[derive(Debug, Clone)]
pub struct Config {
    /// OAuth token for the review API (`PRACTICUM_TOKEN`).
    pub api_token: String,
    /// Telegram bot token (`TELEGRAM_TOKEN`).
    pub bot_token: String,
    /// Target chat identifier (`TELEGRAM_CHAT_ID`).
    pub chat_id: String,
    /// Status endpoint URL.
    pub endpoint: String,
    /// Sleep between poll cycles.
    pub poll_interval: Duration,
    /// Timeout applied to each outbound request.
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an injected lookup.
    /// Tests use this to avoid mutating process-global state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            match lookup(name) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(ConfigError::MissingVar(name)),
            }
        };

        Ok(Self {
            api_token: required("PRACTICUM_TOKEN")?,
            bot_token: required("TELEGRAM_TOKEN")?,
            chat_id: required("TELEGRAM_CHAT_ID")?,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_full_config_loads() {
        let vars = env(&[
            ("PRACTICUM_TOKEN", "api-token"),
            ("TELEGRAM_TOKEN", "bot-token"),
            ("TELEGRAM_CHAT_ID", "12345"),
        ]);
        let config = Config::from_lookup(|name| vars.get(name).cloned()).unwrap();

        assert_eq!(config.api_token, "api-token");
        assert_eq!(config.chat_id, "12345");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
        assert!(config.request_timeout < config.poll_interval);
    }

    #[test]
    fn test_missing_var_is_fatal() {
        let vars = env(&[
            ("PRACTICUM_TOKEN", "api-token"),
            ("TELEGRAM_CHAT_ID", "12345"),
        ]);
        let err = Config::from_lookup(|name| vars.get(name).cloned()).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("TELEGRAM_TOKEN"));
    }

    #[test]
    fn test_empty_var_counts_as_missing() {
        let vars = env(&[
            ("PRACTICUM_TOKEN", "   "),
            ("TELEGRAM_TOKEN", "bot-token"),
            ("TELEGRAM_CHAT_ID", "12345"),
        ]);
        let err = Config::from_lookup(|name| vars.get(name).cloned()).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("PRACTICUM_TOKEN"));
    }
}
