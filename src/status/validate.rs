//! Payload validation and status extraction.
//!
//! Validation runs over raw `serde_json::Value` rather than through typed
//! deserialization so that each broken invariant maps to its own named
//! `SchemaError` — operators see "missing current_date", not a generic
//! serde type error.
//!
//! Checks mirror the upstream contract, in order: structured mapping,
//! `current_date` present and integral, `homeworks` present, a sequence,
//! and non-empty.

use serde_json::Value;
use thiserror::Error;

use crate::status::types::{ReviewStatus, StatusPayload, TrackedItem};

/// A payload shape violation. Each variant names the invariant that broke.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// `current_date` is absent.
    #[error("response is missing the \"current_date\" field")]
    MissingDate,
    /// `homeworks` is absent.
    #[error("response is missing the \"homeworks\" field")]
    MissingList,
    /// A field (or the response itself) has the wrong type.
    #[error("field \"{0}\" has the wrong type")]
    WrongType(&'static str),
    /// `homeworks` is present but empty — no new statuses.
    #[error("the \"homeworks\" list is empty")]
    EmptyList,
}

/// A malformed tracked item inside an otherwise valid payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ItemError {
    /// `homework_name` or `status` is absent or empty.
    #[error("homework entry is missing its name or status")]
    IncompleteItem,
    /// The status code is not in the verdict table.
    #[error("unknown homework status: {0:?}")]
    UnknownStatus(String),
}

/// Validate a decoded response body into a `StatusPayload`.
pub fn validate(raw: &Value) -> Result<StatusPayload, SchemaError> {
    let response = raw.as_object().ok_or(SchemaError::WrongType("response"))?;

    let date = response.get("current_date").ok_or(SchemaError::MissingDate)?;
    let as_of = date.as_i64().ok_or(SchemaError::WrongType("current_date"))?;

    let list = response.get("homeworks").ok_or(SchemaError::MissingList)?;
    let entries = list.as_array().ok_or(SchemaError::WrongType("homeworks"))?;
    if entries.is_empty() {
        return Err(SchemaError::EmptyList);
    }

    // Extract leniently: absent or non-string fields become None and are
    // caught later by parse_status, which can name the item in its error.
    let homeworks = entries
        .iter()
        .map(|entry| TrackedItem {
            homework_name: string_field(entry, "homework_name"),
            status: string_field(entry, "status"),
        })
        .collect();

    Ok(StatusPayload { as_of, homeworks })
}

/// The most recent tracked item, if any. The upstream guarantees
/// newest-first ordering, so "latest" is simply the first entry.
pub fn extract_latest(payload: &StatusPayload) -> Option<&TrackedItem> {
    payload.homeworks.first()
}

/// Build the notification message for a tracked item: name plus the
/// verdict phrase from the fixed table.
pub fn parse_status(item: &TrackedItem) -> Result<String, ItemError> {
    let name = item
        .homework_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or(ItemError::IncompleteItem)?;
    let code = item
        .status
        .as_deref()
        .filter(|code| !code.is_empty())
        .ok_or(ItemError::IncompleteItem)?;

    let status = ReviewStatus::from_code(code)
        .ok_or_else(|| ItemError::UnknownStatus(code.to_string()))?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        status.verdict()
    ))
}

fn string_field(entry: &Value, key: &str) -> Option<String> {
    entry.get(key).and_then(Value::as_str).map(str::to_string)
}
