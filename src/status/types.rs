//! Wire types for the review API and the fixed verdict table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated server response: the server-side "now" plus the homework
/// list, newest first. Only ever constructed by `validate`, which guarantees
/// the list is non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusPayload {
    /// Server timestamp to advance the watermark to after a successful cycle.
    pub as_of: i64,
    /// Tracked homeworks, newest first (upstream ordering contract).
    pub homeworks: Vec<TrackedItem>,
}

/// One tracked homework as it appears on the wire. Fields are optional
/// because the upstream is lenient; `parse_status` enforces presence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackedItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homework_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// The fixed set of review statuses the upstream can report.
/// Any other status string is rejected as unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Taken for review, verdict pending.
    Pending,
    /// Reviewed and accepted.
    Approved,
    /// Reviewed, reviewer has remarks.
    Rejected,
}

impl ReviewStatus {
    /// Look up a status code in the verdict table.
    pub fn from_code(code: &str) -> Option<ReviewStatus> {
        match code {
            "pending" => Some(ReviewStatus::Pending),
            "approved" => Some(ReviewStatus::Approved),
            "rejected" => Some(ReviewStatus::Rejected),
            _ => None,
        }
    }

    /// The human-readable verdict phrase sent to the chat.
    /// These are the upstream product's user-facing strings.
    pub fn verdict(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "Работа взята на проверку ревьюером.",
            ReviewStatus::Approved => {
                "Работа проверена: ревьюеру всё понравилось. Ура!"
            }
            ReviewStatus::Rejected => {
                "Работа проверена: у ревьюера есть замечания."
            }
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewStatus::Pending => write!(f, "pending"),
            ReviewStatus::Approved => write!(f, "approved"),
            ReviewStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_table_is_closed() {
        assert_eq!(ReviewStatus::from_code("approved"), Some(ReviewStatus::Approved));
        assert_eq!(ReviewStatus::from_code("pending"), Some(ReviewStatus::Pending));
        assert_eq!(ReviewStatus::from_code("rejected"), Some(ReviewStatus::Rejected));
        assert_eq!(ReviewStatus::from_code("reviewing"), None);
        assert_eq!(ReviewStatus::from_code("APPROVED"), None);
        assert_eq!(ReviewStatus::from_code(""), None);
    }
}
