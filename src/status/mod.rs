//! Status payload validation and verdict mapping.

pub mod types;
pub mod validate;

pub use types::{ReviewStatus, StatusPayload, TrackedItem};
pub use validate::{extract_latest, parse_status, validate, ItemError, SchemaError};
