//! Outbound review-API access.

pub mod fetcher;

pub use fetcher::{FetchError, HttpStatusSource, StatusSource};
