//! Error types for the festival calendar generator
//!
//! This module defines all error types used throughout the library.
//! JieriError implements Serialize so failures can be reported as JSON.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Why a raw festival entry could not be turned into a dated festival
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryDefect {
    /// No `[` separating the name from the date fragment
    #[error("missing '[' between name and date")]
    MissingBracket,

    /// Nothing left of the name once brackets and whitespace are stripped
    #[error("empty festival name")]
    EmptyName,

    /// The date fragment has no `<m>月<d>日` pattern
    #[error("no month/day pattern in date fragment")]
    MissingDate,

    /// Month/day pattern found but it is not a real day of the target year
    #[error("{month}月{day}日 is not a valid date in {year}")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

/// Error type for calendar generation operations
#[derive(Error, Debug)]
pub enum JieriError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to parse page content
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// Required HTML element was not found
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Source page was not found (HTTP 404)
    #[error("Page not found: {0}")]
    NotFound(String),

    /// A scraped festival string does not have the `name[date]` shape
    #[error("Malformed festival entry {raw:?}: {defect}")]
    MalformedEntry { raw: String, defect: EntryDefect },

    /// Reading or writing a local file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl JieriError {
    /// Build a `MalformedEntry` error for the given raw text
    pub fn malformed(raw: &str, defect: EntryDefect) -> Self {
        JieriError::MalformedEntry {
            raw: raw.to_string(),
            defect,
        }
    }
}

/// Serialize JieriError as its display string
impl Serialize for JieriError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for calendar generation operations
pub type Result<T> = std::result::Result<T, JieriError>;
