//! Error types for date-ask.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in date-ask operations.
#[derive(Error, Debug)]
pub enum DateAskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("{date} is outside {first} .. {last}")]
    DateOutsideMonth {
        date: NaiveDate,
        first: NaiveDate,
        last: NaiveDate,
    },

    #[error("Remote write failed: {0}")]
    Remote(String),
}

impl From<serde_json::Error> for DateAskError {
    fn from(e: serde_json::Error) -> Self {
        DateAskError::Serialization(e.to_string())
    }
}

/// Result type alias for date-ask operations.
pub type DateAskResult<T> = Result<T, DateAskError>;
