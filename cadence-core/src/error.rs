//! Error types for the cadence engine.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in cadence operations.
#[derive(Error, Debug)]
pub enum CadenceError {
    #[error("repeat interval must be at least 1, got {0}")]
    InvalidInterval(u32),

    #[error("repeat end date {end} is before the event date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    #[error("unknown repeat type '{0}' (expected none, daily, weekly, monthly or yearly)")]
    UnknownRepeatKind(String),

    #[error("event not found: {0}")]
    EventNotFound(String),

    #[error("no events belong to group: {0}")]
    GroupNotFound(String),

    #[error("{failed} of {total} writes failed while {context}")]
    PartialBatch {
        context: String,
        failed: usize,
        total: usize,
    },

    #[error("store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for cadence operations.
pub type CadenceResult<T> = Result<T, CadenceError>;
