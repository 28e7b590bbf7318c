//! crates/schedule_core/src/error.rs
//!
//! Error types for the schedule engine. Validation failures are surfaced
//! synchronously and never retried; storage failures are surfaced with the
//! in-memory state untouched so the caller can safely offer a retry.

use crate::ports::PortError;

/// Malformed input to a constructor-style operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("schedule name cannot be empty")]
    EmptyName,

    #[error("schedule name exceeds {max} characters")]
    NameTooLong { max: usize },

    #[error("invalid semester code '{0}': expected PA or OI followed by a 4-digit year")]
    BadSemester(String),

    #[error("invalid time '{0}': expected HH:MM or HH:MM:SS")]
    BadTime(String),
}

/// The primary error type for schedule aggregate operations.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced schedule or enrollment does not exist. Note that remove
    /// and delete operations map this to a no-op success instead.
    #[error("not found: {0}")]
    NotFound(String),

    /// The persistence collaborator failed a read or write. Single attempt,
    /// no automatic retry.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<PortError> for ScheduleError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound(what) => ScheduleError::NotFound(what),
            PortError::Storage(reason) => ScheduleError::Storage(reason),
        }
    }
}
