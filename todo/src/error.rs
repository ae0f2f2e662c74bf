//! Domain errors for the todo store.

use crate::types::TodoId;
use thiserror::Error;

/// Reasons a todo command is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// No todo with this id exists (stale id from a previous render)
    #[error("Todo with ID {0} not found")]
    NotFound(TodoId),

    /// Title is empty after trimming whitespace
    #[error("Todo title cannot be empty")]
    EmptyTitle,

    /// Title is longer than the configured limit
    #[error("Todo title too long (max {max} characters)")]
    TitleTooLong {
        /// Limit in characters
        max: usize,
    },

    /// Two todos share an id
    #[error("Todo with ID {0} already exists")]
    DuplicateId(TodoId),
}

impl TodoError {
    /// Stable machine-readable code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::EmptyTitle => "EMPTY_TITLE",
            Self::TitleTooLong { .. } => "TITLE_TOO_LONG",
            Self::DuplicateId(_) => "DUPLICATE_ID",
        }
    }
}

/// Errors from loading the initial seed
#[derive(Error, Debug)]
pub enum SeedError {
    /// Seed file could not be read
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        /// Path that was read
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Seed is not a JSON array of todos
    #[error("Malformed seed: {0}")]
    Parse(#[from] serde_json::Error),

    /// Seed violates a collection invariant
    #[error("Invalid seed: {0}")]
    Invalid(#[from] TodoError),
}
