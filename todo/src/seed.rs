//! Initial data seed.
//!
//! The seed is a JSON array of todos:
//!
//! ```json
//! [{ "id": 1, "title": "A", "description": "", "isCompleted": false, "isUrgent": true }]
//! ```
//!
//! `description`, `isCompleted` and `isUrgent` may be omitted.

use crate::error::SeedError;
use crate::types::{Todo, TodoState};
use std::path::Path;

/// Sample seed shipped with the crate
pub const SAMPLE_SEED: &str = include_str!("../data/sample_todos.json");

/// Parse a seed document into todos, in document order
///
/// # Errors
///
/// Returns [`SeedError::Parse`] if `json` is not an array of todos.
pub fn parse(json: &str) -> Result<Vec<Todo>, SeedError> {
    Ok(serde_json::from_str(json)?)
}

/// Build a store state from a seed document
///
/// # Errors
///
/// Returns [`SeedError::Parse`] for malformed JSON and
/// [`SeedError::Invalid`] if two todos share an id.
pub fn load_state(json: &str) -> Result<TodoState, SeedError> {
    let todos = parse(json)?;
    let count = todos.len();
    let state = TodoState::from_todos(todos)?;
    tracing::debug!(count, next_id = %state.next_id(), "Seed loaded");
    Ok(state)
}

/// Build a store state from a seed file
///
/// # Errors
///
/// Returns [`SeedError::Io`] if the file cannot be read, otherwise the errors
/// of [`load_state`].
pub fn load_state_from_path(path: impl AsRef<Path>) -> Result<TodoState, SeedError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_state(&json)
}

/// Build a store state from the bundled sample seed
///
/// # Errors
///
/// Same as [`load_state`]; the bundled seed is valid, so this only fails if
/// the data file was edited into an invalid state.
pub fn sample_state() -> Result<TodoState, SeedError> {
    load_state(SAMPLE_SEED)
}
