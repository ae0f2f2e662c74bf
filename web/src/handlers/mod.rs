//! HTTP request handlers.
//!
//! - [`page`]: the HTML page and its form posts
//! - [`api`]: the JSON API
//! - [`health`]: liveness, readiness and metrics

pub mod api;
pub mod health;
pub mod page;

pub use health::health_check;

use crate::{AppError, TodoStore};
use todo_board::{TodoAction, TodoId, TodoProperty, TodoState};

/// Send `action` and report its outcome
///
/// The store clears `last_error` on success and sets it on rejection, so
/// reading it under the same lock as the dispatch tells this caller about its
/// own command. On success `read` runs against the resulting state.
pub(crate) async fn dispatch<F, T>(
    store: &TodoStore,
    action: TodoAction,
    read: F,
) -> Result<T, AppError>
where
    F: FnOnce(&TodoState) -> T + Send,
    T: Send,
{
    let outcome = store
        .send_and_read(action, |state| match &state.last_error {
            Some(error) => Err(error.clone()),
            None => Ok(read(state)),
        })
        .await?;

    outcome.map_err(AppError::from)
}

/// Parse a todo id path segment
pub(crate) fn parse_id(raw: &str) -> Result<TodoId, AppError> {
    raw.parse()
        .map_err(|_| AppError::bad_request(format!("Invalid todo id: {raw}")))
}

/// Parse a toggle property path segment
pub(crate) fn parse_property(raw: &str) -> Result<TodoProperty, AppError> {
    raw.parse()
        .map_err(|_| AppError::bad_request(format!("Unknown property: {raw}")))
}
