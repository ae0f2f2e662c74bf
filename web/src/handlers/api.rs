//! JSON API handlers.
//!
//! Mirrors the form routes for scripted clients:
//!
//! - `GET /api/todos` - The three display lists with counts
//! - `POST /api/todos` - Add a todo
//! - `DELETE /api/todos/:id` - Delete a todo
//! - `POST /api/todos/:id/toggle/:property` - Toggle `completed` or `urgent`

use super::{dispatch, parse_id, parse_property};
use crate::{AppError, AppState, CorrelationId, WebResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use todo_board::{Todo, TodoAction, TodoState};
use todo_board_core::{DateTime, Utc};

/// Request to add a todo.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddTodoRequest {
    /// Title of the todo.
    pub title: String,

    /// Description of the todo.
    #[serde(default)]
    pub description: String,
}

/// Number of todos per list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCounts {
    /// Urgent, not completed.
    pub urgent: usize,
    /// Neither urgent nor completed.
    pub normal: usize,
    /// Completed.
    pub completed: usize,
    /// All todos.
    pub total: usize,
}

/// The current collection as the page shows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoListResponse {
    /// Urgent, not completed, in display order.
    pub urgent: Vec<Todo>,
    /// Neither urgent nor completed, in display order.
    pub normal: Vec<Todo>,
    /// Completed, in display order.
    pub completed: Vec<Todo>,
    /// Per-list counts.
    pub counts: ListCounts,
    /// Bumped on every successful change.
    pub revision: u64,
    /// When the collection last changed.
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&TodoState> for TodoListResponse {
    fn from(state: &TodoState) -> Self {
        let lists = state.lists();
        let owned = |todos: &[&Todo]| todos.iter().map(|t| (*t).clone()).collect::<Vec<_>>();

        Self {
            counts: ListCounts {
                urgent: lists.urgent.len(),
                normal: lists.normal.len(),
                completed: lists.completed.len(),
                total: lists.len(),
            },
            urgent: owned(&lists.urgent),
            normal: owned(&lists.normal),
            completed: owned(&lists.completed),
            revision: state.revision(),
            updated_at: state.updated_at,
        }
    }
}

/// List todos.
///
/// ```text
/// GET /api/todos
/// ```
pub async fn list_todos(State(state): State<AppState>) -> Json<TodoListResponse> {
    Json(state.store.state(|s| TodoListResponse::from(s)).await)
}

/// Add a todo.
///
/// Returns 201 Created with the new todo.
///
/// ```text
/// POST /api/todos
/// ```
///
/// # Errors
///
/// - 422 Unprocessable Entity if the title is empty or too long
/// - 503 Service Unavailable while shutting down
pub async fn add_todo(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    Json(request): Json<AddTodoRequest>,
) -> WebResult<(StatusCode, Json<Todo>)> {
    tracing::info!(%correlation_id, title = %request.title, "Adding todo via API");

    let action = TodoAction::AddTodo {
        title: request.title,
        description: request.description,
    };
    let created = dispatch(&state.store, action, |s| s.newest().cloned())
        .await?
        .ok_or_else(|| AppError::internal("Added todo missing from state"))?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Delete a todo.
///
/// ```text
/// DELETE /api/todos/:id
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the id is not a number
/// - 404 Not Found if no todo has this id
pub async fn delete_todo(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    Path(id): Path<String>,
) -> WebResult<StatusCode> {
    let id = parse_id(&id)?;
    tracing::info!(%correlation_id, %id, "Deleting todo via API");

    dispatch(&state.store, TodoAction::DeleteTodo { id }, |_| ()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Toggle a todo property.
///
/// Returns the updated todo.
///
/// ```text
/// POST /api/todos/:id/toggle/:property
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the id or property is malformed
/// - 404 Not Found if no todo has this id
pub async fn toggle_property(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    Path((id, property)): Path<(String, String)>,
) -> WebResult<Json<Todo>> {
    let id = parse_id(&id)?;
    let property = parse_property(&property)?;
    tracing::info!(%correlation_id, %id, %property, "Toggling todo property via API");

    let todo = dispatch(
        &state.store,
        TodoAction::ToggleProperty { id, property },
        move |s| s.get(id).cloned(),
    )
    .await?
    .ok_or_else(|| AppError::not_found("Todo", id))?;

    Ok(Json(todo))
}
