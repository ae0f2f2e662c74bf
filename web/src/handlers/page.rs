//! HTML page and form post handlers.
//!
//! Successful posts redirect back to `/` (303 See Other), so a reload never
//! repeats a command. A rejected command re-renders the page with the error
//! and the matching status code.

use super::{dispatch, parse_id, parse_property};
use crate::{render, AppError, AppState, CorrelationId};
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use todo_board::TodoAction;

/// Add form body.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTodoForm {
    /// Title of the todo
    pub title: String,
    /// Optional description
    #[serde(default)]
    pub description: String,
}

/// Render the todo page.
///
/// ```text
/// GET /
/// ```
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.store.state(|s| render::page(&s.lists(), None)).await)
}

/// Add a todo from the page form.
///
/// ```text
/// POST /todos
/// ```
pub async fn add_todo(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    Form(form): Form<NewTodoForm>,
) -> Response {
    tracing::info!(%correlation_id, title = %form.title, "Adding todo");

    let action = TodoAction::AddTodo {
        title: form.title,
        description: form.description,
    };
    respond(&state, dispatch(&state.store, action, |_| ()).await).await
}

/// Delete a todo from the page.
///
/// ```text
/// POST /todos/:id/delete
/// ```
pub async fn delete_todo(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    Path(id): Path<String>,
) -> Response {
    let result = match parse_id(&id) {
        Ok(id) => {
            tracing::info!(%correlation_id, %id, "Deleting todo");
            dispatch(&state.store, TodoAction::DeleteTodo { id }, |_| ()).await
        },
        Err(e) => Err(e),
    };
    respond(&state, result).await
}

/// Toggle `completed` or `urgent` from the page.
///
/// ```text
/// POST /todos/:id/toggle/:property
/// ```
pub async fn toggle_property(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    Path((id, property)): Path<(String, String)>,
) -> Response {
    let action = parse_id(&id).and_then(|id| {
        parse_property(&property).map(|property| TodoAction::ToggleProperty { id, property })
    });

    let result = match action {
        Ok(action) => {
            tracing::info!(%correlation_id, ?action, "Toggling todo property");
            dispatch(&state.store, action, |_| ()).await
        },
        Err(e) => Err(e),
    };
    respond(&state, result).await
}

/// Redirect home on success, otherwise re-render with the error
async fn respond(state: &AppState, result: Result<(), AppError>) -> Response {
    match result {
        Ok(()) => Redirect::to("/").into_response(),
        Err(error) => error_page(state, &error).await,
    }
}

async fn error_page(state: &AppState, error: &AppError) -> Response {
    let status = error.status();
    if status.is_server_error() {
        tracing::warn!(%error, "Form post failed");
    }

    let html = state
        .store
        .state(|s| render::page(&s.lists(), Some(error.message())))
        .await;
    (status, Html(html)).into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::router::router;
    use crate::{AppState, TodoStore};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use std::sync::Arc;
    use todo_board::{seed, TodoEnvironment, TodoId, TodoReducer};
    use todo_board_testing::test_clock;
    use tower::ServiceExt;

    fn app() -> (Router, Arc<TodoStore>) {
        let state = seed::load_state(
            r#"[
                { "id": 1, "title": "A", "isUrgent": true },
                { "id": 2, "title": "B" }
            ]"#,
        )
        .unwrap();
        let store = Arc::new(TodoStore::new(
            state,
            TodoReducer::new(),
            TodoEnvironment::new(Arc::new(test_clock())),
        ));
        (router(AppState::new(Arc::clone(&store))), store)
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn assert_redirect_home(response: &axum::response::Response) {
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn index_renders_lists() {
        let (app, _) = app();
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("<h2>Urgent (1)</h2>"));
        assert!(html.contains("<h2>To Do (1)</h2>"));
    }

    #[tokio::test]
    async fn add_redirects_and_stores_todo() {
        let (app, store) = app();
        let response = app
            .oneshot(post_form("/todos", "title=Buy+milk&description=2%25"))
            .await
            .unwrap();

        assert_redirect_home(&response);
        let added = store.state(|s| s.get(TodoId::new(3)).cloned()).await.unwrap();
        assert_eq!(added.title, "Buy milk");
        assert_eq!(added.description, "2%");
    }

    #[tokio::test]
    async fn add_without_description() {
        let (app, store) = app();
        let response = app.oneshot(post_form("/todos", "title=Solo")).await.unwrap();

        assert_redirect_home(&response);
        assert_eq!(store.state(|s| s.count()).await, 3);
    }

    #[tokio::test]
    async fn empty_title_rerenders_with_error() {
        let (app, store) = app();
        let response = app
            .oneshot(post_form("/todos", "title=+++&description="))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body_text(response).await;
        assert!(html.contains("Todo title cannot be empty"));
        assert_eq!(store.state(|s| s.count()).await, 2);
    }

    #[tokio::test]
    async fn toggle_completed_moves_todo_last() {
        let (app, store) = app();
        let response = app
            .oneshot(post_form("/todos/1/toggle/completed", ""))
            .await
            .unwrap();

        assert_redirect_home(&response);
        let ids: Vec<u64> = store
            .state(|s| s.todos().iter().map(|t| t.id.get()).collect())
            .await;
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn delete_and_stale_delete() {
        let (app, store) = app();

        let response = app
            .clone()
            .oneshot(post_form("/todos/2/delete", ""))
            .await
            .unwrap();
        assert_redirect_home(&response);
        assert!(!store.state(|s| s.exists(TodoId::new(2))).await);

        let response = app.oneshot(post_form("/todos/2/delete", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("Todo with id 2 not found"));
    }

    #[tokio::test]
    async fn bad_path_segments() {
        let (app, _) = app();

        let response = app
            .clone()
            .oneshot(post_form("/todos/abc/delete", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(post_form("/todos/1/toggle/starred", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("Unknown property: starred"));
    }

    #[tokio::test]
    async fn rendered_toggle_forms_post_back() {
        let (app, store) = app();
        let response = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_text(response).await;

        let actions: Vec<&str> = html
            .split("action=\"")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .filter(|action| action.contains("/toggle/"))
            .collect();
        assert_eq!(actions.len(), 4);

        for action in actions {
            let response = app.clone().oneshot(post_form(action, "")).await.unwrap();
            assert_redirect_home(&response);
        }

        // Each todo had both flags flipped once.
        let flags: Vec<(bool, bool)> = store
            .state(|s| s.todos().iter().map(|t| (t.is_completed, t.is_urgent)).collect())
            .await;
        assert!(flags.contains(&(true, false)));
        assert!(flags.contains(&(true, true)));
    }
}
