//! Todo board HTTP router.
//!
//! Composes the page, API and health handlers into a single Axum router.

use crate::handlers::{api, health, page};
use crate::{correlation_id_layer, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the router with all endpoints.
///
/// # Routes
///
/// - `GET /` - The todo page
/// - `POST /todos` - Add a todo (form)
/// - `POST /todos/:id/delete` - Delete a todo (form)
/// - `POST /todos/:id/toggle/:property` - Toggle `completed` or `urgent` (form)
/// - `GET /api/todos`, `POST /api/todos` - List or add (JSON)
/// - `DELETE /api/todos/:id` - Delete (JSON)
/// - `POST /api/todos/:id/toggle/:property` - Toggle (JSON)
/// - `GET /health`, `GET /health/ready`, `GET /metrics`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/todos", post(page::add_todo))
        .route("/todos/:id/delete", post(page::delete_todo))
        .route("/todos/:id/toggle/:property", post(page::toggle_property))
        .route("/api/todos", get(api::list_todos).post(api::add_todo))
        .route("/api/todos/:id", axum::routing::delete(api::delete_todo))
        .route("/api/todos/:id/toggle/:property", post(api::toggle_property))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness))
        .route("/metrics", get(health::metrics))
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{TodoStore, CORRELATION_ID_HEADER};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use todo_board::{TodoEnvironment, TodoReducer, TodoState};
    use todo_board_testing::test_clock;
    use tower::ServiceExt;

    fn app() -> (Router, Arc<TodoStore>) {
        let store = Arc::new(TodoStore::new(
            TodoState::new(),
            TodoReducer::new(),
            TodoEnvironment::new(Arc::new(test_clock())),
        ));
        (router(AppState::new(Arc::clone(&store))), store)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_routes() {
        let (app, store) = app();

        let response = app.clone().oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(CORRELATION_ID_HEADER));

        let response = app.clone().oneshot(get_request("/health/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        store.shutdown();
        let response = app.oneshot(get_request("/health/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn commands_rejected_after_shutdown() {
        let (app, store) = app();
        store.shutdown();

        let request = Request::builder()
            .method("POST")
            .uri("/api/todos")
            .header("content-type", "application/json")
            .body(Body::from(r#"{ "title": "late" }"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(store.state(|s| s.count()).await, 0);
    }

    #[tokio::test]
    async fn unknown_route() {
        let (app, _) = app();
        let response = app.oneshot(get_request("/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
