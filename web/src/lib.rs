//! HTTP presentation layer for the todo board.
//!
//! Renders the todo store as an HTML page with plain form posts, and mirrors
//! the same operations as a small JSON API.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler
//! 2. **Build Action** from path, form or JSON body
//! 3. **Dispatch** through the shared `Store`, reading the outcome under the
//!    same lock
//! 4. **Map result** to a redirect, a page, JSON, or an [`AppError`]
//!
//! # Example
//!
//! ```ignore
//! let state = AppState::new(Arc::new(store));
//! let app = router::router(state);
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod render;
pub mod router;
pub mod state;

pub use config::{Config, ConfigError};
pub use error::AppError;
pub use extractors::CorrelationId;
pub use middleware::{correlation_id_layer, CORRELATION_ID_HEADER};
pub use state::AppState;

use todo_board::{TodoAction, TodoEnvironment, TodoReducer, TodoState};
use todo_board_runtime::Store;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;

/// The store every handler shares
pub type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise `default_level` applies to every target.
///
/// # Errors
///
/// Returns an error if `default_level` is not a valid filter or a global
/// subscriber is already installed.
pub fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()?;

    Ok(())
}
