//! The todo store.
//!
//! One ordered collection of todos, changed only through four commands:
//! add, delete, toggle-completed and toggle-urgent. Display order is a stable
//! partition (urgent, normal, completed) re-established after every change.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use todo_board::{seed, TodoAction, TodoEnvironment, TodoId, TodoProperty, TodoReducer};
//! use todo_board_core::{environment::SystemClock, reducer::Reducer};
//!
//! let env = TodoEnvironment::new(Arc::new(SystemClock));
//! let mut state = seed::load_state(
//!     r#"[{ "id": 1, "title": "A", "isUrgent": true }, { "id": 2, "title": "B" }]"#,
//! )?;
//!
//! TodoReducer.reduce(
//!     &mut state,
//!     TodoAction::ToggleProperty { id: TodoId::new(1), property: TodoProperty::Completed },
//!     &env,
//! );
//!
//! let titles: Vec<_> = state.todos().iter().map(|t| t.title.as_str()).collect();
//! assert_eq!(titles, ["B", "A"]);
//! # Ok::<(), todo_board::SeedError>(())
//! ```

pub mod error;
pub mod order;
pub mod reducer;
pub mod seed;
pub mod types;

pub use error::{SeedError, TodoError};
pub use order::{order, partition, TodoLists};
pub use reducer::{TodoEnvironment, TodoLimits, TodoReducer, DEFAULT_MAX_TITLE_LEN};
pub use types::{Todo, TodoAction, TodoCategory, TodoId, TodoProperty, TodoState, UnknownProperty};
