//! Reducer logic for the todo list.
//!
//! Commands are validated against the current state and turned into events;
//! events are the only thing that changes the collection.

use crate::error::TodoError;
use crate::types::{Todo, TodoAction, TodoId, TodoProperty, TodoState};
use std::sync::Arc;
use todo_board_core::{environment::Clock, reducer::Reducer};

/// Default maximum title length in characters
pub const DEFAULT_MAX_TITLE_LEN: usize = 200;

/// Input limits enforced by the reducer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TodoLimits {
    /// Maximum title length in characters
    pub max_title_len: usize,
}

impl Default for TodoLimits {
    fn default() -> Self {
        Self {
            max_title_len: DEFAULT_MAX_TITLE_LEN,
        }
    }
}

/// Environment dependencies for the Todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for stamping changes
    pub clock: Arc<dyn Clock>,
    /// Input limits
    pub limits: TodoLimits,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment` with default limits
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            limits: TodoLimits::default(),
        }
    }

    /// Replace the input limits
    #[must_use]
    pub const fn with_limits(mut self, limits: TodoLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Reducer for the todo list
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates an `AddTodo` command and picks the new todo's id
    fn validate_add(
        state: &TodoState,
        title: &str,
        limits: TodoLimits,
    ) -> Result<TodoId, TodoError> {
        if title.trim().is_empty() {
            return Err(TodoError::EmptyTitle);
        }

        if title.trim().chars().count() > limits.max_title_len {
            return Err(TodoError::TitleTooLong {
                max: limits.max_title_len,
            });
        }

        let id = state.next_id();
        if state.exists(id) {
            // Only reachable once the counter saturates at u64::MAX.
            return Err(TodoError::DuplicateId(id));
        }

        Ok(id)
    }

    /// Validates a command that targets an existing todo
    fn validate_existing(state: &TodoState, id: TodoId) -> Result<&Todo, TodoError> {
        state.get(id).ok_or(TodoError::NotFound(id))
    }

    /// Applies an event to state
    ///
    /// A `TodoAdded` must carry an id not already in the collection; the
    /// reducer checks that before calling this.
    fn apply_event(state: &mut TodoState, action: &TodoAction) {
        let event_type = action.event_type();
        metrics::counter!("todo.events.applied", "event_type" => event_type).increment(1);

        match action {
            TodoAction::TodoAdded { todo, at } => {
                let mut todos = state.todos().to_vec();
                todos.push(todo.clone());
                state.replace(todos, *at);
                tracing::info!(event_type, id = %todo.id, title = %todo.title, "Todo added");
            },
            TodoAction::TodoDeleted { id, at } => {
                let todos = state
                    .todos()
                    .iter()
                    .filter(|t| t.id != *id)
                    .cloned()
                    .collect();
                state.replace(todos, *at);
                tracing::info!(event_type, %id, "Todo deleted");
            },
            TodoAction::PropertyToggled {
                id,
                property,
                value,
                at,
            } => {
                let todos = state
                    .todos()
                    .iter()
                    .map(|t| {
                        let mut t = t.clone();
                        if t.id == *id {
                            set_flag(&mut t, *property, *value);
                        }
                        t
                    })
                    .collect();
                state.replace(todos, *at);
                tracing::info!(event_type, %id, %property, value, "Todo property toggled");
            },
            TodoAction::ValidationFailed { error } => {
                tracing::warn!(code = error.code(), %error, "Todo command rejected");
                metrics::counter!("todo.commands.rejected", "code" => error.code()).increment(1);
                state.last_error = Some(error.clone());
            },
            // Commands are not applied to state
            TodoAction::AddTodo { .. }
            | TodoAction::DeleteTodo { .. }
            | TodoAction::ToggleProperty { .. } => {},
        }

        #[allow(clippy::cast_precision_loss)]
        metrics::gauge!("todo.collection.size").set(state.count() as f64);
    }

    /// Applies `event` unless validation produced an error
    fn commit(state: &mut TodoState, event: Result<TodoAction, TodoError>) {
        let event = event.unwrap_or_else(|error| TodoAction::ValidationFailed { error });
        Self::apply_event(state, &event);
    }
}

/// Sets a flag to an explicit value, so replayed events are idempotent
const fn set_flag(todo: &mut Todo, property: TodoProperty, value: bool) {
    match property {
        TodoProperty::Completed => todo.is_completed = value,
        TodoProperty::Urgent => todo.is_urgent = value,
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(&self, state: &mut Self::State, action: Self::Action, env: &Self::Environment) {
        match action {
            // ========== Commands ==========
            TodoAction::AddTodo { title, description } => {
                let event = Self::validate_add(state, &title, env.limits).map(|id| {
                    TodoAction::TodoAdded {
                        todo: Todo::new(id, title.trim(), description),
                        at: env.clock.now(),
                    }
                });
                Self::commit(state, event);
            },

            TodoAction::DeleteTodo { id } => {
                let event = Self::validate_existing(state, id).map(|_| TodoAction::TodoDeleted {
                    id,
                    at: env.clock.now(),
                });
                Self::commit(state, event);
            },

            TodoAction::ToggleProperty { id, property } => {
                let event = Self::validate_existing(state, id).map(|todo| {
                    TodoAction::PropertyToggled {
                        id,
                        property,
                        value: !todo.flag(property),
                        at: env.clock.now(),
                    }
                });
                Self::commit(state, event);
            },

            // ========== Events ==========
            TodoAction::TodoAdded { ref todo, .. } if state.exists(todo.id) => {
                Self::commit(state, Err(TodoError::DuplicateId(todo.id)));
            },

            TodoAction::TodoAdded { .. }
            | TodoAction::TodoDeleted { .. }
            | TodoAction::PropertyToggled { .. }
            | TodoAction::ValidationFailed { .. } => {
                Self::apply_event(state, &action);
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use todo_board_testing::{test_clock, ReducerTest};

    fn env() -> TodoEnvironment {
        TodoEnvironment::new(Arc::new(test_clock()))
    }

    fn seed() -> TodoState {
        TodoState::from_todos(vec![
            Todo::new(TodoId::new(1), "A", "").urgent(true),
            Todo::new(TodoId::new(2), "B", ""),
        ])
        .unwrap()
    }

    fn titles(state: &TodoState) -> Vec<String> {
        state.todos().iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn test_add_todo_assigns_next_id() {
        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(seed())
            .when_action(TodoAction::AddTodo {
                title: "X".to_string(),
                description: "d".to_string(),
            })
            .then_state(|state| {
                let todo = state.get(TodoId::new(3)).unwrap();
                assert_eq!(todo.title, "X");
                assert_eq!(todo.description, "d");
                assert!(!todo.is_completed && !todo.is_urgent);
                assert_eq!(state.lists().normal.last().unwrap().id, TodoId::new(3));
                assert_eq!(state.revision(), 1);
                assert_eq!(state.updated_at, Some(test_clock().now()));
            })
            .run();
    }

    #[test]
    fn test_add_after_delete_does_not_reuse_ids() {
        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(seed())
            .when_actions([
                TodoAction::AddTodo {
                    title: "C".to_string(),
                    description: String::new(),
                },
                TodoAction::DeleteTodo { id: TodoId::new(2) },
                TodoAction::AddTodo {
                    title: "D".to_string(),
                    description: String::new(),
                },
            ])
            .then_state(|state| {
                let ids: Vec<u64> = state.todos().iter().map(|t| t.id.get()).collect();
                assert_eq!(ids, vec![1, 3, 4]);
                assert_eq!(state.next_id(), TodoId::new(5));
            })
            .run();
    }

    #[test]
    fn test_add_trims_title() {
        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(TodoState::new())
            .when_action(TodoAction::AddTodo {
                title: "  Buy milk ".to_string(),
                description: String::new(),
            })
            .then_state(|state| {
                assert_eq!(titles(state), vec!["Buy milk"]);
                assert_eq!(state.todos()[0].id, TodoId::new(1));
            })
            .run();
    }

    #[test]
    fn test_add_rejects_empty_title() {
        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(seed())
            .when_action(TodoAction::AddTodo {
                title: "   ".to_string(),
                description: "whatever".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.count(), 2);
                assert_eq!(state.last_error, Some(TodoError::EmptyTitle));
                assert_eq!(state.revision(), 0);
            })
            .run();
    }

    #[test]
    fn test_add_rejects_long_title() {
        let env = env().with_limits(TodoLimits { max_title_len: 3 });

        ReducerTest::new(TodoReducer::new())
            .with_env(env)
            .given_state(TodoState::new())
            .when_action(TodoAction::AddTodo {
                title: "four".to_string(),
                description: String::new(),
            })
            .then_state(|state| {
                assert_eq!(state.count(), 0);
                assert_eq!(state.last_error, Some(TodoError::TitleTooLong { max: 3 }));
            })
            .run();
    }

    #[test]
    fn test_successful_command_clears_last_error() {
        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(seed())
            .when_action(TodoAction::DeleteTodo { id: TodoId::new(9) })
            .when_action(TodoAction::DeleteTodo { id: TodoId::new(1) })
            .then_state(|state| {
                assert!(state.last_error.is_none());
                assert_eq!(titles(state), vec!["B"]);
            })
            .run();
    }

    #[test]
    fn test_delete_missing_leaves_collection_unchanged() {
        let before = seed();
        let expected = before.todos().to_vec();

        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(before)
            .when_action(TodoAction::DeleteTodo { id: TodoId::new(42) })
            .then_state(move |state| {
                assert_eq!(state.todos(), expected.as_slice());
                assert_eq!(state.last_error, Some(TodoError::NotFound(TodoId::new(42))));
            })
            .run();
    }

    #[test]
    fn test_toggle_completed_moves_todo_last() {
        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(seed())
            .when_action(TodoAction::ToggleProperty {
                id: TodoId::new(1),
                property: TodoProperty::Completed,
            })
            .then_state(|state| {
                assert_eq!(titles(state), vec!["B", "A"]);
                assert!(state.get(TodoId::new(1)).unwrap().is_completed);
                assert!(state.get(TodoId::new(1)).unwrap().is_urgent);
            })
            .run();
    }

    #[test]
    fn test_toggle_urgent_moves_todo_first() {
        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(seed())
            .when_action(TodoAction::ToggleProperty {
                id: TodoId::new(2),
                property: TodoProperty::Urgent,
            })
            .then_state(|state| {
                assert_eq!(titles(state), vec!["A", "B"]);
                assert_eq!(state.lists().urgent.len(), 2);
            })
            .run();
    }

    #[test]
    fn test_toggle_twice_restores_flag() {
        let original = seed();
        let expected = original.todos().to_vec();

        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(original)
            .when_actions([
                TodoAction::ToggleProperty {
                    id: TodoId::new(1),
                    property: TodoProperty::Urgent,
                },
                TodoAction::ToggleProperty {
                    id: TodoId::new(1),
                    property: TodoProperty::Urgent,
                },
            ])
            .then_state(move |state| {
                assert_eq!(state.todos(), expected.as_slice());
                assert_eq!(state.revision(), 2);
            })
            .run();
    }

    #[test]
    fn test_toggle_missing_reports_not_found() {
        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(seed())
            .when_action(TodoAction::ToggleProperty {
                id: TodoId::new(7),
                property: TodoProperty::Urgent,
            })
            .then_state(|state| {
                assert_eq!(state.last_error, Some(TodoError::NotFound(TodoId::new(7))));
                assert_eq!(titles(state), vec!["A", "B"]);
            })
            .run();
    }

    #[test]
    fn test_replayed_toggle_event_is_idempotent() {
        let event = TodoAction::PropertyToggled {
            id: TodoId::new(2),
            property: TodoProperty::Completed,
            value: true,
            at: test_clock().now(),
        };

        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(seed())
            .when_actions([event.clone(), event])
            .then_state(|state| {
                assert!(state.get(TodoId::new(2)).unwrap().is_completed);
                assert_eq!(titles(state), vec!["A", "B"]);
            })
            .run();
    }

    #[test]
    fn test_added_event_advances_counter() {
        let event = TodoAction::TodoAdded {
            todo: Todo::new(TodoId::new(10), "Imported", ""),
            at: test_clock().now(),
        };

        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(seed())
            .when_action(event)
            .then_state(|state| {
                assert_eq!(state.next_id(), TodoId::new(11));
                assert_eq!(titles(state), vec!["A", "B", "Imported"]);
            })
            .run();
    }

    #[test]
    fn test_added_event_with_existing_id_is_rejected() {
        let sample = crate::seed::sample_state().unwrap();
        let expected = sample.todos().to_vec();
        let event = TodoAction::TodoAdded {
            todo: Todo::new(TodoId::new(1), "Imposter", ""),
            at: test_clock().now(),
        };

        ReducerTest::new(TodoReducer::new())
            .with_env(env())
            .given_state(sample)
            .when_action(event)
            .then_state(move |state| {
                assert_eq!(state.last_error, Some(TodoError::DuplicateId(TodoId::new(1))));
                assert_eq!(state.todos(), expected.as_slice());
                assert_eq!(state.count(), 4);
                assert_eq!(state.revision(), 0);
                assert_eq!(state.next_id(), TodoId::new(5));
            })
            .run();
    }
}
