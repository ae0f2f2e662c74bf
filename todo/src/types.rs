//! Domain types for the todo store.
//!
//! A todo list is one ordered collection of [`Todo`] records owned by a
//! [`TodoState`]. The collection is never edited in place: every change builds
//! a new collection and swaps it in, so a snapshot handed to a renderer stays
//! valid for as long as the renderer holds it.

use crate::error::TodoError;
use crate::order::{self, TodoLists};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use todo_board_macros::{Action, State};

/// Unique identifier for a todo item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Creates a `TodoId` from its numeric value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id that follows this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TodoId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// The two independent flags a todo carries
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TodoProperty {
    /// `isCompleted`
    #[serde(rename = "isCompleted", alias = "completed")]
    Completed,
    /// `isUrgent`
    #[serde(rename = "isUrgent", alias = "urgent")]
    Urgent,
}

impl TodoProperty {
    /// Short name used in URLs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Urgent => "urgent",
        }
    }
}

impl std::fmt::Display for TodoProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown property name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown todo property `{0}`")]
pub struct UnknownProperty(pub String);

impl std::str::FromStr for TodoProperty {
    type Err = UnknownProperty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" | "isCompleted" => Ok(Self::Completed),
            "urgent" | "isUrgent" => Ok(Self::Urgent),
            other => Err(UnknownProperty(other.to_string())),
        }
    }
}

/// Display group a todo falls into
///
/// Declared in display order: completed wins over urgent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TodoCategory {
    /// Urgent and not completed
    Urgent,
    /// Neither urgent nor completed
    Normal,
    /// Completed, urgent or not
    Completed,
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// Short title
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Whether the todo is done
    #[serde(default)]
    pub is_completed: bool,
    /// Whether the todo is urgent
    #[serde(default)]
    pub is_urgent: bool,
}

impl Todo {
    /// Creates a new pending, non-urgent todo
    #[must_use]
    pub fn new(id: TodoId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            is_completed: false,
            is_urgent: false,
        }
    }

    /// Builder-style setter for `is_urgent`
    #[must_use]
    pub fn urgent(mut self, is_urgent: bool) -> Self {
        self.is_urgent = is_urgent;
        self
    }

    /// Builder-style setter for `is_completed`
    #[must_use]
    pub fn completed(mut self, is_completed: bool) -> Self {
        self.is_completed = is_completed;
        self
    }

    /// Reads one of the two flags
    #[must_use]
    pub const fn flag(&self, property: TodoProperty) -> bool {
        match property {
            TodoProperty::Completed => self.is_completed,
            TodoProperty::Urgent => self.is_urgent,
        }
    }

    /// Flips one of the two flags and returns the new value
    pub fn toggle(&mut self, property: TodoProperty) -> bool {
        let flag = match property {
            TodoProperty::Completed => &mut self.is_completed,
            TodoProperty::Urgent => &mut self.is_urgent,
        };
        *flag = !*flag;
        *flag
    }

    /// Display group of this todo
    #[must_use]
    pub const fn category(&self) -> TodoCategory {
        if self.is_completed {
            TodoCategory::Completed
        } else if self.is_urgent {
            TodoCategory::Urgent
        } else {
            TodoCategory::Normal
        }
    }
}

/// State of the todo list
#[derive(State, Clone, Debug)]
pub struct TodoState {
    /// All todos, always kept in display order
    todos: Arc<[Todo]>,
    /// Id handed to the next added todo; never reused
    next_id: TodoId,
    /// Last validation error (if any)
    pub last_error: Option<TodoError>,
    /// When the collection last changed
    pub updated_at: Option<DateTime<Utc>>,
    #[revision]
    revision: u64,
}

impl Default for TodoState {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoState {
    /// Creates a new empty todo state
    #[must_use]
    pub fn new() -> Self {
        Self {
            todos: Arc::from(Vec::new()),
            next_id: TodoId::new(1),
            last_error: None,
            updated_at: None,
            revision: 0,
        }
    }

    /// Creates a state pre-populated with `todos`
    ///
    /// The todos are put in display order and the id counter starts after the
    /// largest id present.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::DuplicateId`] if two todos share an id.
    pub fn from_todos(todos: Vec<Todo>) -> Result<Self, TodoError> {
        let mut seen = HashSet::with_capacity(todos.len());
        for todo in &todos {
            if !seen.insert(todo.id) {
                return Err(TodoError::DuplicateId(todo.id));
            }
        }

        let next_id = todos
            .iter()
            .map(|t| t.id.next())
            .max()
            .unwrap_or(TodoId::new(1));

        Ok(Self {
            todos: order::order_owned(todos).into(),
            next_id,
            ..Self::new()
        })
    }

    /// All todos in display order
    #[must_use]
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Cheap handle to the current collection
    ///
    /// The handle keeps pointing at this version even after later changes.
    #[must_use]
    pub fn snapshot(&self) -> Arc<[Todo]> {
        Arc::clone(&self.todos)
    }

    /// Id the next added todo will receive
    #[must_use]
    pub const fn next_id(&self) -> TodoId {
        self.next_id
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.is_completed).count()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    /// The three display lists
    #[must_use]
    pub fn lists(&self) -> TodoLists<'_> {
        order::partition(&self.todos)
    }

    /// The most recently added todo (largest id)
    #[must_use]
    pub fn newest(&self) -> Option<&Todo> {
        self.todos.iter().max_by_key(|t| t.id)
    }

    /// Swap in a new collection, re-establishing display order
    pub(crate) fn replace(&mut self, todos: Vec<Todo>, at: DateTime<Utc>) {
        if let Some(max) = todos.iter().map(|t| t.id.next()).max() {
            self.next_id = self.next_id.max(max);
        }
        self.todos = order::order_owned(todos).into();
        self.updated_at = Some(at);
        self.last_error = None;
        self.bump_revision();
    }
}

/// Actions representing commands and events for the todo list
///
/// Commands carry user intent and are validated by the reducer. Each valid
/// command produces exactly one event, which is what actually changes state.
#[derive(Action, Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Command: Add a new todo
    #[command]
    AddTodo {
        /// Title of the todo
        title: String,
        /// Description of the todo
        description: String,
    },

    /// Command: Delete a todo
    #[command]
    DeleteTodo {
        /// Todo to delete
        id: TodoId,
    },

    /// Command: Flip `isCompleted` or `isUrgent`
    #[command]
    ToggleProperty {
        /// Todo to change
        id: TodoId,
        /// Flag to flip
        property: TodoProperty,
    },

    // ========== Events ==========
    /// Event: Todo was added
    #[event]
    TodoAdded {
        /// The new todo, id already assigned
        todo: Todo,
        /// When it was added
        at: DateTime<Utc>,
    },

    /// Event: Todo was deleted
    #[event]
    TodoDeleted {
        /// Todo identifier
        id: TodoId,
        /// When it was deleted
        at: DateTime<Utc>,
    },

    /// Event: A flag was flipped
    #[event]
    PropertyToggled {
        /// Todo identifier
        id: TodoId,
        /// Flag that changed
        property: TodoProperty,
        /// Value after the flip
        value: bool,
        /// When it changed
        at: DateTime<Utc>,
    },

    /// Event: Command validation failed
    #[event]
    ValidationFailed {
        /// Why the command was rejected
        error: TodoError,
    },
}
