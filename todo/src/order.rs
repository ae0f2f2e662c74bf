//! Display ordering for todos.
//!
//! Todos are shown urgent first, then normal, then completed. Within each
//! group the input order is kept: this is a stable three-way partition done in
//! one pass, not a comparison sort.

use crate::types::{Todo, TodoCategory};
use serde::Serialize;

/// The three display lists, borrowed from one collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TodoLists<'a> {
    /// Urgent, not completed
    pub urgent: Vec<&'a Todo>,
    /// Neither urgent nor completed
    pub normal: Vec<&'a Todo>,
    /// Completed
    pub completed: Vec<&'a Todo>,
}

impl<'a> TodoLists<'a> {
    /// The list for one category
    #[must_use]
    pub fn get(&self, category: TodoCategory) -> &[&'a Todo] {
        match category {
            TodoCategory::Urgent => &self.urgent,
            TodoCategory::Normal => &self.normal,
            TodoCategory::Completed => &self.completed,
        }
    }

    /// Total number of todos across the three lists
    #[must_use]
    pub fn len(&self) -> usize {
        self.urgent.len() + self.normal.len() + self.completed.len()
    }

    /// Returns true when all three lists are empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every todo in display order
    pub fn iter(&self) -> impl Iterator<Item = &'a Todo> + '_ {
        self.urgent
            .iter()
            .chain(&self.normal)
            .chain(&self.completed)
            .copied()
    }
}

/// Split `todos` into the three display lists, keeping input order
#[must_use]
pub fn partition(todos: &[Todo]) -> TodoLists<'_> {
    let mut lists = TodoLists::default();
    for todo in todos {
        match todo.category() {
            TodoCategory::Urgent => lists.urgent.push(todo),
            TodoCategory::Normal => lists.normal.push(todo),
            TodoCategory::Completed => lists.completed.push(todo),
        }
    }
    lists
}

/// Returns `todos` in display order
#[must_use]
pub fn order(todos: &[Todo]) -> Vec<Todo> {
    partition(todos).iter().cloned().collect()
}

/// Puts an owned collection in display order without cloning
#[must_use]
pub fn order_owned(todos: Vec<Todo>) -> Vec<Todo> {
    let mut urgent = Vec::new();
    let mut normal = Vec::with_capacity(todos.len());
    let mut completed = Vec::new();

    for todo in todos {
        match todo.category() {
            TodoCategory::Urgent => urgent.push(todo),
            TodoCategory::Normal => normal.push(todo),
            TodoCategory::Completed => completed.push(todo),
        }
    }

    urgent.append(&mut normal);
    urgent.append(&mut completed);
    urgent
}
