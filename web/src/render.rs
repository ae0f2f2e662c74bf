//! Server-side HTML for the todo page.
//!
//! The page is a banner, an add form, then the urgent, normal and completed
//! lists. Every item carries three small forms (delete, toggle completed,
//! toggle urgent) that post back to the server, so the page works without
//! scripts. Markup is built with `maud`, which escapes every interpolated
//! value.

use maud::{html, Markup, DOCTYPE};
use todo_board::{Todo, TodoCategory, TodoLists, TodoProperty};

/// Render the whole page
///
/// `error` is shown above the add form when a command was rejected.
#[must_use]
pub fn page(lists: &TodoLists<'_>, error: Option<&str>) -> String {
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "To Do List" }
                meta name="description" content="To Do List App";
                meta name="viewport" content="width=device-width, initial-scale=1";
            }
            body {
                div.Home {
                    header.Banner { h1 { "To Do List" } }
                    @if let Some(message) = error {
                        p.Error role="alert" { (message) }
                    }
                    form.AddTodoForm method="post" action="/todos" {
                        input name="title" placeholder="Title" required;
                        input name="description" placeholder="Description";
                        button type="submit" { "Add" }
                    }
                    @for category in [TodoCategory::Urgent, TodoCategory::Normal, TodoCategory::Completed] {
                        (section(category, lists.get(category)))
                    }
                }
            }
        }
    };

    markup.into_string()
}

const fn heading(category: TodoCategory) -> &'static str {
    match category {
        TodoCategory::Urgent => "Urgent",
        TodoCategory::Normal => "To Do",
        TodoCategory::Completed => "Completed",
    }
}

const fn anchor(category: TodoCategory) -> &'static str {
    match category {
        TodoCategory::Urgent => "urgent",
        TodoCategory::Normal => "to-do",
        TodoCategory::Completed => "completed",
    }
}

fn section(category: TodoCategory, todos: &[&Todo]) -> Markup {
    html! {
        section.TodoList id=(anchor(category)) {
            h2 { (heading(category)) " (" (todos.len()) ")" }
            ul {
                @for todo in todos {
                    (item(todo))
                }
            }
        }
    }
}

fn item(todo: &Todo) -> Markup {
    let id = todo.id.get();
    let complete_label = if todo.is_completed { "Undo" } else { "Complete" };
    let urgent_label = if todo.is_urgent { "Not urgent" } else { "Urgent" };

    html! {
        li.TodoItem data-id=(id) {
            strong { (todo.title) }
            @if !todo.description.is_empty() {
                p { (todo.description) }
            }
            (button(&format!("/todos/{id}/delete"), "Delete"))
            (toggle_button(id, TodoProperty::Completed, complete_label))
            (toggle_button(id, TodoProperty::Urgent, urgent_label))
        }
    }
}

fn toggle_button(id: u64, property: TodoProperty, label: &str) -> Markup {
    button(&format!("/todos/{id}/toggle/{}", property.as_str()), label)
}

fn button(action: &str, label: &str) -> Markup {
    html! {
        form method="post" action=(action) {
            button type="submit" { (label) }
        }
    }
}
