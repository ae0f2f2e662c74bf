//! Property tests for the todo store.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use todo_board::{
    order, Todo, TodoAction, TodoCategory, TodoEnvironment, TodoId, TodoProperty, TodoReducer,
    TodoState,
};
use todo_board_core::reducer::Reducer;
use todo_board_testing::{properties::is_stable_partition, test_clock};

fn env() -> TodoEnvironment {
    TodoEnvironment::new(Arc::new(test_clock()))
}

fn arb_property() -> impl Strategy<Value = TodoProperty> {
    prop_oneof![Just(TodoProperty::Completed), Just(TodoProperty::Urgent)]
}

fn arb_todos() -> impl Strategy<Value = Vec<Todo>> {
    prop::collection::vec((any::<bool>(), any::<bool>(), "[a-z]{1,8}"), 0..24).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (urgent, completed, title))| {
                Todo::new(TodoId::new(i as u64 + 1), title, "")
                    .urgent(urgent)
                    .completed(completed)
            })
            .collect()
    })
}

/// Commands aimed at a small id range so that hits and misses both occur
fn arb_command() -> impl Strategy<Value = TodoAction> {
    prop_oneof![
        ("[a-z ]{0,8}", "[a-z]{0,8}").prop_map(|(title, description)| TodoAction::AddTodo {
            title,
            description
        }),
        (0_u64..16).prop_map(|id| TodoAction::DeleteTodo { id: TodoId::new(id) }),
        (0_u64..16, arb_property()).prop_map(|(id, property)| TodoAction::ToggleProperty {
            id: TodoId::new(id),
            property
        }),
    ]
}

proptest! {
    #[test]
    fn ids_stay_unique(seed in arb_todos(), commands in prop::collection::vec(arb_command(), 0..40)) {
        let env = env();
        let mut state = TodoState::from_todos(seed).unwrap();

        for command in commands {
            TodoReducer.reduce(&mut state, command, &env);

            let ids: HashSet<TodoId> = state.todos().iter().map(|t| t.id).collect();
            prop_assert_eq!(ids.len(), state.count());
            prop_assert!(state.todos().iter().all(|t| t.id < state.next_id()));
        }
    }

    #[test]
    fn collection_is_always_in_display_order(
        seed in arb_todos(),
        commands in prop::collection::vec(arb_command(), 0..40),
    ) {
        let env = env();
        let mut state = TodoState::from_todos(seed).unwrap();

        for command in commands {
            TodoReducer.reduce(&mut state, command, &env);
            let categories: Vec<TodoCategory> = state.todos().iter().map(Todo::category).collect();
            prop_assert!(categories.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn order_is_a_stable_partition(todos in arb_todos()) {
        let ordered = order(&todos);
        prop_assert!(is_stable_partition(&todos, &ordered, Todo::category));
    }

    #[test]
    fn order_is_idempotent(todos in arb_todos()) {
        let once = order(&todos);
        prop_assert_eq!(order(&once), once);
    }

    #[test]
    fn toggling_twice_restores_the_todo(
        todos in arb_todos(),
        pick in any::<prop::sample::Index>(),
        property in arb_property(),
    ) {
        prop_assume!(!todos.is_empty());
        let env = env();
        let mut state = TodoState::from_todos(todos).unwrap();
        let id = state.todos()[pick.index(state.count())].id;
        let before = state.get(id).cloned();

        for _ in 0..2 {
            TodoReducer.reduce(&mut state, TodoAction::ToggleProperty { id, property }, &env);
        }

        prop_assert_eq!(state.get(id).cloned(), before);
    }

    #[test]
    fn deleting_a_missing_id_changes_nothing(todos in arb_todos(), offset in 1_u64..100) {
        let env = env();
        let mut state = TodoState::from_todos(todos).unwrap();
        let before = state.todos().to_vec();
        let missing = TodoId::new(state.next_id().get() + offset);

        TodoReducer.reduce(&mut state, TodoAction::DeleteTodo { id: missing }, &env);

        prop_assert_eq!(state.todos(), before.as_slice());
    }
}
