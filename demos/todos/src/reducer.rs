//! Reducers: pure state transitions

use std::sync::Arc;

use unistore::{combine_reducers, Dispatched};

use crate::action::TodoAction;
use crate::state::{Todo, TodoState, VisibilityFilter};

/// Toggle one item, returning the same `Arc` when `id` is someone else's
fn toggle_todo(todo: Arc<Todo>, id: u64) -> Arc<Todo> {
    if todo.id != id {
        return todo;
    }
    Arc::new(Todo {
        completed: !todo.completed,
        ..Todo::clone(&todo)
    })
}

/// Slice reducer for the todo list
pub fn todos(state: Option<&Vec<Arc<Todo>>>, action: Dispatched<'_, TodoAction>) -> Vec<Arc<Todo>> {
    let state = state.cloned().unwrap_or_default();
    match action.action() {
        Some(TodoAction::AddTodo { id, text }) => {
            let mut next = state;
            next.push(Arc::new(Todo {
                id: *id,
                text: text.clone(),
                completed: false,
            }));
            next
        }
        Some(TodoAction::ToggleTodo { id }) => {
            state.into_iter().map(|todo| toggle_todo(todo, *id)).collect()
        }
        _ => state,
    }
}

/// Slice reducer for the visibility filter
pub fn visibility_filter(
    state: Option<&VisibilityFilter>,
    action: Dispatched<'_, TodoAction>,
) -> VisibilityFilter {
    match action.action() {
        Some(TodoAction::SetVisibilityFilter { filter }) => *filter,
        _ => state.copied().unwrap_or_default(),
    }
}

/// Root reducer
pub fn todo_app(state: Option<&TodoState>, action: Dispatched<'_, TodoAction>) -> TodoState {
    let root = combine_reducers!(TodoState {
        todos: todos,
        visibility_filter: visibility_filter,
    });
    root(state, action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::TodoIds;
    use unistore::testing::replay;

    fn todo(id: u64, text: &str, completed: bool) -> Arc<Todo> {
        Arc::new(Todo {
            id,
            text: text.into(),
            completed,
        })
    }

    #[test]
    fn test_add_todo_to_empty_list() {
        let action = TodoAction::AddTodo {
            id: 0,
            text: "Learn Redux".into(),
        };
        let after = todos(Some(&Vec::new()), Dispatched::Action(&action));
        assert_eq!(after, vec![todo(0, "Learn Redux", false)]);
    }

    #[test]
    fn test_toggle_todo_only_touches_target() {
        let before = vec![
            todo(0, "Learn Redux", false),
            todo(1, "Go shopping", false),
        ];
        let action = TodoAction::toggle(1);
        let after = todos(Some(&before), Dispatched::Action(&action));

        assert_eq!(
            after,
            vec![todo(0, "Learn Redux", false), todo(1, "Go shopping", true)]
        );
        // untouched items are shared, not copied
        assert!(Arc::ptr_eq(&before[0], &after[0]));
        // the input is left as it was
        assert!(!before[1].completed);
    }

    #[test]
    fn test_toggle_unknown_id_changes_nothing() {
        let before = vec![todo(0, "Learn Redux", false)];
        let action = TodoAction::toggle(42);
        let after = todos(Some(&before), Dispatched::Action(&action));
        assert_eq!(after, before);
    }

    #[test]
    fn test_visibility_filter() {
        assert_eq!(visibility_filter(None, Dispatched::Init), VisibilityFilter::ShowAll);

        let action = TodoAction::set_filter(VisibilityFilter::ShowCompleted);
        assert_eq!(
            visibility_filter(None, Dispatched::Action(&action)),
            VisibilityFilter::ShowCompleted
        );

        let unrelated = TodoAction::toggle(0);
        assert_eq!(
            visibility_filter(Some(&VisibilityFilter::ShowActive), Dispatched::Action(&unrelated)),
            VisibilityFilter::ShowActive
        );
    }

    #[test]
    fn test_todo_app_initial_state() {
        assert_eq!(todo_app(None, Dispatched::Init), TodoState::default());
    }

    #[test]
    fn test_todo_app_tutorial_sequence() {
        let mut ids = TodoIds::new();
        let actions = [
            ids.add_todo("Learn Redux"),
            ids.add_todo("Go Shopping"),
            TodoAction::toggle(0),
            TodoAction::set_filter(VisibilityFilter::ShowCompleted),
        ];

        let state = replay(&todo_app, None, &actions);
        assert_eq!(
            state,
            TodoState {
                todos: vec![todo(0, "Learn Redux", true), todo(1, "Go Shopping", false)],
                visibility_filter: VisibilityFilter::ShowCompleted,
            }
        );
    }

    #[test]
    fn test_slices_are_isolated() {
        let state = TodoState {
            todos: vec![todo(0, "Learn Redux", false)],
            visibility_filter: VisibilityFilter::ShowAll,
        };

        let filter_change = TodoAction::set_filter(VisibilityFilter::ShowActive);
        let next = todo_app(Some(&state), Dispatched::Action(&filter_change));
        assert_eq!(next.todos, state.todos);
        assert!(Arc::ptr_eq(&next.todos[0], &state.todos[0]));

        let toggle = TodoAction::toggle(0);
        let next = todo_app(Some(&state), Dispatched::Action(&toggle));
        assert_eq!(next.visibility_filter, state.visibility_filter);
    }
}
