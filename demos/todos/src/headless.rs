//! Non-interactive replay of a fixed action script
//!
//! Prints the state as pretty JSON before the first dispatch and after each
//! one, so a run can be diffed or piped into `jq`.

use std::io::{self, Write};

use unistore::{Action, Store};

use crate::action::{TodoAction, TodoIds};
use crate::reducer::todo_app;
use crate::state::{TodoState, VisibilityFilter};

const SEPARATOR: &str = "--------------";

/// Two todos added, the first completed, then only completed ones shown
pub fn tutorial_script(ids: &mut TodoIds) -> Vec<TodoAction> {
    vec![
        ids.add_todo("Learn Redux"),
        ids.add_todo("Go Shopping"),
        TodoAction::toggle(0),
        TodoAction::set_filter(VisibilityFilter::ShowCompleted),
    ]
}

fn write_state<W: Write>(out: &mut W, label: &str, state: &TodoState) -> io::Result<()> {
    writeln!(out, "{}:", label)?;
    serde_json::to_writer_pretty(&mut *out, state)?;
    writeln!(out)?;
    writeln!(out, "{}", SEPARATOR)
}

/// Dispatch `actions` to a fresh store seeded with `initial`, logging each step
///
/// Returns the final state.
pub fn run_script<W: Write>(
    out: &mut W,
    initial: TodoState,
    actions: impl IntoIterator<Item = TodoAction>,
) -> io::Result<TodoState> {
    let store = Store::with_state(todo_app, initial);
    write_state(out, "Initial State", &store.state())?;

    for action in actions {
        writeln!(out, "Dispatching {}", action.name())?;
        store.dispatch(action).map_err(io::Error::other)?;
        write_state(out, "Current State", &store.state())?;
    }

    Ok(TodoState::clone(&store.state()))
}

/// Run [`tutorial_script`] starting from `filter`
pub fn run_headless<W: Write>(out: &mut W, filter: VisibilityFilter) -> io::Result<TodoState> {
    let actions = tutorial_script(&mut TodoIds::new());
    run_script(out, TodoState::with_filter(filter), actions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_ids() {
        let actions = tutorial_script(&mut TodoIds::new());
        let names: Vec<_> = actions.iter().map(|a| a.name()).collect();
        assert_eq!(
            names,
            vec!["ADD_TODO", "ADD_TODO", "TOGGLE_TODO", "SET_VISIBILITY_FILTER"]
        );
        assert!(matches!(actions[1], TodoAction::AddTodo { id: 1, .. }));
    }

    #[test]
    fn test_empty_script_prints_initial_state_only() {
        let mut out = Vec::new();
        let state = run_script(&mut out, TodoState::default(), []).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(state, TodoState::default());
        assert!(text.starts_with("Initial State:\n"));
        assert!(!text.contains("Dispatching"));
        assert_eq!(text.matches(SEPARATOR).count(), 1);
    }
}
