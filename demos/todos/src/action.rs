//! Actions and action creators

use unistore::Action;

use crate::state::VisibilityFilter;

#[derive(Action, Clone, Debug, PartialEq)]
#[action(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoAction {
    AddTodo { id: u64, text: String },
    ToggleTodo { id: u64 },
    SetVisibilityFilter { filter: VisibilityFilter },
}

impl TodoAction {
    pub fn toggle(id: u64) -> Self {
        Self::ToggleTodo { id }
    }

    pub fn set_filter(filter: VisibilityFilter) -> Self {
        Self::SetVisibilityFilter { filter }
    }
}

/// Creates `ADD_TODO` actions with sequential ids
///
/// Ids start at 0 and are never reused, so every todo added through the same
/// `TodoIds` gets a distinct id.
#[derive(Debug, Default)]
pub struct TodoIds {
    next: u64,
}

impl TodoIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_todo(&mut self, text: impl Into<String>) -> TodoAction {
        let id = self.next;
        self.next += 1;
        TodoAction::AddTodo {
            id,
            text: text.into(),
        }
    }
}
