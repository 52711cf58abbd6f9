//! Application state

use std::sync::Arc;

use serde::Serialize;

/// One to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    pub id: u64,
    pub text: String,
    pub completed: bool,
}

/// Which todos the list shows
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisibilityFilter {
    #[default]
    ShowAll,
    ShowActive,
    ShowCompleted,
}

impl VisibilityFilter {
    /// Every filter, in the order the filter bar shows them
    pub const ALL: [VisibilityFilter; 3] = [Self::ShowAll, Self::ShowActive, Self::ShowCompleted];

    pub fn label(self) -> &'static str {
        match self {
            Self::ShowAll => "All",
            Self::ShowActive => "Active",
            Self::ShowCompleted => "Completed",
        }
    }

    /// Whether `todo` is visible under this filter
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::ShowAll => true,
            Self::ShowActive => !todo.completed,
            Self::ShowCompleted => todo.completed,
        }
    }
}

/// Root state: one field per slice reducer
///
/// Todos are shared behind `Arc` so a transition only allocates the items it
/// actually changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoState {
    pub todos: Vec<Arc<Todo>>,
    pub visibility_filter: VisibilityFilter,
}

impl TodoState {
    /// Initial state with a preselected filter
    pub fn with_filter(visibility_filter: VisibilityFilter) -> Self {
        Self {
            visibility_filter,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_matches() {
        let open = Todo {
            id: 0,
            text: "Learn Redux".into(),
            completed: false,
        };
        let done = Todo {
            completed: true,
            ..open.clone()
        };

        assert!(VisibilityFilter::ShowAll.matches(&open));
        assert!(VisibilityFilter::ShowAll.matches(&done));
        assert!(VisibilityFilter::ShowActive.matches(&open));
        assert!(!VisibilityFilter::ShowActive.matches(&done));
        assert!(!VisibilityFilter::ShowCompleted.matches(&open));
        assert!(VisibilityFilter::ShowCompleted.matches(&done));
    }

    #[test]
    fn test_state_json_shape() {
        let state = TodoState {
            todos: vec![Arc::new(Todo {
                id: 0,
                text: "Learn Redux".into(),
                completed: true,
            })],
            visibility_filter: VisibilityFilter::ShowCompleted,
        };

        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            json!({
                "todos": [{ "id": 0, "text": "Learn Redux", "completed": true }],
                "visibilityFilter": "SHOW_COMPLETED",
            })
        );
    }

    #[test]
    fn test_default_state() {
        let state = TodoState::default();
        assert!(state.todos.is_empty());
        assert_eq!(state.visibility_filter, VisibilityFilter::ShowAll);
        assert_eq!(
            TodoState::with_filter(VisibilityFilter::ShowActive).visibility_filter,
            VisibilityFilter::ShowActive
        );
    }
}
