//! Derived data computed from state

use std::sync::Arc;

use crate::state::{Todo, VisibilityFilter};

/// The todos shown under `filter`, in list order
pub fn visible_todos(todos: &[Arc<Todo>], filter: VisibilityFilter) -> Vec<Arc<Todo>> {
    todos
        .iter()
        .filter(|todo| filter.matches(todo))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Arc<Todo>> {
        [("Learn Redux", true), ("Go Shopping", false), ("Write tests", true)]
            .into_iter()
            .enumerate()
            .map(|(id, (text, completed))| {
                Arc::new(Todo {
                    id: id as u64,
                    text: text.into(),
                    completed,
                })
            })
            .collect()
    }

    fn ids(todos: &[Arc<Todo>]) -> Vec<u64> {
        todos.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_visible_todos() {
        let todos = sample();
        assert_eq!(ids(&visible_todos(&todos, VisibilityFilter::ShowAll)), vec![0, 1, 2]);
        assert_eq!(ids(&visible_todos(&todos, VisibilityFilter::ShowActive)), vec![1]);
        assert_eq!(
            ids(&visible_todos(&todos, VisibilityFilter::ShowCompleted)),
            vec![0, 2]
        );
        assert!(visible_todos(&[], VisibilityFilter::ShowAll).is_empty());
    }
}
