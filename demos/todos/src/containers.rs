//! Container components
//!
//! `VisibleTodoList` and `FilterLinks` are generated with [`connect`] from a
//! state-to-props and a dispatch-to-props function, and reach the store
//! through the [`TodoContext`] the root view hands them at construction.
//! `AddTodoContainer` instead takes the store as an explicit argument on every
//! call.

use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use unistore::{Store, StoreError};

use crate::action::{TodoAction, TodoIds};
use crate::components::{
    AddTodo, AddTodoProps, Component, FilterBar, FilterBarProps, TodoList, TodoListProps,
};
use crate::connect::{connect, Connectable, Connected, StoreContext};
use crate::selectors::visible_todos;
use crate::state::{Todo, TodoState, VisibilityFilter};

pub type TodoStore = Store<TodoState, TodoAction>;
pub type TodoContext = StoreContext<TodoState, TodoAction>;

impl<A> Connectable<A> for TodoList {
    type StateProps = Vec<Arc<Todo>>;
    type DispatchProps = fn(u64) -> A;

    fn merge_props<'a>(
        todos: &'a Self::StateProps,
        on_todo_click: &'a Self::DispatchProps,
        is_focused: bool,
    ) -> Self::Props<'a> {
        TodoListProps {
            todos,
            is_focused,
            on_todo_click: *on_todo_click,
        }
    }
}

impl<A> Connectable<A> for FilterBar {
    type StateProps = VisibilityFilter;
    type DispatchProps = fn(VisibilityFilter) -> A;

    fn merge_props<'a>(
        active: &'a Self::StateProps,
        on_click: &'a Self::DispatchProps,
        _is_focused: bool,
    ) -> Self::Props<'a> {
        FilterBarProps {
            active: *active,
            on_click: *on_click,
        }
    }
}

/// The todo list, filtered by the current visibility filter
///
/// Activating an item dispatches `TOGGLE_TODO` for it.
pub type VisibleTodoList = Connected<TodoList, TodoState, TodoAction>;

fn map_state_to_todo_list_props(state: &TodoState) -> Vec<Arc<Todo>> {
    visible_todos(&state.todos, state.visibility_filter)
}

fn map_dispatch_to_todo_list_props() -> fn(u64) -> TodoAction {
    TodoAction::toggle
}

pub fn visible_todo_list(context: &TodoContext) -> VisibleTodoList {
    connect(
        context,
        map_state_to_todo_list_props,
        map_dispatch_to_todo_list_props,
        TodoList::new(),
    )
}

/// Filter links bound to the visibility filter slice
pub type FilterLinks = Connected<FilterBar, TodoState, TodoAction>;

fn map_state_to_link_props(state: &TodoState) -> VisibilityFilter {
    state.visibility_filter
}

fn map_dispatch_to_link_props() -> fn(VisibilityFilter) -> TodoAction {
    TodoAction::set_filter
}

pub fn filter_links(context: &TodoContext) -> FilterLinks {
    connect(
        context,
        map_state_to_link_props,
        map_dispatch_to_link_props,
        FilterBar,
    )
}

/// New-todo input; submitted text becomes an `ADD_TODO` with a fresh id
///
/// Reads nothing from state; the store is only used to dispatch.
#[derive(Default)]
pub struct AddTodoContainer {
    input: AddTodo,
    ids: TodoIds,
}

impl AddTodoContainer {
    const PLACEHOLDER: &'static str = "What needs to be done?";

    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing id sequence
    pub fn with_ids(ids: TodoIds) -> Self {
        Self {
            input: AddTodo::new(),
            ids,
        }
    }

    fn props(is_focused: bool) -> AddTodoProps<'static> {
        AddTodoProps {
            placeholder: Self::PLACEHOLDER,
            is_focused,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, is_focused: bool) {
        self.input.render(frame, area, Self::props(is_focused));
    }

    pub fn handle_key(
        &mut self,
        key: &KeyEvent,
        store: &TodoStore,
        is_focused: bool,
    ) -> Result<(), StoreError> {
        let submitted: Vec<String> = self
            .input
            .handle_key(key, Self::props(is_focused))
            .into_iter()
            .collect();
        let actions: Vec<TodoAction> = submitted
            .into_iter()
            .map(|text| self.ids.add_todo(text))
            .collect();
        for action in actions {
            store.dispatch(action)?;
        }
        Ok(())
    }
}
