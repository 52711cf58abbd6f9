//! Scrollable todo list

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use super::Component;
use crate::state::Todo;

pub struct TodoListProps<'a, A> {
    /// Items to show, already filtered
    pub todos: &'a [Arc<Todo>],
    pub is_focused: bool,
    /// Creates the action for activating the todo with this id
    pub on_todo_click: fn(u64) -> A,
}

/// Todo list with a keyboard cursor
///
/// j/k/Up/Down move the cursor, Enter/Space activates the item under it.
/// Completed items are struck through.
#[derive(Default)]
pub struct TodoList {
    /// Cursor position within the visible items
    selected: usize,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

impl<A> Component<A> for TodoList {
    type Props<'a> = TodoListProps<'a, A>;

    fn handle_key(&mut self, key: &KeyEvent, props: Self::Props<'_>) -> impl IntoIterator<Item = A> {
        if !props.is_focused || props.todos.is_empty() {
            return None;
        }
        self.clamp(props.todos.len());

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.selected = (self.selected + 1).min(props.todos.len() - 1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let todo = &props.todos[self.selected];
                Some((props.on_todo_click)(todo.id))
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.clamp(props.todos.len());

        let items: Vec<ListItem> = props
            .todos
            .iter()
            .map(|todo| {
                let (mark, style) = if todo.completed {
                    (
                        "[x] ",
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT),
                    )
                } else {
                    ("[ ] ", Style::default())
                };
                ListItem::new(Line::styled(format!("{}{}", mark, todo.text), style))
            })
            .collect();

        let border_color = if props.is_focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .title(" Todos ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = ListState::default();
        if props.is_focused && !props.todos.is_empty() {
            state.select(Some(self.selected));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }
}
