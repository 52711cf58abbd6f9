//! Presentational components
//!
//! These render from props only and never touch the store. Containers in
//! [`crate::containers`] read the store, build props, and dispatch whatever
//! the components emit.

pub mod add_todo;
pub mod filter_bar;
pub mod todo_list;

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

pub use add_todo::{AddTodo, AddTodoProps};
pub use filter_bar::{FilterBar, FilterBarProps};
pub use todo_list::{TodoList, TodoListProps};

/// A pure UI element that renders from props and emits values on input
///
/// Props carry all read-only data needed for rendering, focus included.
/// Internal UI state (cursor, draft text) may live in `&mut self`, but
/// application data only changes through what `handle_key` emits.
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle a key press and return what it produces
    ///
    /// Returns any `IntoIterator`: `None` for nothing, `Some(a)` for one value.
    #[allow(unused_variables)]
    fn handle_key(&mut self, key: &KeyEvent, props: Self::Props<'_>) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}

#[cfg(test)]
pub(crate) mod test_util {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Frame, Terminal};

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Render into an in-memory terminal and return its rows as plain text
    pub fn render_to_string(width: u16, height: u16, draw: impl FnOnce(&mut Frame)) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(draw).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
