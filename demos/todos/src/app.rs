//! Root view: input, filtered list, filter links, help line

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::debug;
use unistore::StoreError;

use crate::containers::{
    filter_links, visible_todo_list, AddTodoContainer, FilterLinks, TodoContext, TodoStore,
    VisibleTodoList,
};

/// Which part of the screen receives keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Input,
    List,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Input => Focus::List,
            Focus::List => Focus::Input,
        }
    }
}

/// What the event loop should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Composes the containers and routes keys by focus
///
/// Tab switches focus. With the input focused, keys edit the draft and Enter
/// adds it. With the list focused, j/k move, Enter/Space toggle, 1/2/3 pick a
/// filter, and q quits. Esc and Ctrl+C quit from anywhere.
pub struct TodoApp {
    context: TodoContext,
    add_todo: AddTodoContainer,
    list: VisibleTodoList,
    filters: FilterLinks,
    focus: Focus,
}

impl TodoApp {
    /// Build the view tree; the connected containers share one context
    pub fn new(store: &TodoStore) -> Self {
        let context = TodoContext::new(store);
        Self {
            list: visible_todo_list(&context),
            filters: filter_links(&context),
            add_todo: AddTodoContainer::new(),
            focus: Focus::default(),
            context,
        }
    }

    pub fn context(&self) -> &TodoContext {
        &self.context
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let [input_area, list_area, filter_area, help_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.add_todo
            .render(frame, input_area, self.focus == Focus::Input);
        self.list
            .render(frame, list_area, self.focus == Focus::List);
        self.filters.render(frame, filter_area, false);
        render_help(frame, help_area);
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> Result<Flow, StoreError> {
        let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');
        if ctrl_c || key.code == KeyCode::Esc {
            debug!(key = ?key.code, "quit requested");
            return Ok(Flow::Quit);
        }
        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            self.focus = self.focus.next();
            debug!(focus = ?self.focus, "focus changed");
            return Ok(Flow::Continue);
        }

        match self.focus {
            Focus::Input => self.add_todo.handle_key(key, self.context.store(), true)?,
            Focus::List => {
                if key.code == KeyCode::Char('q') {
                    debug!("quit requested from list");
                    return Ok(Flow::Quit);
                }
                self.filters.handle_key(key, true)?;
                self.list.handle_key(key, true)?;
            }
        }
        Ok(Flow::Continue)
    }
}

fn render_help(frame: &mut Frame, area: ratatui::layout::Rect) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan).bold());
    let text = |t: &'static str| Span::styled(t, Style::default().fg(Color::DarkGray));
    let help = Line::from(vec![
        key(" Tab"),
        text(" focus  "),
        key("Enter"),
        text(" add/toggle  "),
        key("1-3"),
        text(" filter  "),
        key("Esc"),
        text(" quit "),
    ])
    .centered();
    frame.render_widget(Paragraph::new(help), area);
}
