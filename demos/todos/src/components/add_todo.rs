//! Single-line input for new todos

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;

pub struct AddTodoProps<'a> {
    pub placeholder: &'a str,
    pub is_focused: bool,
}

/// Text field that owns its draft and emits it on Enter
///
/// The emitted value is the trimmed text; blank drafts are not submitted.
/// Submitting clears the field.
#[derive(Default)]
pub struct AddTodo {
    draft: String,
}

impl AddTodo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }
}

impl Component<String> for AddTodo {
    type Props<'a> = AddTodoProps<'a>;

    fn handle_key(&mut self, key: &KeyEvent, props: Self::Props<'_>) -> impl IntoIterator<Item = String> {
        if !props.is_focused {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            // Ctrl+U: clear line
            if key.code == KeyCode::Char('u') {
                self.draft.clear();
            }
            return None;
        }

        match key.code {
            KeyCode::Char(c) => {
                self.draft.push(c);
                None
            }
            KeyCode::Backspace => {
                self.draft.pop();
                None
            }
            KeyCode::Enter => {
                let text = std::mem::take(&mut self.draft);
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let (text, text_style) = if self.draft.is_empty() {
            (props.placeholder, Style::default().fg(Color::DarkGray))
        } else {
            (self.draft.as_str(), Style::default())
        };

        let border_color = if props.is_focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .title(" Add Todo ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        frame.render_widget(Paragraph::new(text).style(text_style).block(block), area);

        if props.is_focused {
            let cursor_x = area.x + 1 + self.draft.chars().count() as u16;
            frame.set_cursor_position(Position::new(
                cursor_x.min(area.right().saturating_sub(2)),
                area.y + 1,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_util::{key, render_to_string};

    fn props() -> AddTodoProps<'static> {
        AddTodoProps {
            placeholder: "What needs to be done?",
            is_focused: true,
        }
    }

    fn type_str(input: &mut AddTodo, text: &str) {
        for c in text.chars() {
            assert_eq!(input.handle_key(&key(KeyCode::Char(c)), props()).into_iter().count(), 0);
        }
    }

    #[test]
    fn test_typing_and_submit() {
        let mut input = AddTodo::new();
        type_str(&mut input, "Buy milkk");
        input.handle_key(&key(KeyCode::Backspace), props());
        assert_eq!(input.draft(), "Buy milk");

        let submitted: Vec<_> = input.handle_key(&key(KeyCode::Enter), props()).into_iter().collect();
        assert_eq!(submitted, vec!["Buy milk".to_string()]);
        assert_eq!(input.draft(), "");
    }

    #[test]
    fn test_blank_draft_is_not_submitted() {
        let mut input = AddTodo::new();
        type_str(&mut input, "   ");
        assert_eq!(input.handle_key(&key(KeyCode::Enter), props()).into_iter().count(), 0);
        assert_eq!(input.draft(), "");
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = AddTodo::new();
        type_str(&mut input, "oops");
        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        input.handle_key(&ctrl_u, props());
        assert_eq!(input.draft(), "");
    }

    #[test]
    fn test_unfocused_ignores_input() {
        let mut input = AddTodo::new();
        let unfocused = AddTodoProps {
            placeholder: "",
            is_focused: false,
        };
        input.handle_key(&key(KeyCode::Char('a')), unfocused);
        assert_eq!(input.draft(), "");
    }

    #[test]
    fn test_render_placeholder_then_draft() {
        let mut input = AddTodo::new();
        let output = render_to_string(40, 3, |frame| input.render(frame, frame.area(), props()));
        assert!(output.contains("What needs to be done?"));

        type_str(&mut input, "Learn Redux");
        let output = render_to_string(40, 3, |frame| input.render(frame, frame.area(), props()));
        assert!(output.contains("Learn Redux"));
        assert!(!output.contains("What needs to be done?"));
    }
}
