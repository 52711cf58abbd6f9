//! Filter links: "Show: All Active Completed"

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::state::VisibilityFilter;

pub struct FilterBarProps<A> {
    /// The filter currently applied
    pub active: VisibilityFilter,
    pub on_click: fn(VisibilityFilter) -> A,
}

/// One link per filter, selected with 1/2/3
///
/// The active filter renders as plain text and selecting it again emits nothing.
#[derive(Default)]
pub struct FilterBar;

impl FilterBar {
    fn filter_for_key(code: KeyCode) -> Option<VisibilityFilter> {
        match code {
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                VisibilityFilter::ALL.get(index).copied()
            }
            _ => None,
        }
    }
}

impl<A> Component<A> for FilterBar {
    type Props<'a> = FilterBarProps<A>;

    fn handle_key(&mut self, key: &KeyEvent, props: Self::Props<'_>) -> impl IntoIterator<Item = A> {
        Self::filter_for_key(key.code)
            .filter(|filter| *filter != props.active)
            .map(props.on_click)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let mut spans = vec![Span::raw(" Show: ")];
        for (i, filter) in VisibilityFilter::ALL.into_iter().enumerate() {
            spans.push(Span::styled(
                format!("{} ", i + 1),
                Style::default().fg(Color::DarkGray),
            ));
            let style = if filter == props.active {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED)
            };
            spans.push(Span::styled(filter.label(), style));
            spans.push(Span::raw("  "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
