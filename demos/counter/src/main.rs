//! Counter - minimal unistore demo
//!
//! - State: a single `i32`
//! - Actions: `INCREMENT` / `DECREMENT`
//! - Reducer: pure `(Option<&i32>, action) -> i32`
//! - Store: holds the count and notifies a subscriber that marks the frame dirty
//! - Main loop: Event -> Action -> Dispatch -> Render
//!
//! Keys: k/Up = increment, j/Down = decrement, q = quit
//!
//! ```sh
//! counter --start 10 --log /tmp/counter.log
//! ```

mod logging;

use std::cell::Cell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::KeyCode,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use unistore::{spawn_event_poller, Action, Dispatched, Store, TermEvent};

use logging::init_logging;

/// Terminal counter backed by a unistore Store
#[derive(Parser, Debug)]
#[command(name = "counter")]
struct Args {
    /// Initial count
    #[arg(long, short, default_value_t = 0, allow_negative_numbers = true)]
    start: i32,

    /// Write logs to this file (logging is off otherwise)
    #[arg(long, env = "COUNTER_LOG")]
    log: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Action)]
#[action(rename_all = "SCREAMING_SNAKE_CASE")]
enum CounterAction {
    Increment,
    Decrement,
}

fn counter(state: Option<&i32>, action: Dispatched<'_, CounterAction>) -> i32 {
    let state = state.copied().unwrap_or(0);
    match action.action() {
        Some(CounterAction::Increment) => state.saturating_add(1),
        Some(CounterAction::Decrement) => state.saturating_sub(1),
        None => state,
    }
}

fn key_to_action(code: KeyCode) -> Option<CounterAction> {
    match code {
        KeyCode::Char('k') | KeyCode::Up => Some(CounterAction::Increment),
        KeyCode::Char('j') | KeyCode::Down => Some(CounterAction::Decrement),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(args.log.as_deref())?;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, args.start).await;

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    start: i32,
) -> io::Result<()> {
    let store = Store::with_state(counter, start);
    info!(start, "counter started");

    let dirty = Rc::new(Cell::new(true));
    let _subscription = store.subscribe({
        let dirty = Rc::clone(&dirty);
        move || dirty.set(true)
    });

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<TermEvent>();
    let cancel_token = CancellationToken::new();
    let _handle = spawn_event_poller(
        event_tx,
        Duration::from_millis(10),
        Duration::from_millis(16),
        cancel_token.clone(),
    );
    // Stops the poller on every exit path, including errors
    let _poller_guard = cancel_token.drop_guard();

    loop {
        if dirty.replace(false) {
            let count = *store.state();
            terminal.draw(|frame| render(frame, count))?;
        }

        let Some(event) = event_rx.recv().await else {
            break;
        };
        match event {
            TermEvent::Key(key) if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) => {
                info!(count = *store.state(), "quitting");
                break;
            }
            TermEvent::Key(key) => match key_to_action(key.code) {
                Some(action) => {
                    debug!(key = ?key.code, action = action.name(), "key mapped");
                    store.dispatch(action).map_err(io::Error::other)?;
                }
                None => debug!(key = ?key.code, "unmapped key"),
            },
            TermEvent::Resize(width, height) => {
                debug!(width, height, "resize");
                dirty.set(true);
            }
        }
    }

    Ok(())
}

fn render(frame: &mut Frame, count: i32) {
    let area = frame.area();

    let [_, center, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(30),
        Constraint::Fill(1),
    ])
    .flex(Flex::Center)
    .areas(center);

    let block = Block::default()
        .title(" Counter ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(count.to_string())
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, center);

    let [_, help_area]: [Rect; 2] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
    let help = Paragraph::new("k/Up: +1  j/Down: -1  q: quit")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use unistore::testing::{replay, CallLog};

    #[test]
    fn test_counter_defaults_to_zero() {
        assert_eq!(counter(None, Dispatched::Init), 0);
        assert_eq!(counter(Some(&7), Dispatched::Init), 7);
    }

    #[test]
    fn test_counter_replay() {
        let actions = [
            CounterAction::Increment,
            CounterAction::Increment,
            CounterAction::Decrement,
        ];
        assert_eq!(replay(&counter, None, &actions), 1);
        assert_eq!(replay(&counter, Some(-5), &actions), -4);
    }

    #[test]
    fn test_counter_saturates_at_bounds() {
        let store = Store::with_state(counter, i32::MAX);
        store.dispatch(CounterAction::Increment).unwrap();
        assert_eq!(*store.state(), i32::MAX);

        let store = Store::with_state(counter, i32::MIN);
        store.dispatch(CounterAction::Decrement).unwrap();
        assert_eq!(*store.state(), i32::MIN);
        store.dispatch(CounterAction::Increment).unwrap();
        assert_eq!(*store.state(), i32::MIN + 1);
    }

    #[test]
    fn test_action_names() {
        assert_eq!(CounterAction::Increment.name(), "INCREMENT");
        assert_eq!(CounterAction::KINDS, &["INCREMENT", "DECREMENT"]);
    }

    #[test]
    fn test_keys_map_to_actions() {
        assert_eq!(key_to_action(KeyCode::Up), Some(CounterAction::Increment));
        assert_eq!(key_to_action(KeyCode::Char('j')), Some(CounterAction::Decrement));
        assert_eq!(key_to_action(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_store_notifies_once_per_key() {
        let store = Store::with_state(counter, 41);
        let log = CallLog::new();
        let _sub = store.subscribe(log.listener("render"));

        store.dispatch(CounterAction::Increment).unwrap();
        assert_eq!(*store.state(), 42);
        assert_eq!(log.calls(), vec!["render"]);
    }

    #[test]
    fn test_render_shows_count() {
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal.draw(|frame| render(frame, -3)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Counter"));
        assert!(text.contains("-3"));
        assert!(text.contains("q: quit"));
    }
}
