//! Todos - unistore demo
//!
//! 1. Key event -> TodoApp routes it to the focused container
//! 2. Container maps it to an action and dispatches to the Store
//! 3. Store runs `todo_app` (combined reducers) and notifies subscribers
//! 4. The subscriber marks the frame dirty; the loop re-renders from state
//!
//! # Usage
//!
//! ```sh
//! # Interactive
//! todos --filter show-active
//!
//! # Replay the demo script and print each state as JSON
//! todos --headless
//! ```

use std::cell::Cell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use unistore::{spawn_event_poller, Store, TermEvent};

use todos::headless::run_headless;
use todos::logging::init_logging;
use todos::{todo_app, Flow, TodoApp, TodoState, VisibilityFilter};

/// Terminal to-do list backed by a unistore Store
#[derive(Parser, Debug)]
#[command(name = "todos")]
struct Args {
    /// Replay the demo script, print each state as JSON, and exit
    #[arg(long)]
    headless: bool,

    /// Initial visibility filter
    #[arg(long, short, value_enum, default_value_t = VisibilityFilter::ShowAll)]
    filter: VisibilityFilter,

    /// Write logs to this file (logging is off otherwise)
    #[arg(long, env = "TODOS_LOG")]
    log: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(args.log.as_deref())?;

    if args.headless {
        let mut stdout = io::stdout().lock();
        run_headless(&mut stdout, args.filter)?;
        return Ok(());
    }

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, args.filter).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    filter: VisibilityFilter,
) -> io::Result<()> {
    let store = Store::with_state(todo_app, TodoState::with_filter(filter));
    let mut app = TodoApp::new(&store);
    info!(?filter, "todos started");

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
    let _poller_guard = cancel_token.drop_guard();

    loop {
        if dirty.replace(false) {
            terminal.draw(|frame| app.render(frame))?;
        }

        let Some(event) = event_rx.recv().await else {
            break;
        };
        match event {
            TermEvent::Key(key) => {
                debug!(key = ?key.code, focus = ?app.focus(), "key");
                let flow = app.handle_key(&key).map_err(io::Error::other)?;
                if flow == Flow::Quit {
                    info!(todos = store.state().todos.len(), "quitting");
                    break;
                }
                // Focus and cursor moves are view-local and never reach the store
                dirty.set(true);
            }
            TermEvent::Resize(width, height) => {
                debug!(width, height, "resize");
                dirty.set(true);
            }
        }
    }

    Ok(())
}
