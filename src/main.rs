//! suds - Terminal booking app for home-cleaning services
//!
//! Sets up the terminal, wires the application state to local storage
//! and the mocked services, and runs the event loop until the user
//! quits.

use std::io;
use std::path::PathBuf;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod application;
mod domain;
mod infrastructure;
mod presentation;

use application::App;
use infrastructure::KeyValueStore;
use presentation::{render_ui, InputHandler};

/// Sends logs to a file; the alternate screen owns stdout. The returned
/// guard must stay alive so buffered lines flush on exit.
fn init_logging() -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    let logs_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("suds")
        .join("logs");
    std::fs::create_dir_all(&logs_dir)?;

    let timestamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
    let file_appender =
        tracing_appender::rolling::never(&logs_dir, format!("suds-{}.log", timestamp));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::new(std::env::var("SUDS_LOG").unwrap_or_else(|_| "info".to_string()));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();
    Ok(guard)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = init_logging()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(KeyValueStore::default_location());
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                // Status messages describe the previous action only
                app.status_message = None;
                InputHandler::handle_key_event(app, key.code, key.modifiers);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
