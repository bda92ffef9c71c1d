//! KissanKart - Farmer-to-Consumer Marketplace
//!
//! Terminal client connecting buyers with local farmers. Browse and search
//! harvests, manage a cart, and run a seller dashboard with AI-assisted
//! listing copy. All state lives in local JSON stores.

use std::fs::File;
use std::io;
use std::sync::Arc;

use anyhow::Context;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use tracing_subscriber::EnvFilter;

use kissankart::application::App;
use kissankart::infrastructure::AppConfig;
use kissankart::presentation::{InputHandler, render_ui};

/// Entry point for the KissanKart terminal client.
///
/// Loads configuration from the environment, sets up logging and the
/// terminal interface, and runs the main event loop until the user quits.
///
/// # Errors
///
/// Returns an error if configuration, store loading, or terminal setup
/// fails.
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing(&config)?;

    let mut app = App::init(&config).context("could not open local stores")?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Sends structured logs to the configured log file; stdout belongs to
/// the TUI.
fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let log_file = File::create(&config.log_file)
        .with_context(|| format!("could not create log file {}", config.log_file.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kissankart=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Main application event loop.
///
/// Handles terminal rendering and keyboard input processing. Continues
/// running until the user presses 'q' outside a text field.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if !app.is_text_input_active() => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
