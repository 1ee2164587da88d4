//! Granted - Grant Application Assistant
//!
//! Terminal front end: parses configuration, installs file logging, restores
//! any saved session and runs the draw/poll/tick loop until the user quits.

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use granted::infrastructure::{init_tracing, AppConfig, Cli};
use granted::presentation::{render_ui, InputHandler};
use granted::{App, AppMode};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::time::Instant;

/// Entry point for the grant assistant.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the log file cannot be
/// opened, or terminal setup fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_cli(Cli::parse())?;
    init_tracing(&config.log_file)?;
    tracing::info!(backend = %config.backend_url, session_file = ?config.session_file, "starting");

    let mut app = App::from_config(&config)?;
    app.restore_session();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);
    app.shutdown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal loop failed");
        println!("{err:?}");
    }

    Ok(())
}

/// Draws, waits up to one tick for a key, then lets background work land.
/// Returns on `q` in normal mode or Ctrl+C anywhere.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char('q') if matches!(app.mode, AppMode::Normal) => return Ok(()),
                        _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                    }
                }
            }
        }

        app.tick(Instant::now());
    }
}
