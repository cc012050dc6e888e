//! FITLOG - Terminal Workout Recorder
//!
//! A single-screen terminal form: enter a workout's name, duration, calories
//! and type, add it, and watch the session's list grow. Nothing is stored;
//! the list lives until the program exits.

use std::io;
use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;

use fitlog::application::App;
use fitlog::infrastructure::{init_logging, Cli, RecorderConfig};
use fitlog::presentation::{help_visible_height, render_ui, terminal as screen, InputHandler};

/// Entry point for the FITLOG terminal workout recorder.
///
/// Parses the command line, sets up logging and the terminal, runs the event
/// loop until the user quits and restores the terminal afterwards.
///
/// # Errors
///
/// Returns an error if logging or terminal setup fails, or if the terminal
/// fails during runtime.
fn main() -> anyhow::Result<()> {
    let config = RecorderConfig::from(Cli::parse());
    init_logging(config.log_file.as_deref(), config.log_level)?;
    info!(parsing = ?config.numeric_parsing, "starting fitlog");

    screen::install_panic_hook();
    screen::enter(&mut io::stdout()).context("failed to set up terminal")?;

    let mut app = App::new(config.numeric_parsing);
    let res = Terminal::new(CrosstermBackend::new(io::stdout()))
        .and_then(|mut terminal| run_app(&mut terminal, &mut app));

    screen::leave(&mut io::stdout()).context("failed to restore terminal")?;

    res.context("terminal event loop failed")?;
    info!(workouts = app.recorder.len(), "session ended");

    if config.dump_json {
        let json = app
            .recorder
            .to_json()
            .context("failed to serialize workouts")?;
        println!("{json}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Redraws the screen and dispatches key presses until the app asks to quit.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    while !app.should_quit {
        app.help_viewport = help_visible_height(terminal.size()?.height);
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                InputHandler::handle_key_event(app, key.code, key.modifiers);
            }
        }
    }
    Ok(())
}
