//! TUI (Terminal User Interface) runtime loop.
//!
//! This module contains the terminal setup, event loop, and teardown
//! logic for running the dashboard.

use std::io;
use std::time::Instant;

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::{debug, trace};

use crate::config::Settings;
use crate::input;
use crate::ui;

use super::App;

/// Sets up the terminal for TUI mode.
///
/// Enables raw mode and switches to the alternate screen buffer.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restores the terminal to its original state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Entry point for the dashboard.
///
/// Hardware detection runs before the terminal is touched so a fatal
/// startup error prints normally.
pub fn run_tui(settings: Settings) -> Result<()> {
    let app = App::new(settings)?;
    let mut terminal = setup_terminal()?;
    let result = run_tui_loop(&mut terminal, app);
    restore_terminal(&mut terminal)?;
    result
}

fn run_tui_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    let mut needs_redraw = true;
    let mut last_tick = Instant::now();

    loop {
        let now = Instant::now();
        if app.tick(now) {
            debug!(
                elapsed_ms = now.duration_since(last_tick).as_millis() as u64,
                tick_duration_ms = app.last_tick_duration().as_millis() as u64,
                "TUI tick completed"
            );
            last_tick = now;
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|frame| ui::render(frame, &app))?;
            needs_redraw = false;
        }

        let poll_timeout = app.time_until_next_tick(Instant::now());
        trace!(poll_ms = poll_timeout.as_millis() as u64, "Waiting for input");

        if event::poll(poll_timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let action = input::handle_key(&app, key);
                    if !app.handle_action(action) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }

        if app.is_terminated() {
            break;
        }
    }

    Ok(())
}
