mod components;
mod graphs;
mod help;
mod status_bar;
mod summary;
mod utils;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, AppView};

pub use utils::format_bytes;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const SUMMARY_HEIGHT: u16 = 4;
// Eight component rows, a header row, and borders.
const COMPONENTS_HEIGHT: u16 = 11;
const CHART_MIN: u16 = 6;

pub fn render(frame: &mut Frame, app: &App) {
    let theme = app.current_theme();
    let area = frame.area();

    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(area);

    status_bar::render_title_bar(frame, outer_chunks[0], app, &theme);
    status_bar::render_status_bar(frame, outer_chunks[2], app, &theme);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SUMMARY_HEIGHT),
            Constraint::Length(COMPONENTS_HEIGHT),
            Constraint::Min(CHART_MIN),
        ])
        .split(outer_chunks[1]);

    summary::render(frame, chunks[0], app, &theme);
    components::render(frame, chunks[1], app, &theme);
    graphs::render(frame, chunks[2], app, &theme);

    match app.view {
        AppView::Help => help::render_help(frame, &theme),
        AppView::Info => help::render_info(frame, app, &theme),
        AppView::Main => {}
    }
}
