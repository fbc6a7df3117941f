use pwrwatch_protocol::{ComponentKind, Snapshot};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::app::App;
use crate::theme::ThemeColors;

use super::utils::format_watts;

pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let block = Block::default()
        .title(Span::styled(
            " Components ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .style(Style::default().bg(theme.bg));

    let header = Row::new(["Component", "Power", "Usage", "Share"])
        .style(theme.highlight_style().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = match &app.snapshot {
        Some(snapshot) => ComponentKind::ALL
            .iter()
            .map(|kind| component_row(snapshot, *kind, theme))
            .collect(),
        None => Vec::new(),
    };

    let widths = [
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Min(8),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn component_row<'a>(snapshot: &Snapshot, kind: ComponentKind, theme: &ThemeColors) -> Row<'a> {
    let (watts, usage) = match snapshot.component(kind) {
        Some(power) => (
            format_watts(power.power_watts),
            if kind.is_fixed_overhead() {
                "-".to_string()
            } else {
                format!("{:.0}%", power.usage_percent)
            },
        ),
        None => ("-".to_string(), "-".to_string()),
    };
    let share = format!("{:.1}%", snapshot.share_percent(kind));

    let label_style = if kind.is_fixed_overhead() {
        theme.muted_style()
    } else {
        theme.fg_style()
    };

    Row::new(vec![
        Cell::from(kind.label()).style(label_style),
        Cell::from(watts).style(theme.fg_style()),
        Cell::from(usage).style(theme.muted_style()),
        Cell::from(share).style(theme.muted_style()),
    ])
}
