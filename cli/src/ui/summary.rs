use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::theme::ThemeColors;

use super::utils::format_watts;

pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let block = Block::default()
        .title(Span::styled(
            " Power ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .style(Style::default().bg(theme.bg));

    let Some(snapshot) = &app.snapshot else {
        let waiting = Paragraph::new(Line::from(Span::styled(
            "Sampling hardware...",
            theme.muted_style(),
        )))
        .block(block);
        frame.render_widget(waiting, area);
        return;
    };

    let total_style = if snapshot.over_threshold {
        theme.danger_style().add_modifier(Modifier::BOLD)
    } else {
        theme.accent_style().add_modifier(Modifier::BOLD)
    };

    let mut headline = vec![
        Span::styled("Total ", theme.muted_style()),
        Span::styled(format_watts(snapshot.total_power_watts), total_style),
        Span::styled(
            format!("  ({})", snapshot.total_source.label()),
            theme.muted_style(),
        ),
    ];
    if snapshot.over_threshold {
        headline.push(Span::styled(
            format!("  above {:.0} W alert", app.settings.alert_watts),
            theme.danger_style(),
        ));
    }

    let average = snapshot
        .history_average()
        .map(format_watts)
        .unwrap_or_else(|| "-".to_string());

    let details = Line::from(vec![
        Span::styled("Run time ", theme.muted_style()),
        Span::styled(snapshot.run_time_formatted(), theme.fg_style()),
        Span::styled("   Energy ", theme.muted_style()),
        Span::styled(format!("{:.3} kWh", snapshot.energy_kwh()), theme.fg_style()),
        Span::styled("   Avg ", theme.muted_style()),
        Span::styled(average, theme.fg_style()),
    ]);

    let paragraph = Paragraph::new(vec![Line::from(headline), details]).block(block);
    frame.render_widget(paragraph, area);
}
