use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::input::keys;
use crate::theme::ThemeColors;

use super::utils::format_duration;

pub fn render_title_bar(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let version = super::VERSION;
    let profile = app.profile();

    let left_spans = vec![
        Span::styled("⚡pwrwatch ", Style::default().fg(theme.accent)),
        Span::styled(format!("v{}", version), Style::default().fg(theme.muted)),
    ];

    let right_text = format!("{} · {} ", profile.cpu.name, profile.gpu.name);

    let left_width: usize = left_spans.iter().map(|s| s.width()).sum();
    let right_width = right_text.chars().count();
    let padding = (area.width as usize).saturating_sub(left_width + right_width);

    let mut spans = left_spans;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(right_text, Style::default().fg(theme.muted)));

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.bg));
    frame.render_widget(bar, area);
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let hints: &[(&str, &str)] = if app.view.is_overlay() {
        &[(keys::ESC, "close"), (keys::CTRL_C, "quit")]
    } else {
        &[(keys::HELP, "help"), (keys::INFO, "info"), (keys::QUIT, "quit")]
    };

    let mut left_spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            left_spans.push(Span::styled(" │ ", Style::default().fg(theme.border)));
        }
        left_spans.push(Span::styled(*key, Style::default().fg(theme.accent)));
        left_spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(theme.muted),
        ));
    }

    let tick = app.snapshot.as_ref().map(|s| s.tick).unwrap_or(0);
    let notify = if app.settings.notifications {
        "alerts on"
    } else {
        "alerts off"
    };
    let right_text = format!(
        "every {} · {} ({:.0} W) · tick {} ",
        format_duration(app.settings.tick_period()),
        notify,
        app.settings.alert_watts,
        tick
    );

    let left_width: usize = left_spans.iter().map(|s| s.width()).sum();
    let right_width = right_text.chars().count();
    let padding = (area.width as usize).saturating_sub(left_width + right_width);

    let mut spans = left_spans;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(right_text, Style::default().fg(theme.muted)));

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.bg));
    frame.render_widget(bar, area);
}
