use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::input::KEY_BINDINGS;
use crate::theme::ThemeColors;
use crate::ui::VERSION;

use super::utils::{centered_rect, format_bytes};

pub fn render_help(frame: &mut Frame, theme: &ThemeColors) {
    let content_height = KEY_BINDINGS.len() as u16 + 9;
    let area = centered_rect(frame.area(), 50, content_height);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.dialog_bg));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .margin(1)
        .split(inner);

    let title = Paragraph::new(Line::from(Span::styled(
        "pwrwatch - Whole-System Power Monitor",
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )))
    .centered();
    frame.render_widget(title, chunks[0]);

    let mut lines: Vec<Line> = KEY_BINDINGS
        .iter()
        .map(|binding| {
            Line::from(vec![
                Span::styled(
                    format!("{:15}", binding.key),
                    Style::default()
                        .fg(theme.highlight)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(binding.description, Style::default().fg(theme.fg)),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Figures are estimates unless a sensor reports real watts.",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[1]);
}

pub fn render_info(frame: &mut Frame, app: &App, theme: &ThemeColors) {
    let lines = info_lines(app, theme);
    let area = centered_rect(frame.area(), 70, lines.len() as u16 + 4);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Hardware ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.dialog_bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn section<'a>(title: &'a str, theme: &ThemeColors) -> Line<'a> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    ))
}

fn field<'a>(label: &'a str, value: String, theme: &ThemeColors) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {:12}", label), Style::default().fg(theme.highlight)),
        Span::styled(value, Style::default().fg(theme.fg)),
    ])
}

fn info_lines<'a>(app: &'a App, theme: &ThemeColors) -> Vec<Line<'a>> {
    let profile = app.profile();
    let mut lines = Vec::new();

    lines.push(section("Processor", theme));
    lines.push(field("Name", profile.cpu.name.clone(), theme));
    lines.push(field(
        "Cores",
        format!("{} cores / {} threads", profile.cpu.cores, profile.cpu.threads),
        theme,
    ));
    lines.push(field(
        "TDP class",
        format!(
            "{:.0} W base, {:.0} W max",
            profile.cpu.tdp.base_watts, profile.cpu.tdp.max_watts
        ),
        theme,
    ));

    lines.push(section("Graphics", theme));
    lines.push(field("Name", profile.gpu.name.clone(), theme));
    lines.push(field(
        "Type",
        if profile.gpu.integrated {
            "Integrated".to_string()
        } else {
            "Discrete".to_string()
        },
        theme,
    ));
    lines.push(field("TDP", format!("{:.0} W", profile.gpu.tdp_watts), theme));

    lines.push(section("Memory & Storage", theme));
    lines.push(field("RAM", format!("{:.1} GB", profile.ram_total_gb), theme));
    for disk in &profile.disks {
        lines.push(field(
            disk.kind.label(),
            format!(
                "{} on {} ({})",
                disk.device,
                disk.mount_point.display(),
                format_bytes(disk.total_bytes)
            ),
            theme,
        ));
    }
    lines.push(field("Battery", profile.battery_summary(), theme));

    lines.push(section("Telemetry", theme));
    lines.push(field("GPU load", join_or_none(&app.sources.gpu_load), theme));
    lines.push(field("CPU watts", join_or_none(&app.sources.cpu_watts), theme));
    lines.push(field("GPU watts", join_or_none(&app.sources.gpu_watts), theme));

    if let Some(snapshot) = &app.snapshot {
        let sensors = &snapshot.sensors;
        if !sensors.temperatures.is_empty() || !sensors.fans.is_empty() {
            lines.push(section("Sensors", theme));
        }
        for reading in &sensors.temperatures {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {:24}", reading.label),
                    Style::default().fg(theme.highlight),
                ),
                Span::styled(
                    format!("{:.1} °C", reading.value),
                    Style::default().fg(theme.fg),
                ),
            ]));
        }
        for reading in &sensors.fans {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {:24}", reading.label),
                    Style::default().fg(theme.highlight),
                ),
                Span::styled(
                    format!("{:.0} RPM", reading.value),
                    Style::default().fg(theme.fg),
                ),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("pwrwatch v{}", VERSION),
        Style::default().fg(theme.muted),
    )));

    lines
}

fn join_or_none(names: &[&str]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(" → ")
    }
}
