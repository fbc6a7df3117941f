use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use crate::app::App;
use crate::theme::ThemeColors;

pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let (history, history_max): (&[f32], f32) = app
        .snapshot
        .as_ref()
        .map(|s| (s.history.as_slice(), s.history_max()))
        .unwrap_or_default();

    let current = history
        .last()
        .map(|w| format!("{:.1}W", w))
        .unwrap_or_default();

    let title_line = Line::from(vec![
        Span::styled(
            " History ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(current, theme.fg_style()),
        Span::styled(
            format!(" (last {} samples) ", app.settings.history_capacity),
            theme.muted_style(),
        ),
    ]);

    let block = Block::default()
        .title(title_line)
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .style(Style::default().bg(theme.bg));

    if history.is_empty() {
        frame.render_widget(block, area);
        return;
    }

    let data = chart_points(history);
    let max_y = axis_max(history_max);
    let max_x = app.settings.history_capacity.max(history.len()) as f64;

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.graph_style())
        .data(&data);

    let x_labels = vec![
        Span::styled("oldest", theme.muted_style()),
        Span::styled("now", theme.muted_style()),
    ];
    let y_labels = vec![
        Span::styled("0", theme.muted_style()),
        Span::styled(format!("{:.0}", max_y / 2.0), theme.muted_style()),
        Span::styled(format!("{:.0}", max_y), theme.muted_style()),
    ];

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme.muted_style())
                .bounds([0.0, max_x])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme.muted_style())
                .bounds([0.0, max_y])
                .labels(y_labels),
        )
        .style(Style::default().bg(theme.bg));

    frame.render_widget(chart, area);
}

fn chart_points(history: &[f32]) -> Vec<(f64, f64)> {
    history
        .iter()
        .enumerate()
        .map(|(i, w)| (i as f64, *w as f64))
        .collect()
}

/// Upper bound of the y axis: the buffer maximum, never zero.
fn axis_max(history_max: f32) -> f64 {
    if history_max > 0.0 {
        history_max as f64
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_points_are_oldest_first() {
        let points = chart_points(&[10.0, 20.0, 15.0]);
        assert_eq!(points, vec![(0.0, 10.0), (1.0, 20.0), (2.0, 15.0)]);
    }

    #[test]
    fn test_axis_scales_to_buffer_max() {
        assert_eq!(axis_max(250.0), 250.0);
        assert_eq!(axis_max(0.0), 1.0);
    }
}
