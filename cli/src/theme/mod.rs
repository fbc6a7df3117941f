// Built-in dashboard palette.

use ratatui::style::{Color, Style};

#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    pub bg: Color,
    pub dialog_bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub highlight: Color,
    pub muted: Color,
    pub danger: Color,
    pub border: Color,
    pub graph_line: Color,
}

impl ThemeColors {
    pub const fn dark() -> Self {
        Self {
            bg: Color::Rgb(22, 24, 29),
            dialog_bg: Color::Rgb(32, 35, 42),
            fg: Color::Rgb(220, 223, 228),
            accent: Color::Rgb(250, 204, 21),
            highlight: Color::Rgb(125, 207, 255),
            muted: Color::Rgb(128, 134, 148),
            danger: Color::Rgb(248, 113, 113),
            border: Color::Rgb(64, 70, 82),
            graph_line: Color::Rgb(96, 165, 250),
        }
    }

    #[inline]
    pub fn fg_style(&self) -> Style {
        Style::default().fg(self.fg)
    }

    #[inline]
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    #[inline]
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    #[inline]
    pub fn highlight_style(&self) -> Style {
        Style::default().fg(self.highlight)
    }

    #[inline]
    pub fn danger_style(&self) -> Style {
        Style::default().fg(self.danger)
    }

    #[inline]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    #[inline]
    pub fn graph_style(&self) -> Style {
        Style::default().fg(self.graph_line)
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self::dark()
    }
}
