//! Core types for the TUI application.

/// Actions that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleHelp,
    ToggleInfo,
    CloseOverlay,
    None,
}

/// Which screen is in front of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    #[default]
    Main,
    Help,
    Info,
}

impl AppView {
    /// Opens `target`, or returns to the dashboard if it is already open.
    pub fn toggle(self, target: AppView) -> Self {
        if self == target {
            AppView::Main
        } else {
            target
        }
    }

    pub fn is_overlay(self) -> bool {
        self != AppView::Main
    }
}

/// Telemetry sources wired on this machine, in fallback order.
#[derive(Debug, Clone, Default)]
pub struct SourceSummary {
    pub gpu_load: Vec<&'static str>,
    pub cpu_watts: Vec<&'static str>,
    pub gpu_watts: Vec<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_opens_and_closes() {
        assert_eq!(AppView::Main.toggle(AppView::Info), AppView::Info);
        assert_eq!(AppView::Info.toggle(AppView::Info), AppView::Main);
        assert_eq!(AppView::Help.toggle(AppView::Info), AppView::Info);
    }

    #[test]
    fn test_overlay() {
        assert!(!AppView::Main.is_overlay());
        assert!(AppView::Help.is_overlay());
    }
}
