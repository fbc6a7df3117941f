//! Action handling for App.

use tracing::info;

use super::types::{Action, AppView};
use super::App;

impl App {
    /// Applies a user action.
    ///
    /// Returns `false` if the application should quit, `true` otherwise.
    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => {
                info!("Quit requested");
                self.scheduler.request_quit();
                return false;
            }
            Action::ToggleHelp => self.view = self.view.toggle(AppView::Help),
            Action::ToggleInfo => self.view = self.view.toggle(AppView::Info),
            Action::CloseOverlay => self.view = AppView::Main,
            Action::None => {}
        }
        true
    }
}
