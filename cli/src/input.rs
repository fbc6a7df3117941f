use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{Action, App, AppView};

pub mod keys {
    pub const HELP: &str = "?";
    pub const INFO: &str = "i";
    pub const QUIT: &str = "q";
    pub const ESC: &str = "Esc";
    pub const CTRL_C: &str = "Ctrl+C";
}

pub fn handle_key(app: &App, key: KeyEvent) -> Action {
    handle_view_key(app.view, key)
}

fn handle_view_key(view: AppView, key: KeyEvent) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match view {
        AppView::Main => handle_main_keys(key),
        AppView::Help => handle_help_keys(key),
        AppView::Info => handle_info_keys(key),
    }
}

fn handle_main_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('?') | KeyCode::Char('/') => Action::ToggleHelp,
        KeyCode::Char('i') | KeyCode::Char('h') => Action::ToggleInfo,
        _ => Action::None,
    }
}

fn handle_help_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Action::CloseOverlay,
        KeyCode::Char('?') | KeyCode::Char('/') => Action::ToggleHelp,
        KeyCode::Char('i') | KeyCode::Char('h') => Action::ToggleInfo,
        _ => Action::None,
    }
}

fn handle_info_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Action::CloseOverlay,
        KeyCode::Char('i') | KeyCode::Char('h') => Action::ToggleInfo,
        KeyCode::Char('?') | KeyCode::Char('/') => Action::ToggleHelp,
        _ => Action::None,
    }
}

pub struct KeyBinding {
    pub key: &'static str,
    pub description: &'static str,
}

pub const KEY_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: keys::INFO,
        description: "Toggle hardware info",
    },
    KeyBinding {
        key: keys::HELP,
        description: "Toggle this help",
    },
    KeyBinding {
        key: keys::ESC,
        description: "Close overlay / Quit",
    },
    KeyBinding {
        key: keys::QUIT,
        description: "Quit",
    },
    KeyBinding {
        key: keys::CTRL_C,
        description: "Quit from anywhere",
    },
];
