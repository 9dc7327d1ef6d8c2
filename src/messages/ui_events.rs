//! UI events - messages from UI layer to App layer

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    // Navigation
    Up,
    Down,
    Confirm,
    Back,

    // Day entry
    Digit(char),
    Backspace,

    // Table actions
    Export,

    // Destination dialog answered; `None` when dismissed
    Picked { id: u64, path: Option<PathBuf> },

    // System
    Quit,
}

/// Convert a key event to a UiEvent.
///
/// The mapping does not depend on the current screen; the app decides
/// what each event means where it lands.
pub fn key_to_ui_event(key: KeyEvent) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(UiEvent::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('e') => Some(UiEvent::Export),
        KeyCode::Char(c) if c.is_ascii_digit() => Some(UiEvent::Digit(c)),
        KeyCode::Enter => Some(UiEvent::Confirm),
        KeyCode::Esc => Some(UiEvent::Back),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Up => Some(UiEvent::Up),
        KeyCode::Down => Some(UiEvent::Down),
        _ => None,
    }
}
