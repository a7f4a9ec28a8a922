//! Crossterm key events to controller intents.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::controller::Intent;

/// Translate a key event into an [`Intent`].
///
/// Returns `None` for keys the control does not react to (Esc, Tab, function
/// keys, Ctrl/Alt chords) and for release events.
pub fn intent_for_key(key: KeyEvent) -> Option<Intent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Left => Some(Intent::ArrowLeft),
        KeyCode::Right => Some(Intent::ArrowRight),
        KeyCode::Up => Some(Intent::ArrowUp),
        KeyCode::Down => Some(Intent::ArrowDown),
        KeyCode::Enter => Some(Intent::Enter),
        KeyCode::Backspace => Some(Intent::Backspace),
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(Intent::Type(c.to_string()))
        }
        _ => None,
    }
}

/// Key hints for the control, as (key_label, description).
pub fn key_hints() -> Vec<(&'static str, &'static str)> {
    vec![
        ("←→", "Move between tokens"),
        ("↑↓", "Highlight"),
        ("Enter", "Add"),
        ("Backspace", "Remove"),
    ]
}
