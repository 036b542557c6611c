use crate::engine::key::ESCAPE;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Translate a terminal key event into the interpreter's key vocabulary.
/// Chords with control-style modifiers belong to the harness, not the
/// interpreter, so they come back as None.
pub fn translate(event: &KeyEvent) -> Option<String> {
    if event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
    {
        return None;
    }
    match event.code {
        KeyCode::Esc => Some(ESCAPE.to_string()),
        KeyCode::Char(c) => Some(c.to_string()),
        _ => None,
    }
}
