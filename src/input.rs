//! Terminal input mapping
//!
//! One jump per discrete press. Key releases and auto-repeat are ignored so a
//! held key does not jump every frame.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

/// What the input thread should do with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Jump,
    Quit,
}

/// Map a terminal event to a signal
pub fn classify(event: &Event) -> Option<Signal> {
    match event {
        Event::Key(key) => classify_key(key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(_) => Some(Signal::Jump),
            _ => None,
        },
        _ => None,
    }
}

fn classify_key(key: &KeyEvent) -> Option<Signal> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Signal::Quit),
        KeyCode::Esc | KeyCode::Char('q') => Some(Signal::Quit),
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => Some(Signal::Jump),
        _ => None,
    }
}
