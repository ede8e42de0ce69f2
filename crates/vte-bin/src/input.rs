//! crossterm event -> `core_events::InputEvent` translation.

use core_events::{
    InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::event::{
    Event as CEvent, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKeyEventKind,
    KeyModifiers as CKeyModifiers, MouseButton as CMouseButton, MouseEvent as CMouseEvent,
    MouseEventKind as CMouseEventKind,
};

/// Translate one terminal event. `None` for events the editor ignores
/// (key releases, focus changes, pastes, unsupported keys).
pub fn translate(event: &CEvent) -> Option<InputEvent> {
    match event {
        CEvent::Key(k) => map_key_event(k).map(InputEvent::Key),
        CEvent::Mouse(m) => map_mouse_event(m).map(InputEvent::Mouse),
        CEvent::Resize(cols, rows) => Some(InputEvent::Resize(*cols, *rows)),
        _ => None,
    }
}

fn map_key_event(event: &CKeyEvent) -> Option<KeyEvent> {
    if event.kind == CKeyEventKind::Release {
        return None;
    }
    let code = match event.code {
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::Tab | CKeyCode::BackTab => KeyCode::Tab,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::PageUp => KeyCode::PageUp,
        CKeyCode::PageDown => KeyCode::PageDown,
        _ => return None,
    };
    Some(KeyEvent::new(code, map_modifiers(event.modifiers)))
}

fn map_modifiers(mods: CKeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if mods.contains(CKeyModifiers::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if mods.contains(CKeyModifiers::ALT) {
        out |= KeyModifiers::ALT;
    }
    if mods.contains(CKeyModifiers::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}

fn map_button(b: CMouseButton) -> MouseButton {
    match b {
        CMouseButton::Left => MouseButton::Left,
        CMouseButton::Middle => MouseButton::Middle,
        CMouseButton::Right => MouseButton::Right,
    }
}

fn map_mouse_event(event: &CMouseEvent) -> Option<MouseEvent> {
    let kind = match event.kind {
        CMouseEventKind::Down(b) => MouseEventKind::Down(map_button(b)),
        CMouseEventKind::Up(b) => MouseEventKind::Up(map_button(b)),
        CMouseEventKind::Drag(b) => MouseEventKind::Drag(map_button(b)),
        CMouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
        CMouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
        CMouseEventKind::Moved => MouseEventKind::Moved,
        _ => return None,
    };
    Some(MouseEvent {
        kind,
        column: event.column,
        row: event.row,
    })
}
