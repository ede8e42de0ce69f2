//! Normal mode key table and transitions into the other modes.
//!
//! Entering Insert seeds a `LineEdit` from the cursor line; entering Command
//! or Search starts an empty prompt. The previous status message is cleared
//! on every transition out of Normal.

use super::{DispatchResult, Editor, ModeState, motion, search, undo};
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_text::LineEdit;
use core_text::utf8::next_boundary;
use tracing::trace;

pub(super) fn handle_normal_key(ed: &mut Editor, key: KeyEvent) -> DispatchResult {
    if key.mods.contains(KeyModifiers::CTRL) {
        return match key.code {
            KeyCode::Char('r') => undo::handle_redo(ed),
            _ => DispatchResult::clean(),
        };
    }
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => motion::left(ed),
        KeyCode::Char('l') | KeyCode::Right => motion::right(ed),
        KeyCode::Char('k') | KeyCode::Up => motion::up(ed, 1),
        KeyCode::Char('j') | KeyCode::Down => motion::down(ed, 1),
        KeyCode::Char('0') | KeyCode::Home => motion::line_start(ed),
        KeyCode::Char('$') | KeyCode::End => motion::line_end(ed),
        KeyCode::PageUp => motion::page_up(ed),
        KeyCode::PageDown => motion::page_down(ed),
        KeyCode::Char('i') => enter_insert(ed, false),
        KeyCode::Char('a') => enter_insert(ed, true),
        KeyCode::Char('x') => delete_under_cursor(ed),
        KeyCode::Char('u') => undo::handle_undo(ed),
        KeyCode::Char(':') => enter_prompt(ed, false),
        KeyCode::Char('/') => enter_prompt(ed, true),
        KeyCode::Char('n') => search::repeat(ed, true),
        KeyCode::Char('N') => search::repeat(ed, false),
        _ => DispatchResult::clean(),
    }
}

/// Start a line-edit session on the cursor line (after the cursor codepoint
/// when `append`).
fn enter_insert(ed: &mut Editor, append: bool) -> DispatchResult {
    let (buffer, view) = ed.parts();
    let text = buffer.line(view.cursor.line).unwrap_or_default();
    if append {
        view.cursor.byte = next_boundary(text, view.cursor.byte);
    }
    let session = LineEdit::begin_at(text, view.cursor.byte);
    view.cursor.byte = session.cursor();
    trace!(target: "actions.dispatch", line = view.cursor.line, byte = view.cursor.byte, "enter_insert");
    ed.status.clear();
    ed.mode = ModeState::Insert(session);
    DispatchResult::dirty()
}

fn enter_prompt(ed: &mut Editor, search: bool) -> DispatchResult {
    ed.status.clear();
    let prompt = LineEdit::default();
    ed.mode = if search {
        ModeState::Search(prompt)
    } else {
        ModeState::Command(prompt)
    };
    DispatchResult::dirty()
}

fn delete_under_cursor(ed: &mut Editor) -> DispatchResult {
    let (buffer, view) = ed.parts();
    match buffer.delete_char_at(view.cursor) {
        Some(_) => {
            view.cursor = buffer.clamp(view.cursor);
            DispatchResult::dirty()
        }
        None => DispatchResult::clean(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::EditorConfig;
    use core_state::{Buffer, Mode};
    use core_text::Position;

    fn editor(lines: &[&str]) -> Editor {
        Editor::with_buffer(
            Buffer::from_lines(lines.iter().copied()),
            EditorConfig::default(),
            40,
            10,
        )
    }

    fn press(ed: &mut Editor, c: char) {
        ed.handle(core_events::InputEvent::Key(KeyCode::Char(c).into()));
    }

    #[test]
    fn insert_keeps_cursor_and_append_moves_past_it() {
        let mut ed = editor(&["héllo"]);
        press(&mut ed, 'l');
        press(&mut ed, 'i');
        assert_eq!(ed.mode(), Mode::Insert);
        assert_eq!(ed.cursor(), Position::new(0, 1));
        ed.handle(core_events::InputEvent::Key(KeyCode::Esc.into()));
        press(&mut ed, 'a');
        assert_eq!(ed.cursor(), Position::new(0, 3));
    }

    #[test]
    fn x_deletes_codepoint_and_records_it() {
        let mut ed = editor(&["a世b"]);
        press(&mut ed, 'l');
        press(&mut ed, 'x');
        assert_eq!(ed.buffer().line(0), Some("ab"));
        assert!(ed.buffer().is_dirty());
        assert_eq!(ed.buffer().history().undo_depth(), 1);
        press(&mut ed, 'u');
        assert_eq!(ed.buffer().line(0), Some("a世b"));
    }

    #[test]
    fn x_at_end_of_line_clamps_cursor() {
        let mut ed = editor(&["ab"]);
        press(&mut ed, '$');
        press(&mut ed, 'x');
        assert_eq!(ed.buffer().line(0), Some("ab"));
        press(&mut ed, 'h');
        press(&mut ed, 'x');
        assert_eq!(ed.buffer().line(0), Some("a"));
        assert_eq!(ed.cursor(), Position::new(0, 1));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut ed = editor(&["ab"]);
        let r = ed.handle(core_events::InputEvent::Key(KeyCode::Char('z').into()));
        assert!(!r.dirty);
        assert_eq!(ed.mode(), Mode::Normal);
    }
}
