#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{DispatchResult, Editor};
use core_config::EditorConfig;
use core_events::{InputEvent, KeyCode, KeyEvent, MouseEvent};
use core_state::Buffer;

pub fn editor(lines: &[&str]) -> Editor {
    editor_sized(lines, 80, 24)
}

pub fn editor_sized(lines: &[&str], cols: u16, rows: u16) -> Editor {
    Editor::with_buffer(
        Buffer::from_lines(lines.iter().copied()),
        EditorConfig::default(),
        cols,
        rows,
    )
}

pub fn key(ed: &mut Editor, code: KeyCode) -> DispatchResult {
    ed.handle(InputEvent::Key(KeyEvent::plain(code)))
}

pub fn ctrl(ed: &mut Editor, c: char) -> DispatchResult {
    ed.handle(InputEvent::Key(KeyEvent::ctrl(c)))
}

pub fn click(ed: &mut Editor, column: u16, row: u16) -> DispatchResult {
    ed.handle(InputEvent::Mouse(MouseEvent::left_click(column, row)))
}

/// Send every character of `text` as a plain key press.
pub fn typed(ed: &mut Editor, text: &str) {
    for c in text.chars() {
        key(ed, KeyCode::Char(c));
    }
}

/// Run `:cmd` from Normal mode.
pub fn command(ed: &mut Editor, cmd: &str) -> DispatchResult {
    key(ed, KeyCode::Char(':'));
    typed(ed, cmd);
    key(ed, KeyCode::Enter)
}

/// Run `/pattern` from Normal mode.
pub fn search(ed: &mut Editor, pattern: &str) -> DispatchResult {
    key(ed, KeyCode::Char('/'));
    typed(ed, pattern);
    key(ed, KeyCode::Enter)
}

/// Lines as the user sees them (live session text included).
pub fn lines(ed: &Editor) -> Vec<String> {
    (0..ed.buffer().line_count())
        .filter_map(|i| ed.line_text(i).map(str::to_string))
        .collect()
}

/// Lines as stored in the buffer.
pub fn buffer_lines(ed: &Editor) -> Vec<String> {
    ed.buffer().lines().map(str::to_string).collect()
}
