//! Insert mode: the cursor line lives in a `LineEdit` session.
//!
//! Character edits mutate only the session and are recorded as
//! `InsertChar` / `DeleteChar` against the buffer's history. The buffer copy
//! of the line is refreshed on commit: Esc, line breaks, joins and vertical
//! moves. Limit rejections leave everything unchanged and are only logged.

use super::{DispatchResult, Editor, ModeState};
use core_events::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use core_state::{Buffer, UndoAction};
use core_text::{LineEdit, Position};
use tracing::{debug, error, trace};

pub(super) fn handle_insert_key(
    ed: &mut Editor,
    mut session: LineEdit,
    key: KeyEvent,
) -> DispatchResult {
    let line = ed.cursor().line;
    let result = match key.code {
        KeyCode::Esc => {
            commit(ed, session);
            trace!(target: "actions.dispatch", line, "leave_insert");
            return DispatchResult::dirty();
        }
        KeyCode::Char(c) if !key.mods.contains(KeyModifiers::CTRL) && !c.is_control() => {
            let mut utf8 = [0u8; 4];
            insert_text(ed.pool.current_mut(), &mut session, line, c.encode_utf8(&mut utf8))
        }
        KeyCode::Tab => {
            let tab = ed.config.tab_text();
            insert_text(ed.pool.current_mut(), &mut session, line, &tab)
        }
        KeyCode::Backspace if session.cursor() > 0 => {
            delete_char(ed.pool.current_mut(), &mut session, line, true)
        }
        KeyCode::Backspace if line > 0 => {
            session = join_with_previous(ed, session, line);
            DispatchResult::dirty()
        }
        KeyCode::Delete if session.cursor() < session.len() => {
            delete_char(ed.pool.current_mut(), &mut session, line, false)
        }
        KeyCode::Delete if line + 1 < ed.buffer().line_count() => {
            session = join_with_next(ed, session, line);
            DispatchResult::dirty()
        }
        KeyCode::Enter => {
            session = break_line(ed, session, line);
            DispatchResult::dirty()
        }
        KeyCode::Left => {
            session.move_left();
            DispatchResult::dirty()
        }
        KeyCode::Right => {
            session.move_right();
            DispatchResult::dirty()
        }
        KeyCode::Home => {
            session.home();
            DispatchResult::dirty()
        }
        KeyCode::End => {
            session.end();
            DispatchResult::dirty()
        }
        KeyCode::Up if line > 0 => {
            session = move_vertically(ed, session, line - 1);
            DispatchResult::dirty()
        }
        KeyCode::Down if line + 1 < ed.buffer().line_count() => {
            session = move_vertically(ed, session, line + 1);
            DispatchResult::dirty()
        }
        _ => DispatchResult::clean(),
    };
    ed.view_mut().cursor.byte = session.cursor();
    ed.mode = ModeState::Insert(session);
    result
}

/// Left click: commit, move, re-begin at the clicked coordinate.
pub(super) fn handle_insert_click(ed: &mut Editor, session: LineEdit, m: MouseEvent) -> DispatchResult {
    let line = ed.cursor().line;
    ed.pool.current_mut().commit_line(line, session.commit());
    let result = match ed.map_click(m) {
        Some(pos) => {
            ed.view_mut().cursor = pos;
            DispatchResult::dirty()
        }
        None => DispatchResult::clean(),
    };
    let session = begin_at_cursor(ed);
    ed.mode = ModeState::Insert(session);
    result
}

/// Store the session text and return to Normal.
fn commit(ed: &mut Editor, session: LineEdit) {
    let (buffer, view) = ed.parts();
    view.cursor.byte = session.cursor();
    buffer.commit_line(view.cursor.line, session.commit());
    ed.mode = ModeState::Normal;
}

fn begin_at_cursor(ed: &mut Editor) -> LineEdit {
    let (buffer, view) = ed.parts();
    view.cursor = buffer.clamp(view.cursor);
    let session = LineEdit::begin_at(buffer.line(view.cursor.line).unwrap_or_default(), view.cursor.byte);
    view.cursor.byte = session.cursor();
    session
}

fn insert_text(buffer: &mut Buffer, session: &mut LineEdit, line: usize, text: &str) -> DispatchResult {
    let pos = session.cursor();
    if !session.insert_str(text) {
        debug!(target: "actions.dispatch", line, len = session.len(), "insert_rejected_at_line_limit");
        return DispatchResult::clean();
    }
    buffer.record(UndoAction::InsertChar {
        line,
        pos,
        text: text.to_string(),
    });
    DispatchResult::dirty()
}

/// Backspace (`before`) or Delete inside the session.
fn delete_char(buffer: &mut Buffer, session: &mut LineEdit, line: usize, before: bool) -> DispatchResult {
    let removed = if before {
        session.char_before().filter(|_| session.backspace())
    } else {
        session.char_after().filter(|_| session.delete())
    };
    let Some(c) = removed else {
        return DispatchResult::clean();
    };
    buffer.record(UndoAction::DeleteChar {
        line,
        pos: session.cursor(),
        text: c.to_string(),
    });
    DispatchResult::dirty()
}

/// Enter: split at the cursor, continue on the new line at column 0.
fn break_line(ed: &mut Editor, mut session: LineEdit, line: usize) -> LineEdit {
    if !ed.buffer().can_insert_line() {
        debug!(target: "actions.dispatch", line, "line_break_rejected_at_document_limit");
        return session;
    }
    let right = session.split();
    let left = session.commit();
    let (buffer, view) = ed.parts();
    match buffer.break_line(line, left, right) {
        Ok(()) => view.cursor = Position::new(line + 1, 0),
        Err(e) => error!(target: "actions.dispatch", line, error = %e, "break_line_failed"),
    }
    begin_at_cursor(ed)
}

/// Backspace at column 0: append this line to the previous one.
fn join_with_previous(ed: &mut Editor, session: LineEdit, line: usize) -> LineEdit {
    let (buffer, view) = ed.parts();
    buffer.commit_line(line, session.commit());
    let join_at = buffer.line_len(line - 1);
    match buffer.join_lines(line - 1) {
        Ok(()) => view.cursor = Position::new(line - 1, join_at),
        Err(e) => {
            debug!(target: "actions.dispatch", line, error = %e, "join_rejected");
            view.cursor = Position::new(line, 0);
        }
    }
    begin_at_cursor(ed)
}

/// Delete at end of line: pull the next line up.
fn join_with_next(ed: &mut Editor, session: LineEdit, line: usize) -> LineEdit {
    let (buffer, view) = ed.parts();
    view.cursor.byte = session.cursor();
    buffer.commit_line(line, session.commit());
    if let Err(e) = buffer.join_lines(line) {
        debug!(target: "actions.dispatch", line, error = %e, "join_rejected");
    }
    begin_at_cursor(ed)
}

fn move_vertically(ed: &mut Editor, session: LineEdit, target: usize) -> LineEdit {
    let (buffer, view) = ed.parts();
    let byte = session.cursor();
    buffer.commit_line(view.cursor.line, session.commit());
    view.cursor = Position::new(target, byte);
    begin_at_cursor(ed)
}
