//! Cursor movement in Normal mode.
//!
//! Horizontal moves step one codepoint. Vertical moves keep the byte offset
//! when it still fits, otherwise clamp to the target line length, and always
//! floor to a codepoint boundary.

use super::{DispatchResult, Editor};
use core_text::utf8::{next_boundary, prev_boundary};

fn moved(changed: bool) -> DispatchResult {
    if changed {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

pub(super) fn left(ed: &mut Editor) -> DispatchResult {
    let (buffer, view) = ed.parts();
    let text = buffer.line(view.cursor.line).unwrap_or_default();
    let before = view.cursor.byte;
    view.cursor.byte = prev_boundary(text, before);
    moved(view.cursor.byte != before)
}

pub(super) fn right(ed: &mut Editor) -> DispatchResult {
    let (buffer, view) = ed.parts();
    let text = buffer.line(view.cursor.line).unwrap_or_default();
    let before = view.cursor.byte;
    view.cursor.byte = next_boundary(text, before);
    moved(view.cursor.byte != before)
}

pub(super) fn up(ed: &mut Editor, count: usize) -> DispatchResult {
    let (buffer, view) = ed.parts();
    let before = view.cursor;
    view.cursor.line = view.cursor.line.saturating_sub(count);
    view.cursor = buffer.clamp(view.cursor);
    moved(view.cursor != before)
}

pub(super) fn down(ed: &mut Editor, count: usize) -> DispatchResult {
    let (buffer, view) = ed.parts();
    let before = view.cursor;
    let last = buffer.line_count().saturating_sub(1);
    view.cursor.line = (view.cursor.line + count).min(last);
    view.cursor = buffer.clamp(view.cursor);
    moved(view.cursor != before)
}

pub(super) fn line_start(ed: &mut Editor) -> DispatchResult {
    let view = ed.view_mut();
    let before = view.cursor.byte;
    view.cursor.byte = 0;
    moved(before != 0)
}

pub(super) fn line_end(ed: &mut Editor) -> DispatchResult {
    let (buffer, view) = ed.parts();
    let before = view.cursor.byte;
    view.cursor.byte = buffer.line_len(view.cursor.line);
    moved(view.cursor.byte != before)
}

/// One screen of text rows, keeping a line of overlap.
fn page_lines(ed: &Editor) -> usize {
    ed.layout.text_rows.saturating_sub(1).max(1)
}

pub(super) fn page_up(ed: &mut Editor) -> DispatchResult {
    let n = page_lines(ed);
    up(ed, n)
}

pub(super) fn page_down(ed: &mut Editor) -> DispatchResult {
    let n = page_lines(ed);
    down(ed, n)
}
