//! Undo / redo dispatch against the current buffer's history.

use super::{DispatchResult, Editor};

pub(super) fn handle_undo(ed: &mut Editor) -> DispatchResult {
    let (buffer, view) = ed.parts();
    let before = buffer.line_count();
    match buffer.undo() {
        Some(cursor) => {
            view.cursor = cursor;
            tracing::trace!(target: "actions.dispatch", op = "undo", lines_changed = (before != buffer.line_count()), "undo");
            DispatchResult::dirty()
        }
        None => {
            ed.status = "Already at oldest change".to_string();
            DispatchResult::dirty()
        }
    }
}

pub(super) fn handle_redo(ed: &mut Editor) -> DispatchResult {
    let (buffer, view) = ed.parts();
    let before = buffer.line_count();
    match buffer.redo() {
        Some(cursor) => {
            view.cursor = cursor;
            tracing::trace!(target: "actions.dispatch", op = "redo", lines_changed = (before != buffer.line_count()), "redo");
            DispatchResult::dirty()
        }
        None => {
            ed.status = "Already at newest change".to_string();
            DispatchResult::dirty()
        }
    }
}
