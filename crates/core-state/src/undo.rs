use core_text::Position;
use std::collections::VecDeque;
use tracing::trace;

/// Maximum number of actions retained in undo history.
pub const UNDO_HISTORY_MAX: usize = 1000;

/// A recorded mutation, carrying enough payload to apply it again or revert it.
///
/// `line` is always the index of the line the mutation touched first; for the
/// two structural variants it names the upper of the two lines involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoAction {
    /// `text` was inserted at byte `pos`.
    InsertChar {
        line: usize,
        pos: usize,
        text: String,
    },
    /// `text` was removed from byte `pos`.
    DeleteChar {
        line: usize,
        pos: usize,
        text: String,
    },
    /// Line `line` was split into `left` (kept in place) and `right` (new line below).
    InsertLine {
        line: usize,
        left: String,
        right: String,
    },
    /// Line `line + 1` (`right`) was appended to line `line` (`left`) and removed.
    DeleteLine {
        line: usize,
        left: String,
        right: String,
    },
    /// Line `line` was replaced wholesale.
    ReplaceLine {
        line: usize,
        before: String,
        after: String,
    },
}

/// Mutation primitives the engine needs from whatever holds the lines.
pub trait UndoTarget {
    fn insert_text(&mut self, line: usize, at: usize, text: &str);
    fn remove_text(&mut self, line: usize, at: usize, len: usize);
    fn set_line(&mut self, line: usize, content: String);
    fn insert_line(&mut self, line: usize, content: String);
    fn remove_line(&mut self, line: usize);
}

impl UndoAction {
    /// Restore the state that existed before this action. Returns the cursor
    /// position implied by the restored state.
    pub fn revert(&self, target: &mut impl UndoTarget) -> Position {
        match self {
            UndoAction::InsertChar { line, pos, text } => {
                target.remove_text(*line, *pos, text.len());
                Position::new(*line, *pos)
            }
            UndoAction::DeleteChar { line, pos, text } => {
                target.insert_text(*line, *pos, text);
                Position::new(*line, *pos)
            }
            UndoAction::InsertLine { line, left, right } => {
                target.set_line(*line, format!("{left}{right}"));
                target.remove_line(*line + 1);
                Position::new(*line, left.len())
            }
            UndoAction::DeleteLine { line, left, right } => {
                target.set_line(*line, left.clone());
                target.insert_line(*line + 1, right.clone());
                Position::new(*line + 1, 0)
            }
            UndoAction::ReplaceLine { line, before, .. } => {
                target.set_line(*line, before.clone());
                Position::new(*line, 0)
            }
        }
    }

    /// Re-apply this action on top of the state it was recorded against.
    pub fn apply(&self, target: &mut impl UndoTarget) -> Position {
        match self {
            UndoAction::InsertChar { line, pos, text } => {
                target.insert_text(*line, *pos, text);
                Position::new(*line, *pos + text.len())
            }
            UndoAction::DeleteChar { line, pos, text } => {
                target.remove_text(*line, *pos, text.len());
                Position::new(*line, *pos)
            }
            UndoAction::InsertLine { line, left, right } => {
                target.set_line(*line, left.clone());
                target.insert_line(*line + 1, right.clone());
                Position::new(*line + 1, 0)
            }
            UndoAction::DeleteLine { line, left, right } => {
                target.set_line(*line, format!("{left}{right}"));
                target.remove_line(*line + 1);
                Position::new(*line, left.len())
            }
            UndoAction::ReplaceLine { line, after, .. } => {
                target.set_line(*line, after.clone());
                Position::new(*line, 0)
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            UndoAction::InsertChar { .. } => "insert_char",
            UndoAction::DeleteChar { .. } => "delete_char",
            UndoAction::InsertLine { .. } => "insert_line",
            UndoAction::DeleteLine { .. } => "delete_line",
            UndoAction::ReplaceLine { .. } => "replace_line",
        }
    }
}

/// Bounded dual-stack history. Recording a new action after an undo drops
/// the redo branch.
#[derive(Debug, Default)]
pub struct UndoEngine {
    undo_stack: VecDeque<UndoAction>,
    redo_stack: Vec<UndoAction>,
}

impl UndoEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty() && self.redo_stack.is_empty()
    }

    pub fn record(&mut self, action: UndoAction) {
        trace!(target: "state.undo", kind = action.kind(), undo_depth = self.undo_stack.len(), "record");
        self.push_undo(action);
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
    }

    pub fn undo(&mut self, target: &mut impl UndoTarget) -> Option<Position> {
        let action = self.undo_stack.pop_back()?;
        trace!(target: "state.undo", kind = action.kind(), undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "undo_pop");
        let cursor = action.revert(target);
        self.redo_stack.push(action);
        Some(cursor)
    }

    pub fn redo(&mut self, target: &mut impl UndoTarget) -> Option<Position> {
        let action = self.redo_stack.pop()?;
        trace!(target: "state.undo", kind = action.kind(), undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "redo_pop");
        let cursor = action.apply(target);
        self.push_undo(action);
        Some(cursor)
    }

    fn push_undo(&mut self, action: UndoAction) {
        self.undo_stack.push_back(action);
        if self.undo_stack.len() > UNDO_HISTORY_MAX {
            self.undo_stack.pop_front();
            trace!(target: "state.undo", "undo_stack_trimmed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Lines(Vec<String>);

    impl UndoTarget for Lines {
        fn insert_text(&mut self, line: usize, at: usize, text: &str) {
            self.0[line].insert_str(at, text);
        }
        fn remove_text(&mut self, line: usize, at: usize, len: usize) {
            self.0[line].replace_range(at..at + len, "");
        }
        fn set_line(&mut self, line: usize, content: String) {
            self.0[line] = content;
        }
        fn insert_line(&mut self, line: usize, content: String) {
            self.0.insert(line, content);
        }
        fn remove_line(&mut self, line: usize) {
            self.0.remove(line);
        }
    }

    fn lines(v: &[&str]) -> Lines {
        Lines(v.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn undo_then_redo_insert_char() {
        let mut doc = lines(&["aXbc"]);
        let mut eng = UndoEngine::new();
        eng.record(UndoAction::InsertChar {
            line: 0,
            pos: 1,
            text: "X".into(),
        });
        assert_eq!(eng.undo(&mut doc), Some(Position::new(0, 1)));
        assert_eq!(doc, lines(&["abc"]));
        assert_eq!(eng.redo(&mut doc), Some(Position::new(0, 2)));
        assert_eq!(doc, lines(&["aXbc"]));
    }

    #[test]
    fn structural_actions_invert() {
        let mut doc = lines(&["aX", "bc"]);
        let mut eng = UndoEngine::new();
        eng.record(UndoAction::InsertLine {
            line: 0,
            left: "aX".into(),
            right: "bc".into(),
        });
        assert_eq!(eng.undo(&mut doc), Some(Position::new(0, 2)));
        assert_eq!(doc, lines(&["aXbc"]));

        let mut doc = lines(&["abcd"]);
        let mut eng = UndoEngine::new();
        eng.record(UndoAction::DeleteLine {
            line: 0,
            left: "ab".into(),
            right: "cd".into(),
        });
        assert_eq!(eng.undo(&mut doc), Some(Position::new(1, 0)));
        assert_eq!(doc, lines(&["ab", "cd"]));
        eng.redo(&mut doc);
        assert_eq!(doc, lines(&["abcd"]));
    }

    #[test]
    fn replace_line_round_trip() {
        let mut doc = lines(&["new"]);
        let mut eng = UndoEngine::new();
        eng.record(UndoAction::ReplaceLine {
            line: 0,
            before: "old".into(),
            after: "new".into(),
        });
        eng.undo(&mut doc);
        assert_eq!(doc, lines(&["old"]));
        eng.redo(&mut doc);
        assert_eq!(doc, lines(&["new"]));
    }

    #[test]
    fn new_record_clears_redo() {
        let mut doc = lines(&["ab"]);
        let mut eng = UndoEngine::new();
        eng.record(UndoAction::InsertChar {
            line: 0,
            pos: 1,
            text: "b".into(),
        });
        eng.undo(&mut doc);
        assert_eq!(eng.redo_depth(), 1);
        eng.record(UndoAction::InsertChar {
            line: 0,
            pos: 1,
            text: "z".into(),
        });
        assert_eq!(eng.redo_depth(), 0);
        assert_eq!(eng.redo(&mut doc), None);
    }

    #[test]
    fn history_is_bounded_and_drops_oldest() {
        let mut eng = UndoEngine::new();
        for i in 0..UNDO_HISTORY_MAX + 5 {
            eng.record(UndoAction::InsertChar {
                line: 0,
                pos: i,
                text: "a".into(),
            });
        }
        assert_eq!(eng.undo_depth(), UNDO_HISTORY_MAX);
        let long = "a".repeat(UNDO_HISTORY_MAX + 5);
        let mut doc = lines(&[long.as_str()]);
        let mut last = None;
        while let Some(p) = eng.undo(&mut doc) {
            last = Some(p);
        }
        // the five oldest insertions were evicted
        assert_eq!(last, Some(Position::new(0, 5)));
        assert_eq!(doc.0[0].len(), 5);
    }

    #[test]
    fn empty_stacks_return_none() {
        let mut doc = lines(&[""]);
        let mut eng = UndoEngine::new();
        assert_eq!(eng.undo(&mut doc), None);
        assert_eq!(eng.redo(&mut doc), None);
    }
}
