//! Text primitives shared by every other crate.
//!
//! * `utf8`      - codepoint decode/encode, boundaries, display widths.
//! * `line_edit` - single-line editing session used by Insert, Command and
//!   Search modes.
//! * `wrap`      - soft-wrap arithmetic (row counts and segment ranges).
//!
//! Everything here works on byte offsets into `&str`. Offsets handed out by
//! this crate always sit on a UTF-8 codepoint boundary.

pub mod line_edit;
pub mod utf8;
pub mod wrap;

pub use line_edit::LineEdit;
pub use utf8::{char_width, display_col, display_width};

/// Maximum number of bytes a single line may hold.
pub const MAX_LINE_BYTES: usize = 8192;

/// A position inside a document expressed as (line index, byte offset within that line).
/// Byte offsets are kept on codepoint boundaries by the editing layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub byte: usize,
}

impl Position {
    pub fn new(line: usize, byte: usize) -> Self {
        Self { line, byte }
    }
    pub fn origin() -> Self {
        Self { line: 0, byte: 0 }
    }
    pub fn clamp_to<F>(&mut self, line_count: usize, mut line_len_fn: F)
    where
        F: FnMut(usize) -> usize,
    {
        if line_count == 0 {
            self.line = 0;
            self.byte = 0;
            return;
        }
        if self.line >= line_count {
            self.line = line_count - 1;
        }
        let max_len = line_len_fn(self.line);
        if self.byte > max_len {
            self.byte = max_len;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pulls_position_into_document() {
        let lines = ["abc", "de"];
        let mut p = Position::new(7, 9);
        p.clamp_to(lines.len(), |i| lines[i].len());
        assert_eq!(p, Position::new(1, 2));
    }

    #[test]
    fn clamp_on_empty_document_resets_to_origin() {
        let mut p = Position::new(3, 3);
        p.clamp_to(0, |_| 0);
        assert_eq!(p, Position::origin());
    }
}
