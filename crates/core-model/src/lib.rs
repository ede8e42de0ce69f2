//! Presentation model: per-buffer view state, screen layout and the pure
//! data `Frame` handed to the renderer.
//!
//! A `View` owns the cursor and the vertical scroll offset of one buffer.
//! The scroll offset is measured in *visual rows* (after soft-wrapping), so
//! a long line that wraps into three rows scrolls one row at a time.
//!
//! Invariants (after every dispatcher call):
//! * `cursor.line < buffer.line_count()` and `cursor.byte` is a codepoint
//!   boundary within that line.
//! * The visual row holding the cursor lies in
//!   `[scroll_row, scroll_row + text_rows)`.

use core_state::Buffer;
use core_text::wrap::visual_rows;
use core_text::{Position, display_col};

mod frame;
mod layout;
mod status;

pub use frame::{Frame, FrameRow, FrameSource};
pub use layout::{Layout, STATUS_ROWS};
pub use status::{StatusContext, format_status};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct View {
    pub cursor: Position,
    /// First visible visual row.
    pub scroll_row: usize,
}

impl View {
    pub fn new(cursor: Position, scroll_row: usize) -> Self {
        Self { cursor, scroll_row }
    }

    /// Scroll so `cursor_row` is visible with `margin` rows of context.
    /// Returns `true` when the offset changed.
    pub fn reveal(&mut self, cursor_row: usize, text_rows: usize, margin: usize) -> bool {
        match compute_scroll_intent(self.scroll_row, cursor_row, text_rows, margin) {
            Some(first) => {
                self.scroll_row = first;
                true
            }
            None => false,
        }
    }
}

/// New first visible row keeping `cursor_row` inside the viewport band
/// `[first + m, first + text_height - m)`, where `m` is `margin` clamped to
/// `(text_height - 1) / 2`. `None` when no scroll is needed.
pub fn compute_scroll_intent(
    first: usize,
    cursor_row: usize,
    text_height: usize,
    margin: usize,
) -> Option<usize> {
    if text_height == 0 {
        return None;
    }
    let m = margin.min((text_height - 1) / 2);
    let new_first = if cursor_row < first + m {
        cursor_row.saturating_sub(m)
    } else if cursor_row + m >= first + text_height {
        cursor_row + m + 1 - text_height
    } else {
        return None;
    };
    (new_first != first).then_some(new_first)
}

/// Visual row (from the top of the document) holding `byte` of line
/// `line`, whose current text is `text`. `text` may differ from the
/// buffer's copy while a line-edit session is open.
pub fn cursor_visual_row(
    buffer: &mut Buffer,
    line: usize,
    text: &str,
    byte: usize,
    width: usize,
) -> usize {
    let width = width.max(1);
    let rows = visual_rows(text, width);
    let segment = (display_col(text, byte) / width).min(rows - 1);
    buffer.visual_row_of_line(line) + segment
}
