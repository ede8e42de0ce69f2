//! Screen geometry for a single text region.
//!
//! The terminal is split into the text area (gutter + wrapped text) and two
//! trailing rows: the status line and the message/prompt line.
//!
//! Invariants:
//! * `text_width >= 1` and `text_rows >= 1`, even on degenerate terminals.
//! * `gutter_width + text_width` equals the terminal width whenever the
//!   terminal is wider than the gutter.

/// Rows reserved below the text area (status line + message line).
pub const STATUS_ROWS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub cols: u16,
    pub rows: u16,
    pub gutter_width: usize,
    pub text_width: usize,
    pub text_rows: usize,
}

impl Layout {
    pub fn compute(cols: u16, rows: u16, gutter_width: usize) -> Self {
        let gutter_width = gutter_width.min(usize::from(cols).saturating_sub(1));
        Self {
            cols,
            rows,
            gutter_width,
            text_width: usize::from(cols).saturating_sub(gutter_width).max(1),
            text_rows: usize::from(rows).saturating_sub(STATUS_ROWS).max(1),
        }
    }

    /// Screen row of the status line.
    pub fn status_row(&self) -> usize {
        self.text_rows
    }
}
