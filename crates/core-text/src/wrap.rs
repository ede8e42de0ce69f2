//! Soft-wrap arithmetic.
//!
//! A line of display width `d` occupies `max(1, ceil(d / width))` visual
//! rows. Segment `k` covers display columns `[k * width, (k + 1) * width)`;
//! the byte range of a segment is derived with `byte_index_for_col`, so a
//! wide codepoint straddling a row edge stays on the row where it starts.

use crate::utf8::{byte_index_for_col, display_width};
use std::ops::Range;

/// Visual rows needed by `line` at `width` columns (`width < 1` acts as 1).
pub fn visual_rows(line: &str, width: usize) -> usize {
    let width = width.max(1);
    display_width(line).div_ceil(width).max(1)
}

/// Byte ranges of each visual row of `line`.
pub fn segment_ranges(line: &str, width: usize) -> Vec<Range<usize>> {
    let width = width.max(1);
    let rows = visual_rows(line, width);
    (0..rows)
        .map(|k| {
            let start = if k == 0 {
                0
            } else {
                byte_index_for_col(line, k * width)
            };
            let end = byte_index_for_col(line, (k + 1) * width);
            start..end
        })
        .collect()
}
