//! Terminal cell -> document position mapping for mouse clicks.

use core_model::Layout;
use core_state::Buffer;
use core_text::utf8::{byte_index_for_col, prev_boundary};
use core_text::wrap::segment_ranges;
use core_text::{Position, char_width};

/// Map a click at (`column`, `row`) to a document position.
///
/// `None` when the click lands on the status or message rows. Clicks in
/// the gutter map to text column 0 of the clicked segment; clicks below the
/// last visual row clamp to the last segment of the last line. The result
/// always lies on the clicked visual row, so a click on the right half of a
/// wide codepoint that ends a row lands on that codepoint.
pub fn map_click(
    buffer: &mut Buffer,
    layout: &Layout,
    scroll_row: usize,
    column: u16,
    row: u16,
) -> Option<Position> {
    let row = usize::from(row);
    if row >= layout.text_rows {
        return None;
    }
    let text_x = usize::from(column).saturating_sub(layout.gutter_width);
    let target = scroll_row + row;

    let last = buffer.line_count().saturating_sub(1);
    let mut hit = (last, buffer.visual_rows(last) - 1);
    let mut acc = 0;
    for idx in 0..buffer.line_count() {
        let rows = buffer.visual_rows(idx);
        if acc + rows > target {
            hit = (idx, target - acc);
            break;
        }
        acc += rows;
    }

    let (line, segment) = hit;
    let width = layout.text_width.max(1);
    let text = buffer.line(line).unwrap_or_default();
    let byte = byte_index_for_col(text, segment * width + text_x);
    Some(Position::new(line, clamp_to_segment(text, width, segment, byte)))
}

/// Pull `byte` back onto visual row `segment` of `text` when it overshot the
/// row end.
fn clamp_to_segment(text: &str, width: usize, segment: usize, byte: usize) -> usize {
    let segs = segment_ranges(text, width);
    let Some(range) = segs.get(segment) else {
        return byte;
    };
    if segment + 1 == segs.len() || byte < range.end {
        return byte.max(range.start);
    }
    let mut b = range.end;
    while b > range.start {
        b = prev_boundary(text, b);
        if text[b..].chars().next().is_some_and(|c| char_width(c) > 0) {
            break;
        }
    }
    b
}
