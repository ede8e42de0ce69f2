//! Pure data view of one screen.
//!
//! A `Frame` is everything a renderer needs: the visible wrap segments with
//! their line numbers, the status text, the message/prompt line and the
//! terminal cursor position. Building one never mutates document text; it
//! only fills wrap-cache entries.

use crate::View;
use crate::layout::Layout;
use core_state::Buffer;
use core_text::display_col;
use core_text::wrap::{segment_ranges, visual_rows};

/// One visual row of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRow {
    pub line: usize,
    pub segment: usize,
    /// 1-based line number, present on the first segment of a line only.
    pub number: Option<usize>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub rows: Vec<FrameRow>,
    pub gutter_width: usize,
    pub text_width: usize,
    pub status: String,
    pub message: String,
    /// Terminal cursor as (column, row).
    pub cursor: Option<(u16, u16)>,
    /// Full-screen text replacing everything else (help screen).
    pub overlay: Option<Vec<String>>,
}

/// Inputs for `Frame::build`.
pub struct FrameSource<'a> {
    pub buffer: &'a mut Buffer,
    pub view: &'a View,
    pub layout: &'a Layout,
    /// Text of the cursor line while a line-edit session owns it.
    pub active_line: Option<&'a str>,
    pub status: String,
    pub message: String,
    /// Display column of the cursor on the message line (prompt modes).
    pub prompt_cursor: Option<usize>,
    pub overlay: Option<Vec<String>>,
}

impl Frame {
    pub fn build(src: FrameSource<'_>) -> Self {
        let FrameSource {
            buffer,
            view,
            layout,
            active_line,
            status,
            message,
            prompt_cursor,
            overlay,
        } = src;
        let width = layout.text_width.max(1);
        let cursor_line = view.cursor.line;

        let line_text = |buffer: &Buffer, idx: usize| -> String {
            match active_line {
                Some(text) if idx == cursor_line => text.to_string(),
                _ => buffer.line(idx).unwrap_or_default().to_string(),
            }
        };
        let rows_of = |buffer: &mut Buffer, idx: usize| -> usize {
            match active_line {
                Some(text) if idx == cursor_line => visual_rows(text, width),
                _ => buffer.visual_rows(idx),
            }
        };

        // locate the line holding the first visible row
        let mut line = 0;
        let mut acc = 0;
        let mut segment = 0;
        while line < buffer.line_count() {
            let n = rows_of(buffer, line);
            if acc + n > view.scroll_row {
                segment = view.scroll_row - acc;
                break;
            }
            acc += n;
            line += 1;
        }

        let mut rows = Vec::with_capacity(layout.text_rows);
        let mut cursor = None;
        'fill: while line < buffer.line_count() {
            let text = line_text(buffer, line);
            let ranges = segment_ranges(&text, width);
            let cursor_seg = (line == cursor_line).then(|| {
                let col = display_col(&text, view.cursor.byte);
                let seg = (col / width).min(ranges.len() - 1);
                (seg, (col - seg * width).min(width - 1))
            });
            for (seg, range) in ranges.iter().enumerate().skip(segment) {
                if rows.len() == layout.text_rows {
                    break 'fill;
                }
                if let Some((cseg, ccol)) = cursor_seg
                    && cseg == seg
                {
                    cursor = Some(((layout.gutter_width + ccol) as u16, rows.len() as u16));
                }
                rows.push(FrameRow {
                    line,
                    segment: seg,
                    number: (seg == 0).then_some(line + 1),
                    text: text[range.clone()].to_string(),
                });
            }
            segment = 0;
            line += 1;
        }

        if let Some(col) = prompt_cursor {
            cursor = Some((col as u16, (layout.text_rows + 1) as u16));
        }

        Frame {
            rows,
            gutter_width: layout.gutter_width,
            text_width: width,
            status,
            message,
            cursor,
            overlay,
        }
    }

    /// Gutter text for a row (right-aligned number plus a space, or blanks).
    pub fn gutter_text(&self, row: &FrameRow) -> String {
        if self.gutter_width == 0 {
            return String::new();
        }
        match row.number {
            Some(n) => format!("{:>w$} ", n, w = self.gutter_width - 1),
            None => " ".repeat(self.gutter_width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn build(buffer: &mut Buffer, view: View, layout: Layout, active: Option<&str>) -> Frame {
        buffer.set_wrap_width(layout.text_width);
        Frame::build(FrameSource {
            buffer,
            view: &view,
            layout: &layout,
            active_line: active,
            status: String::new(),
            message: String::new(),
            prompt_cursor: None,
            overlay: None,
        })
    }

    fn texts(f: &Frame) -> Vec<&str> {
        f.rows.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn wraps_long_lines_into_segments() {
        let mut b = Buffer::from_lines(["abcdef", "xy"]);
        let layout = Layout::compute(8, 10, 4);
        let f = build(&mut b, View::default(), layout, None);
        assert_eq!(texts(&f), vec!["abcd", "ef", "xy"]);
        assert_eq!(f.rows[1].number, None);
        assert_eq!(f.rows[2].number, Some(2));
        assert_eq!(f.gutter_text(&f.rows[0]), "  1 ");
        assert_eq!(f.gutter_text(&f.rows[1]), "    ");
        assert_eq!(f.cursor, Some((4, 0)));
    }

    #[test]
    fn scroll_offset_starts_mid_line_and_stops_at_text_rows() {
        let mut b = Buffer::from_lines(["abcdef", "xy", "z", "w"]);
        let layout = Layout::compute(8, 4, 4);
        let view = View::new(core_text::Position::new(1, 1), 1);
        let f = build(&mut b, view, layout, None);
        assert_eq!(texts(&f), vec!["ef", "xy"]);
        assert_eq!(f.cursor, Some((5, 1)));
    }

    #[test]
    fn active_line_overrides_buffer_text() {
        let mut b = Buffer::from_lines(["abc"]);
        let layout = Layout::compute(10, 5, 0);
        let view = View::new(core_text::Position::new(0, 4), 0);
        let f = build(&mut b, view, layout, Some("abXc"));
        assert_eq!(texts(&f), vec!["abXc"]);
        assert_eq!(f.cursor, Some((4, 0)));
    }

    #[test]
    fn cursor_hidden_when_off_screen() {
        let mut b = Buffer::from_lines(["a", "b", "c"]);
        let layout = Layout::compute(10, 3, 0);
        let view = View::new(core_text::Position::new(2, 0), 0);
        let f = build(&mut b, view, layout, None);
        assert_eq!(texts(&f), vec!["a"]);
        assert_eq!(f.cursor, None);
    }
}
