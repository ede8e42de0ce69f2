//! Line jumps and literal search with wraparound.
//!
//! Searches are plain substring matches on byte offsets (no regex, case
//! sensitive). Every line is scanned at most once per search: the line
//! holding the cursor is scanned first, and its matches on the "wrong"
//! side of the cursor are remembered as the wrap-around candidate that is
//! only used after every other line has been tried.

use core_model::{Layout, View};
use core_state::{Buffer, EditorError, EditorResult};
use core_text::Position;
use core_text::utf8::next_boundary;
use tracing::trace;

/// Result of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Position),
    /// Found after wrapping past the end (or start) of the document.
    FoundWrapped(Position),
    NotFound,
}

impl SearchOutcome {
    pub fn position(self) -> Option<Position> {
        match self {
            SearchOutcome::Found(p) | SearchOutcome::FoundWrapped(p) => Some(p),
            SearchOutcome::NotFound => None,
        }
    }
}

/// Gutter width for `line_count` lines: digits plus one space, at least 4.
pub fn calc_line_num_width(line_count: usize) -> usize {
    let digits = line_count.max(1).ilog10() as usize + 1;
    (digits + 1).max(4)
}

/// Last search pattern and the gutter width derived from the line count.
#[derive(Debug, Clone, Default)]
pub struct NavState {
    last_search: String,
    line_num_width: usize,
}

impl NavState {
    pub fn new() -> Self {
        Self {
            last_search: String::new(),
            line_num_width: calc_line_num_width(1),
        }
    }

    pub fn last_search(&self) -> &str {
        &self.last_search
    }

    pub fn line_num_width(&self) -> usize {
        self.line_num_width
    }

    pub fn update_line_num_width(&mut self, line_count: usize) -> usize {
        self.line_num_width = calc_line_num_width(line_count);
        self.line_num_width
    }

    /// Remember `pattern` and search forward from the cursor, moving it on success.
    pub fn search_forward(&mut self, buffer: &Buffer, view: &mut View, pattern: &str) -> SearchOutcome {
        self.last_search = pattern.to_string();
        self.search_next(buffer, view)
    }

    /// Repeat the last search forward.
    pub fn search_next(&self, buffer: &Buffer, view: &mut View) -> SearchOutcome {
        let outcome = scan_forward(buffer, view.cursor, &self.last_search, |_| {});
        trace!(target: "actions.search", ?outcome, "search_next");
        apply(view, outcome)
    }

    /// Repeat the last search backward.
    pub fn search_prev(&self, buffer: &Buffer, view: &mut View) -> SearchOutcome {
        let outcome = scan_backward(buffer, view.cursor, &self.last_search, |_| {});
        trace!(target: "actions.search", ?outcome, "search_prev");
        apply(view, outcome)
    }
}

fn apply(view: &mut View, outcome: SearchOutcome) -> SearchOutcome {
    if let Some(p) = outcome.position() {
        view.cursor = p;
    }
    outcome
}

/// Move to column 0 of 1-based line `n`, scrolling it into view.
pub fn goto_line(buffer: &mut Buffer, view: &mut View, layout: &Layout, n: usize) -> EditorResult<()> {
    if n == 0 || n > buffer.line_count() {
        return Err(EditorError::InvalidGotoLine(n));
    }
    view.cursor = Position::new(n - 1, 0);
    let row = buffer.visual_row_of_line(n - 1);
    view.reveal(row, layout.text_rows, 0);
    trace!(target: "actions.search", line = n, "goto_line");
    Ok(())
}

/// Start offsets of every (possibly overlapping) occurrence of `pat`.
fn match_starts<'h>(hay: &'h str, pat: &'h str) -> impl Iterator<Item = usize> + 'h {
    let mut from = 0;
    std::iter::from_fn(move || {
        if pat.is_empty() || from > hay.len() {
            return None;
        }
        let found = from + hay[from..].find(pat)?;
        from = if found == hay.len() {
            hay.len() + 1
        } else {
            next_boundary(hay, found)
        };
        Some(found)
    })
}

fn scan_forward(
    buffer: &Buffer,
    from: Position,
    pat: &str,
    mut visit: impl FnMut(usize),
) -> SearchOutcome {
    let count = buffer.line_count();
    if pat.is_empty() || count == 0 {
        return SearchOutcome::NotFound;
    }
    let start = from.line.min(count - 1);
    let line = |i: usize| buffer.line(i).unwrap_or_default();

    visit(start);
    let mut wrap_hit = None;
    for m in match_starts(line(start), pat) {
        if m > from.byte {
            return SearchOutcome::Found(Position::new(start, m));
        }
        // The wrapped pass stops short of the cursor itself.
        if m < from.byte {
            wrap_hit.get_or_insert(m);
        }
    }
    for i in start + 1..count {
        visit(i);
        if let Some(m) = match_starts(line(i), pat).next() {
            return SearchOutcome::Found(Position::new(i, m));
        }
    }
    for i in 0..start {
        visit(i);
        if let Some(m) = match_starts(line(i), pat).next() {
            return SearchOutcome::FoundWrapped(Position::new(i, m));
        }
    }
    match wrap_hit {
        Some(m) => SearchOutcome::FoundWrapped(Position::new(start, m)),
        None => SearchOutcome::NotFound,
    }
}

fn scan_backward(
    buffer: &Buffer,
    from: Position,
    pat: &str,
    mut visit: impl FnMut(usize),
) -> SearchOutcome {
    let count = buffer.line_count();
    if pat.is_empty() || count == 0 {
        return SearchOutcome::NotFound;
    }
    let start = from.line.min(count - 1);
    let line = |i: usize| buffer.line(i).unwrap_or_default();

    visit(start);
    let mut before = None;
    let mut wrap_hit = None;
    for m in match_starts(line(start), pat) {
        if m < from.byte {
            before = Some(m);
        } else {
            wrap_hit = Some(m);
        }
    }
    if let Some(m) = before {
        return SearchOutcome::Found(Position::new(start, m));
    }
    for i in (0..start).rev() {
        visit(i);
        if let Some(m) = match_starts(line(i), pat).last() {
            return SearchOutcome::Found(Position::new(i, m));
        }
    }
    for i in (start + 1..count).rev() {
        visit(i);
        if let Some(m) = match_starts(line(i), pat).last() {
            return SearchOutcome::FoundWrapped(Position::new(i, m));
        }
    }
    match wrap_hit {
        Some(m) => SearchOutcome::FoundWrapped(Position::new(start, m)),
        None => SearchOutcome::NotFound,
    }
}
