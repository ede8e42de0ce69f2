//! Per-buffer cache of visual row counts.
//!
//! Entries are tagged by the wrap width they were computed for; changing the
//! width drops every entry. The owning buffer invalidates a single entry when
//! a line's content changes and everything on structural edits (line
//! inserted or removed), because indices shift.

use core_text::wrap::visual_rows;
use tracing::trace;

#[derive(Debug, Clone, Default)]
pub struct WrapCache {
    width: Option<usize>,
    rows: Vec<Option<usize>>,
}

impl WrapCache {
    pub fn new(line_count: usize) -> Self {
        let mut cache = Self::default();
        cache.ensure_capacity(line_count);
        cache
    }

    /// Width the cached entries belong to (`None` before the first `set_width`).
    pub fn width(&self) -> Option<usize> {
        self.width
    }

    /// Number of line slots tracked.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_cached(&self, idx: usize) -> bool {
        matches!(self.rows.get(idx), Some(Some(_)))
    }

    pub fn set_width(&mut self, width: usize) {
        if self.width != Some(width) {
            trace!(target: "state.wrap", old = ?self.width, new = width, "wrap_width_changed");
            self.width = Some(width);
            self.invalidate_all();
        }
    }

    /// Track `count` lines, growing storage geometrically.
    pub fn ensure_capacity(&mut self, count: usize) {
        if count > self.rows.capacity() {
            let mut cap = self.rows.capacity().max(1);
            while cap < count {
                cap *= 2;
            }
            self.rows.reserve_exact(cap - self.rows.len());
        }
        self.rows.resize(count, None);
    }

    pub fn invalidate_line(&mut self, idx: usize) {
        if let Some(slot) = self.rows.get_mut(idx) {
            *slot = None;
        }
    }

    pub fn invalidate_all(&mut self) {
        self.rows.fill(None);
    }

    /// Row count for line `idx` with text `content`. Indices outside the
    /// tracked range are computed but not stored.
    pub fn get(&mut self, idx: usize, content: &str) -> usize {
        let width = self.width.unwrap_or(1).max(1);
        match self.rows.get_mut(idx) {
            Some(Some(v)) => *v,
            Some(slot) => {
                let v = visual_rows(content, width);
                *slot = Some(v);
                v
            }
            None => visual_rows(content, width),
        }
    }
}
