//! Single-line editing session.
//!
//! A `LineEdit` holds a private copy of one line plus a byte cursor. The
//! cursor is always on a codepoint boundary in `[0, len]`. The session is
//! created from a line, mutated one codepoint at a time and finally
//! consumed by `commit`, which hands the owned string back to the caller.
//!
//! Insert mode uses it for the document line under the cursor, Command and
//! Search modes use it for the prompt text.

use crate::MAX_LINE_BYTES;
use crate::utf8::{floor_boundary, next_boundary, prev_boundary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdit {
    buf: String,
    cursor: usize,
    limit: usize,
}

impl Default for LineEdit {
    fn default() -> Self {
        Self::begin(String::new())
    }
}

impl LineEdit {
    /// Start a session over `content` with the cursor at the end.
    pub fn begin(content: impl Into<String>) -> Self {
        let buf = content.into();
        let cursor = buf.len();
        Self {
            buf,
            cursor,
            limit: MAX_LINE_BYTES,
        }
    }

    /// Start a session with the cursor at `byte` (floored to a boundary).
    pub fn begin_at(content: impl Into<String>, byte: usize) -> Self {
        let mut s = Self::begin(content);
        s.cursor = floor_boundary(&s.buf, byte);
        s
    }

    /// Override the byte limit (tests and prompts).
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }
    pub fn cursor(&self) -> usize {
        self.cursor
    }
    pub fn len(&self) -> usize {
        self.buf.len()
    }
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Codepoint immediately left of the cursor.
    pub fn char_before(&self) -> Option<char> {
        self.buf[..self.cursor].chars().next_back()
    }

    /// Codepoint under the cursor.
    pub fn char_after(&self) -> Option<char> {
        self.buf[self.cursor..].chars().next()
    }

    /// Insert `c` at the cursor and advance past it. Returns `false` (and
    /// leaves the session untouched) when the line would exceed its limit.
    pub fn insert(&mut self, c: char) -> bool {
        if self.buf.len() + c.len_utf8() > self.limit {
            return false;
        }
        self.buf.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        true
    }

    /// Insert a whole string (used for expanded tabs). All or nothing.
    pub fn insert_str(&mut self, s: &str) -> bool {
        if self.buf.len() + s.len() > self.limit {
            return false;
        }
        self.buf.insert_str(self.cursor, s);
        self.cursor += s.len();
        true
    }

    /// Remove the codepoint before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = prev_boundary(&self.buf, self.cursor);
        self.buf.replace_range(start..self.cursor, "");
        self.cursor = start;
        true
    }

    /// Remove the codepoint under the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.buf.len() {
            return false;
        }
        let end = next_boundary(&self.buf, self.cursor);
        self.buf.replace_range(self.cursor..end, "");
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = prev_boundary(&self.buf, self.cursor);
    }
    pub fn move_right(&mut self) {
        self.cursor = next_boundary(&self.buf, self.cursor);
    }
    pub fn home(&mut self) {
        self.cursor = 0;
    }
    pub fn end(&mut self) {
        self.cursor = self.buf.len();
    }

    /// Truncate the session at the cursor and return the removed suffix.
    /// The cursor stays at the (new) end of the line.
    pub fn split(&mut self) -> String {
        let rest = self.buf.split_off(self.cursor);
        self.cursor = self.buf.len();
        rest
    }

    /// Consume the session, yielding the edited line.
    pub fn commit(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_places_cursor_at_end() {
        let s = LineEdit::begin("héllo");
        assert_eq!(s.cursor(), "héllo".len());
    }

    #[test]
    fn begin_at_floors_to_boundary() {
        let s = LineEdit::begin_at("a世b", 2);
        assert_eq!(s.cursor(), 1);
    }

    #[test]
    fn insert_in_middle() {
        let mut s = LineEdit::begin_at("abc", 1);
        assert!(s.insert('X'));
        assert_eq!(s.as_str(), "aXbc");
        assert_eq!(s.cursor(), 2);
    }

    #[test]
    fn backspace_removes_whole_codepoint() {
        let mut s = LineEdit::begin("a世");
        assert_eq!(s.char_before(), Some('世'));
        assert!(s.backspace());
        assert_eq!(s.as_str(), "a");
        assert_eq!(s.cursor(), 1);
    }

    #[test]
    fn backspace_and_delete_at_edges_are_noops() {
        let mut s = LineEdit::begin_at("ab", 0);
        assert!(!s.backspace());
        s.end();
        assert!(!s.delete());
        assert_eq!(s.as_str(), "ab");
    }

    #[test]
    fn delete_keeps_cursor() {
        let mut s = LineEdit::begin_at("é!", 0);
        assert_eq!(s.char_after(), Some('é'));
        assert!(s.delete());
        assert_eq!(s.as_str(), "!");
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn moves_step_over_multibyte() {
        let mut s = LineEdit::begin("😀x");
        s.home();
        s.move_right();
        assert_eq!(s.cursor(), 4);
        s.move_left();
        assert_eq!(s.cursor(), 0);
        s.move_left();
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn split_returns_suffix() {
        let mut s = LineEdit::begin_at("aXbc", 2);
        assert_eq!(s.split(), "bc");
        assert_eq!(s.as_str(), "aX");
        assert_eq!(s.cursor(), 2);
        assert_eq!(s.commit(), "aX");
    }

    #[test]
    fn insert_rejected_at_limit() {
        let mut s = LineEdit::begin("abc").with_limit(4);
        assert!(s.insert('d'));
        assert!(!s.insert('e'));
        assert!(!s.insert_str("  "));
        assert_eq!(s.as_str(), "abcd");
    }
}
