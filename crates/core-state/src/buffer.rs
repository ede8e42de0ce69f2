//! Line-oriented document.
//!
//! A `Buffer` is an ordered list of owned UTF-8 lines plus its file path,
//! dirty flag, wrap cache and undo history. A line read from disk that was
//! not valid UTF-8 is shown with U+FFFD substitutes but keeps its exact bytes
//! until it is edited, so saving writes it back unchanged. Invariants upheld
//! by every public method:
//! * at least one line, at most `MAX_LINES`;
//! * every line at most `MAX_LINE_BYTES` bytes;
//! * the wrap cache tracks exactly `line_count()` slots, with entries dropped
//!   for any line whose content changed (all entries on insert/remove);
//! * every structural mutation is recorded in the history.
//!
//! Character-level edits happen inside a `LineEdit` owned by the dispatcher,
//! which records `InsertChar`/`DeleteChar` through `record` and hands the
//! finished line back via `commit_line`.

use crate::error::{EditorError, EditorResult};
use crate::undo::{UndoAction, UndoEngine, UndoTarget};
use crate::wrap_cache::WrapCache;
use core_text::utf8::{floor_boundary, next_boundary};
use core_text::{MAX_LINE_BYTES, Position};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Maximum number of lines a buffer may hold.
pub const MAX_LINES: usize = 65_536;

/// One decoded line and, when the source bytes were not valid UTF-8, those
/// bytes verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct LoadedLine {
    text: String,
    raw: Option<Vec<u8>>,
}

impl LoadedLine {
    fn clean(text: String) -> Self {
        Self { text, raw: None }
    }
}

#[derive(Debug)]
struct Lines {
    lines: Vec<String>,
    /// Parallel to `lines`; `Some` only for untouched lossy lines.
    raw: Vec<Option<Vec<u8>>>,
    wrap: WrapCache,
}

impl Lines {
    fn new(loaded: Vec<LoadedLine>) -> Self {
        let wrap = WrapCache::new(loaded.len());
        let (lines, raw) = loaded.into_iter().map(|l| (l.text, l.raw)).unzip();
        Self { lines, raw, wrap }
    }

    fn touched(&mut self, line: usize) {
        if let Some(r) = self.raw.get_mut(line) {
            *r = None;
        }
        self.wrap.invalidate_line(line);
    }

    /// Bytes written on save for line `idx`.
    fn bytes_of(&self, idx: usize) -> &[u8] {
        match self.raw.get(idx) {
            Some(Some(raw)) => raw,
            _ => self.lines[idx].as_bytes(),
        }
    }

    fn structural_change(&mut self) {
        self.wrap.ensure_capacity(self.lines.len());
        self.wrap.invalidate_all();
    }
}

impl UndoTarget for Lines {
    fn insert_text(&mut self, line: usize, at: usize, text: &str) {
        if let Some(l) = self.lines.get_mut(line) {
            let at = floor_boundary(l, at);
            l.insert_str(at, text);
            self.touched(line);
        }
    }

    fn remove_text(&mut self, line: usize, at: usize, len: usize) {
        if let Some(l) = self.lines.get_mut(line) {
            let start = floor_boundary(l, at);
            let end = floor_boundary(l, at + len);
            l.replace_range(start..end, "");
            self.touched(line);
        }
    }

    fn set_line(&mut self, line: usize, content: String) {
        if let Some(l) = self.lines.get_mut(line) {
            *l = content;
            self.touched(line);
        }
    }

    fn insert_line(&mut self, line: usize, content: String) {
        let at = line.min(self.lines.len());
        self.lines.insert(at, content);
        self.raw.insert(at, None);
        self.structural_change();
    }

    fn remove_line(&mut self, line: usize) {
        if line < self.lines.len() && self.lines.len() > 1 {
            self.lines.remove(line);
            self.raw.remove(line);
            self.structural_change();
        }
    }
}

#[derive(Debug)]
pub struct Buffer {
    text: Lines,
    path: Option<PathBuf>,
    dirty: bool,
    history: UndoEngine,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// Empty, unnamed, clean buffer holding a single empty line.
    pub fn new() -> Self {
        Self::from_lines([""])
    }

    /// Build a buffer from in-memory lines, applying the same limits as `load`.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pieces = lines
            .into_iter()
            .flat_map(|l| chunk_line(l.into()))
            .map(LoadedLine::clean);
        let (lines, _) = fit_to_limits(pieces);
        Self {
            text: Lines::new(lines),
            path: None,
            dirty: false,
            history: UndoEngine::new(),
        }
    }

    /// Read `path` into a new buffer. Line terminators (`\n`, optionally
    /// preceded by `\r`) are stripped; an empty file yields one empty line.
    /// Invalid UTF-8 is displayed lossily but saved back byte for byte.
    pub fn load(path: &Path) -> EditorResult<Self> {
        let bytes = fs::read(path).map_err(|e| {
            tracing::error!(target: "io", ?e, path = %path.display(), "file_open_error");
            if e.kind() == ErrorKind::NotFound {
                EditorError::FileNotFound(path.to_path_buf())
            } else {
                EditorError::Unreadable {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        let (lines, truncated) = fit_to_limits(split_lines(&bytes).flat_map(decode_line));
        if truncated {
            warn!(target: "io", path = %path.display(), max_lines = MAX_LINES, "file_truncated_at_line_limit");
        }
        debug!(target: "io", path = %path.display(), size_bytes = bytes.len(), line_count = lines.len(), "file_read_ok");
        Ok(Self {
            text: Lines::new(lines),
            path: Some(path.to_path_buf()),
            dirty: false,
            history: UndoEngine::new(),
        })
    }

    /// Write every line followed by `\n` to `path`. On success the buffer
    /// adopts `path` and becomes clean; on failure nothing changes.
    pub fn save_to(&mut self, path: &Path) -> EditorResult<()> {
        let count = self.line_count();
        let size: usize = (0..count).map(|i| self.text.bytes_of(i).len() + 1).sum();
        let mut out = Vec::with_capacity(size);
        for i in 0..count {
            out.extend_from_slice(self.text.bytes_of(i));
            out.push(b'\n');
        }
        if let Err(e) = fs::write(path, out) {
            tracing::error!(target: "io", ?e, path = %path.display(), "file_write_error");
            return Err(EditorError::SaveFailed {
                path: path.to_path_buf(),
                source: e,
            });
        }
        debug!(target: "io", path = %path.display(), size_bytes = size, line_count = self.line_count(), "file_write_ok");
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// File name for display, `[No file]` when unnamed.
    pub fn display_name(&self) -> String {
        match &self.path {
            Some(p) => p
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string()),
            None => "[No file]".to_string(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Unnamed, unmodified, no history, single empty line.
    pub fn is_pristine(&self) -> bool {
        self.path.is_none()
            && !self.dirty
            && self.history.is_empty()
            && self.text.lines.len() == 1
            && self.text.lines[0].is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.text.lines.len()
    }

    pub fn line(&self, idx: usize) -> Option<&str> {
        self.text.lines.get(idx).map(String::as_str)
    }

    pub fn line_len(&self, idx: usize) -> usize {
        self.text.lines.get(idx).map(String::len).unwrap_or(0)
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines.iter().map(String::as_str)
    }

    /// Clamp `pos` into the document and onto a codepoint boundary.
    pub fn clamp(&self, mut pos: Position) -> Position {
        pos.clamp_to(self.line_count(), |i| self.line_len(i));
        pos.byte = floor_boundary(&self.text.lines[pos.line], pos.byte);
        pos
    }

    pub fn history(&self) -> &UndoEngine {
        &self.history
    }

    /// Record a character-level edit performed in a line-edit session.
    pub fn record(&mut self, action: UndoAction) {
        self.history.record(action);
        self.dirty = true;
    }

    /// Store the final content of a line-edit session.
    pub fn commit_line(&mut self, idx: usize, content: String) {
        if let Some(l) = self.text.lines.get(idx)
            && *l != content
        {
            trace!(target: "state.buffer", line = idx, len = content.len(), "commit_line");
            self.text.set_line(idx, content);
            self.dirty = true;
        }
    }

    /// Whether one more line fits under `MAX_LINES`.
    pub fn can_insert_line(&self) -> bool {
        self.line_count() < MAX_LINES
    }

    /// Make `left` line `idx` and insert `right` below it.
    pub fn break_line(&mut self, idx: usize, left: String, right: String) -> EditorResult<()> {
        if !self.can_insert_line() {
            debug!(target: "state.buffer", line = idx, "line_insert_rejected_at_limit");
            return Err(EditorError::DocumentLimitExceeded);
        }
        if idx >= self.line_count() {
            return Err(EditorError::InvalidGotoLine(idx + 1));
        }
        trace!(target: "state.buffer", line = idx, left = left.len(), right = right.len(), "break_line");
        self.text.set_line(idx, left.clone());
        self.text.insert_line(idx + 1, right.clone());
        self.record(UndoAction::InsertLine {
            line: idx,
            left,
            right,
        });
        Ok(())
    }

    /// Append line `idx + 1` to line `idx` and remove it.
    pub fn join_lines(&mut self, idx: usize) -> EditorResult<()> {
        let (Some(left), Some(right)) = (self.line(idx), self.line(idx + 1)) else {
            return Err(EditorError::InvalidGotoLine(idx + 2));
        };
        if left.len() + right.len() > MAX_LINE_BYTES {
            debug!(target: "state.buffer", line = idx, "join_rejected_at_line_limit");
            return Err(EditorError::LineLimitExceeded);
        }
        let (left, right) = (left.to_string(), right.to_string());
        trace!(target: "state.buffer", line = idx, left = left.len(), right = right.len(), "join_lines");
        self.text.set_line(idx, format!("{left}{right}"));
        self.text.remove_line(idx + 1);
        self.record(UndoAction::DeleteLine {
            line: idx,
            left,
            right,
        });
        Ok(())
    }

    /// Replace line `idx` wholesale.
    pub fn replace_line(&mut self, idx: usize, content: String) -> EditorResult<()> {
        if content.len() > MAX_LINE_BYTES {
            return Err(EditorError::LineLimitExceeded);
        }
        let Some(before) = self.line(idx).map(str::to_string) else {
            return Err(EditorError::InvalidGotoLine(idx + 1));
        };
        self.text.set_line(idx, content.clone());
        self.record(UndoAction::ReplaceLine {
            line: idx,
            before,
            after: content,
        });
        Ok(())
    }

    /// Delete the codepoint starting at `pos`, returning it.
    pub fn delete_char_at(&mut self, pos: Position) -> Option<char> {
        let line = self.line(pos.line)?;
        let start = floor_boundary(line, pos.byte);
        let end = next_boundary(line, start);
        if start == end {
            return None;
        }
        let text = line[start..end].to_string();
        let ch = text.chars().next();
        self.text.remove_text(pos.line, start, end - start);
        self.record(UndoAction::DeleteChar {
            line: pos.line,
            pos: start,
            text,
        });
        ch
    }

    pub fn undo(&mut self) -> Option<Position> {
        let cursor = self.history.undo(&mut self.text)?;
        self.dirty = true;
        Some(self.clamp(cursor))
    }

    pub fn redo(&mut self) -> Option<Position> {
        let cursor = self.history.redo(&mut self.text)?;
        self.dirty = true;
        Some(self.clamp(cursor))
    }

    pub fn wrap_cache(&self) -> &WrapCache {
        &self.text.wrap
    }

    pub fn set_wrap_width(&mut self, width: usize) {
        self.text.wrap.set_width(width);
    }

    /// Visual rows occupied by line `idx` at the current wrap width.
    pub fn visual_rows(&mut self, idx: usize) -> usize {
        let Lines { lines, wrap, .. } = &mut self.text;
        match lines.get(idx) {
            Some(l) => wrap.get(idx, l),
            None => 1,
        }
    }

    /// Visual row at which line `idx` starts.
    pub fn visual_row_of_line(&mut self, idx: usize) -> usize {
        (0..idx.min(self.line_count()))
            .map(|i| self.visual_rows(i))
            .sum()
    }
}

/// Split file content into lines, stripping `\n` and any `\r` before it.
fn split_lines(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = content.strip_suffix(b"\n").unwrap_or(content);
    body.split(|&b| b == b'\n').map(|mut l| {
        while let [rest @ .., b'\r'] = l {
            l = rest;
        }
        l
    })
}

/// Decode one line of file bytes, continuing it on further lines when the
/// decoded text exceeds `MAX_LINE_BYTES`. Pieces containing invalid UTF-8
/// carry their source bytes.
fn decode_line(bytes: &[u8]) -> Vec<LoadedLine> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return chunk_line(text.to_string())
            .into_iter()
            .map(LoadedLine::clean)
            .collect();
    }
    let mut decoder = LineDecoder::default();
    for chunk in bytes.utf8_chunks() {
        let valid = chunk.valid();
        for (i, c) in valid.char_indices() {
            decoder.push(c, &valid.as_bytes()[i..i + c.len_utf8()], false);
        }
        if !chunk.invalid().is_empty() {
            decoder.push(char::REPLACEMENT_CHARACTER, chunk.invalid(), true);
        }
    }
    decoder.finish()
}

#[derive(Default)]
struct LineDecoder {
    pieces: Vec<LoadedLine>,
    text: String,
    raw: Vec<u8>,
    lossy: bool,
}

impl LineDecoder {
    fn push(&mut self, c: char, src: &[u8], lossy: bool) {
        if self.text.len() + c.len_utf8() > MAX_LINE_BYTES {
            self.flush();
        }
        self.text.push(c);
        self.raw.extend_from_slice(src);
        self.lossy |= lossy;
    }

    fn flush(&mut self) {
        let raw = std::mem::take(&mut self.raw);
        self.pieces.push(LoadedLine {
            text: std::mem::take(&mut self.text),
            raw: std::mem::take(&mut self.lossy).then_some(raw),
        });
    }

    fn finish(mut self) -> Vec<LoadedLine> {
        self.flush();
        self.pieces
    }
}

/// Enforce `MAX_LINES` (excess dropped). Returns the lines and whether any
/// were dropped; an empty input yields one empty line.
fn fit_to_limits(lines: impl Iterator<Item = LoadedLine>) -> (Vec<LoadedLine>, bool) {
    let mut out = Vec::new();
    let mut truncated = false;
    for line in lines {
        if out.len() == MAX_LINES {
            truncated = true;
            break;
        }
        out.push(line);
    }
    if out.is_empty() {
        out.push(LoadedLine::default());
    }
    (out, truncated)
}

fn chunk_line(mut line: String) -> Vec<String> {
    let mut pieces = Vec::new();
    while line.len() > MAX_LINE_BYTES {
        let cut = floor_boundary(&line, MAX_LINE_BYTES);
        let rest = line.split_off(cut);
        pieces.push(line);
        line = rest;
    }
    pieces.push(line);
    pieces
}
