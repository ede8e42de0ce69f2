//! UTF-8 codec and display-width helpers.
//!
//! Widths come from `unicode_width` at codepoint granularity: East Asian wide
//! codepoints count two columns, combining marks and control codes count
//! zero, everything else one. Wrapping, the mouse mapper and the status line
//! all measure through `char_width` so they agree with each other.

use unicode_width::UnicodeWidthChar;

/// Decode the first codepoint of `bytes`. Returns the char and its encoded
/// length, or `None` for an empty slice or an invalid leading sequence.
pub fn decode(bytes: &[u8]) -> Option<(char, usize)> {
    let lead = *bytes.first()?;
    let len = sequence_len(lead)?;
    let head = bytes.get(..len)?;
    let s = std::str::from_utf8(head).ok()?;
    s.chars().next().map(|c| (c, len))
}

/// Encode `c` into `buf` and return the encoded slice.
pub fn encode(c: char, buf: &mut [u8; 4]) -> &str {
    c.encode_utf8(buf)
}

/// Length of the sequence introduced by a leading byte (`None` for a
/// continuation or otherwise invalid lead).
pub fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// Display columns occupied by one codepoint.
pub fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Display columns occupied by a whole string.
pub fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Display column at which the codepoint starting at `byte` is drawn.
pub fn display_col(s: &str, byte: usize) -> usize {
    let end = floor_boundary(s, byte);
    display_width(&s[..end])
}

/// Largest codepoint boundary `<= byte` (clamped to `s.len()`).
pub fn floor_boundary(s: &str, byte: usize) -> usize {
    if byte >= s.len() {
        return s.len();
    }
    let mut b = byte;
    while !s.is_char_boundary(b) {
        b -= 1;
    }
    b
}

/// Boundary of the codepoint preceding `byte` (0 if already at the start).
pub fn prev_boundary(s: &str, byte: usize) -> usize {
    let byte = floor_boundary(s, byte);
    s[..byte].char_indices().next_back().map(|(i, _)| i).unwrap_or(0)
}

/// Boundary following the codepoint at `byte` (`s.len()` at or past the end).
pub fn next_boundary(s: &str, byte: usize) -> usize {
    let byte = floor_boundary(s, byte);
    match s[byte..].chars().next() {
        Some(c) => byte + c.len_utf8(),
        None => s.len(),
    }
}

/// Byte offset for display column `col`.
///
/// Walks codepoints accumulating widths until the running column reaches or
/// exceeds `col`. Zero-width codepoints sitting at that point are consumed so
/// the result never separates a base character from its combining marks.
/// Columns past the end of the line map to `s.len()`.
pub fn byte_index_for_col(s: &str, col: usize) -> usize {
    let mut acc = 0usize;
    for (idx, c) in s.char_indices() {
        let w = char_width(c);
        if acc >= col && w > 0 {
            return idx;
        }
        acc += w;
    }
    s.len()
}
