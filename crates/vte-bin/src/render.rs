//! Paints a `Frame` with queued crossterm commands.
//!
//! Every row is repainted on each call: move, clear, print. Control
//! characters have zero display width in the text model and are skipped so
//! the terminal cursor stays aligned with the computed columns.

use anyhow::Result;
use core_model::Frame;
use core_text::char_width;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{Clear, ClearType},
};
use std::io::Write;

fn printable(s: &str) -> String {
    s.chars().filter(|c| !c.is_control()).collect()
}

/// Keep the leading characters that fit in `cols` cells.
fn fit(s: &str, cols: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars().filter(|c| !c.is_control()) {
        let w = char_width(c);
        if used + w > cols {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

pub fn paint<W: Write>(out: &mut W, frame: &Frame, cols: u16, rows: u16) -> Result<()> {
    queue!(out, Hide)?;
    if let Some(lines) = &frame.overlay {
        for y in 0..rows {
            queue!(out, MoveTo(0, y), Clear(ClearType::CurrentLine))?;
            if let Some(line) = lines.get(usize::from(y)) {
                queue!(out, Print(fit(line, usize::from(cols))))?;
            }
        }
        out.flush()?;
        return Ok(());
    }

    let text_rows = usize::from(rows).saturating_sub(core_model::STATUS_ROWS).max(1);
    for y in 0..text_rows {
        queue!(out, MoveTo(0, y as u16), Clear(ClearType::CurrentLine))?;
        if let Some(row) = frame.rows.get(y) {
            let line = format!("{}{}", frame.gutter_text(row), printable(&row.text));
            queue!(out, Print(line))?;
        }
    }

    let status_row = text_rows as u16;
    queue!(
        out,
        MoveTo(0, status_row),
        Clear(ClearType::CurrentLine),
        SetAttribute(Attribute::Reverse),
        Print(fit(&frame.status, usize::from(cols))),
        SetAttribute(Attribute::Reset),
        MoveTo(0, status_row + 1),
        Clear(ClearType::CurrentLine),
        Print(fit(&frame.message, usize::from(cols)))
    )?;

    if let Some((x, y)) = frame.cursor {
        queue!(out, MoveTo(x, y), Show)?;
    }
    out.flush()?;
    Ok(())
}
