//! Status line composition.
//!
//! Format: `-- MODE -- <name> [i/n][ [+]]<padding><line>:<col>`.
//! * `<name>` is the file name or `[No file]`.
//! * `[i/n]` is the 1-based buffer index and pool size.
//! * `[+]` appears only when the buffer is dirty.
//! * `<line>:<col>` is 1-based; `col` is the display column, right-aligned
//!   to the terminal width when it fits.

use core_state::Mode;
use core_text::display_width;

/// Everything needed to render the status line.
pub struct StatusContext<'a> {
    pub mode: Mode,
    pub file_name: &'a str,
    pub buffer_index: usize,
    pub buffer_count: usize,
    pub dirty: bool,
    /// 0-based cursor line.
    pub line: usize,
    /// 0-based display column.
    pub col: usize,
    pub width: usize,
}

pub fn format_status(ctx: &StatusContext<'_>) -> String {
    let dirty = if ctx.dirty { " [+]" } else { "" };
    let left = format!(
        "-- {} -- {} [{}/{}]{}",
        ctx.mode.label(),
        ctx.file_name,
        ctx.buffer_index + 1,
        ctx.buffer_count,
        dirty
    );
    let pos = format!("{}:{}", ctx.line + 1, ctx.col + 1);
    let used = display_width(&left) + pos.len();
    let padding = ctx.width.saturating_sub(used).max(1);
    format!("{left}{}{pos}", " ".repeat(padding))
}
