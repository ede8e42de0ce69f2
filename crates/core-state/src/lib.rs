//! Document state: buffers, the buffer pool, undo history and wrap caches.
//!
//! This crate owns every piece of text the editor holds. Presentation state
//! (cursor, scroll) lives in `core-model`; input interpretation lives in
//! `core-actions`. All mutations of a buffer's lines go through `Buffer`
//! methods so that the undo history and the wrap cache never drift from the
//! text they describe.

pub mod buffer;
pub mod error;
pub mod pool;
pub mod undo;
pub mod wrap_cache;

pub use buffer::{Buffer, MAX_LINES};
pub use error::{EditorError, EditorResult};
pub use pool::{BufferPool, OpenOutcome, POOL_CAPACITY};
pub use undo::{UNDO_HISTORY_MAX, UndoAction, UndoEngine, UndoTarget};
pub use wrap_cache::WrapCache;

/// Current editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Navigation and single-key commands.
    Normal,
    /// Text entry into the current line.
    Insert,
    /// Collecting a `:` command line.
    Command,
    /// Collecting a `/` search pattern.
    Search,
}

impl Mode {
    /// Label shown in the status line.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Command => "COMMAND",
            Mode::Search => "SEARCH",
        }
    }
}
