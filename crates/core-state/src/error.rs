use std::path::PathBuf;
use thiserror::Error;

/// Recoverable editor failures. None of these end the session; the
/// dispatcher renders them into the status line via `Display`.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Save failed: {}: {source}", path.display())]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("No file name")]
    NoFileName,
    #[error("Buffer pool full")]
    PoolFull,
    #[error("Line too long")]
    LineLimitExceeded,
    #[error("Too many lines")]
    DocumentLimitExceeded,
    #[error("Invalid line number: {0}")]
    InvalidGotoLine(usize),
    #[error("Pattern not found: {0}")]
    PatternNotFound(String),
    #[error("No previous search")]
    NoPreviousSearch,
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("{0}")]
    Config(String),
}

pub type EditorResult<T> = Result<T, EditorError>;
