//! Fixed-capacity collection of open buffers with a current selection.

use crate::buffer::Buffer;
use crate::error::{EditorError, EditorResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Maximum number of simultaneously open buffers.
pub const POOL_CAPACITY: usize = 16;

/// What `BufferPool::open` did.
#[derive(Debug)]
pub enum OpenOutcome {
    /// The path was already open; selection moved to it.
    Switched(usize),
    /// The file was read into a new buffer.
    Loaded(usize),
    /// Reading failed; an empty unnamed buffer was created instead.
    Created { index: usize, error: EditorError },
}

impl OpenOutcome {
    pub fn index(&self) -> usize {
        match self {
            OpenOutcome::Switched(i) | OpenOutcome::Loaded(i) => *i,
            OpenOutcome::Created { index, .. } => *index,
        }
    }
}

#[derive(Debug)]
pub struct BufferPool {
    buffers: Vec<Buffer>,
    current: usize,
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferPool {
    pub fn new() -> Self {
        Self::with_buffer(Buffer::new())
    }

    pub fn with_buffer(buffer: Buffer) -> Self {
        let mut buffers = Vec::with_capacity(POOL_CAPACITY);
        buffers.push(buffer);
        Self {
            buffers,
            current: 0,
        }
    }

    /// Drop everything and start over with one empty buffer.
    pub fn init(&mut self) {
        self.buffers.clear();
        self.buffers.push(Buffer::new());
        self.current = 0;
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
    pub fn is_full(&self) -> bool {
        self.buffers.len() >= POOL_CAPACITY
    }
    pub fn index(&self) -> usize {
        self.current
    }
    pub fn current(&self) -> &Buffer {
        &self.buffers[self.current]
    }
    pub fn current_mut(&mut self) -> &mut Buffer {
        &mut self.buffers[self.current]
    }
    pub fn get(&self, idx: usize) -> Option<&Buffer> {
        self.buffers.get(idx)
    }
    pub fn iter(&self) -> impl Iterator<Item = &Buffer> {
        self.buffers.iter()
    }

    /// Index of the buffer already holding `path`, if any.
    pub fn position_of(&self, path: &Path) -> Option<usize> {
        self.buffers
            .iter()
            .position(|b| b.path().is_some_and(|p| same_file(p, path)))
    }

    /// Open `path`, switching to it when it is already open. A pristine
    /// initial buffer is replaced rather than kept alongside the new one.
    pub fn open(&mut self, path: &Path) -> EditorResult<OpenOutcome> {
        if let Some(idx) = self.position_of(path) {
            self.current = idx;
            debug!(target: "state.pool", index = idx, "open_switched_existing");
            return Ok(OpenOutcome::Switched(idx));
        }
        let replace_initial = self.buffers.len() == 1 && self.buffers[0].is_pristine();
        if !replace_initial && self.is_full() {
            info!(target: "state.pool", capacity = POOL_CAPACITY, "open_rejected_pool_full");
            return Err(EditorError::PoolFull);
        }
        let (buffer, error) = match Buffer::load(path) {
            Ok(b) => (b, None),
            Err(e) => (Buffer::new(), Some(e)),
        };
        let idx = if replace_initial {
            self.buffers[0] = buffer;
            0
        } else {
            self.buffers.push(buffer);
            self.buffers.len() - 1
        };
        self.current = idx;
        debug!(target: "state.pool", index = idx, count = self.buffers.len(), failed = error.is_some(), "open");
        Ok(match error {
            None => OpenOutcome::Loaded(idx),
            Some(error) => OpenOutcome::Created { index: idx, error },
        })
    }

    /// Save the current buffer to `path`, or to its own path when `None`.
    /// Returns the path written.
    pub fn save(&mut self, path: Option<&Path>) -> EditorResult<PathBuf> {
        let target = match path {
            Some(p) => p.to_path_buf(),
            None => self
                .current()
                .path()
                .map(Path::to_path_buf)
                .ok_or(EditorError::NoFileName)?,
        };
        self.current_mut().save_to(&target)?;
        Ok(target)
    }

    pub fn next(&mut self) -> usize {
        self.current = (self.current + 1) % self.buffers.len();
        self.current
    }

    pub fn prev(&mut self) -> usize {
        let n = self.buffers.len();
        self.current = (self.current + n - 1) % n;
        self.current
    }

    /// Release every buffer.
    pub fn free_all(self) {
        debug!(target: "state.pool", count = self.buffers.len(), "free_all");
        drop(self.buffers);
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    }
}
