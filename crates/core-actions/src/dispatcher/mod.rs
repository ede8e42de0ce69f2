//! Mode state machine applying input events to the editor.
//!
//! Sub-modules:
//! * `mode`    - Normal mode key table and mode transitions
//! * `motion`  - cursor movement
//! * `edit`    - Insert mode, driving the line-edit session
//! * `command` - prompt editing and `:` command execution
//! * `search`  - `/` execution and `n` / `N` repeats
//! * `undo`    - undo / redo dispatch
//!
//! Every event is processed to completion (mutation, undo recording, cache
//! invalidation, scroll adjustment) before `handle` returns.

use crate::navigation::NavState;
use core_config::EditorConfig;
use core_events::{InputEvent, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use core_model::{
    Frame, FrameSource, Layout, StatusContext, View, cursor_visual_row, format_status,
};
use core_state::{Buffer, BufferPool, EditorError, Mode, OpenOutcome};
use core_text::{LineEdit, Position, display_col};
use std::path::Path;
use tracing::{debug, trace};

mod command;
mod command_parser;
mod edit;
mod mode;
mod motion;
mod search;
mod undo;

pub use command::HELP_LINES;
pub use command_parser::{CommandParser, ParsedCommand};

/// Result of handling a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
    /// The current buffer changed identity (`:e`, `:bn`, `:bp`); renderers
    /// must drop anything cached for the previous one.
    pub buffer_switched: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
            buffer_switched: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
            buffer_switched: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
            buffer_switched: false,
        }
    }
    pub fn buffer_switched() -> Self {
        Self {
            dirty: true,
            quit: false,
            buffer_switched: true,
        }
    }
}

/// Current mode together with the data only that mode owns.
#[derive(Debug, Default)]
pub enum ModeState {
    #[default]
    Normal,
    /// Session over the document line under the cursor.
    Insert(LineEdit),
    /// Text typed after `:`.
    Command(LineEdit),
    /// Pattern typed after `/`.
    Search(LineEdit),
}

impl ModeState {
    pub fn mode(&self) -> Mode {
        match self {
            ModeState::Normal => Mode::Normal,
            ModeState::Insert(_) => Mode::Insert,
            ModeState::Command(_) => Mode::Command,
            ModeState::Search(_) => Mode::Search,
        }
    }
}

pub struct Editor {
    pool: BufferPool,
    /// One view per pool slot, same indices.
    views: Vec<View>,
    mode: ModeState,
    nav: NavState,
    config: EditorConfig,
    layout: Layout,
    size: (u16, u16),
    status: String,
    help_visible: bool,
    quit: bool,
}

impl Editor {
    /// Editor over a single empty buffer on a `cols` x `rows` terminal.
    pub fn new(config: EditorConfig, cols: u16, rows: u16) -> Self {
        Self::with_pool(BufferPool::new(), config, cols, rows)
    }

    pub fn with_buffer(buffer: Buffer, config: EditorConfig, cols: u16, rows: u16) -> Self {
        Self::with_pool(BufferPool::with_buffer(buffer), config, cols, rows)
    }

    pub fn with_pool(pool: BufferPool, config: EditorConfig, cols: u16, rows: u16) -> Self {
        let views = vec![View::default(); pool.len()];
        let mut editor = Self {
            pool,
            views,
            mode: ModeState::Normal,
            nav: NavState::new(),
            config,
            layout: Layout::compute(cols, rows, 0),
            size: (cols, rows),
            status: String::new(),
            help_visible: false,
            quit: false,
        };
        editor.sync_layout();
        editor
    }

    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }
    pub fn mode_state(&self) -> &ModeState {
        &self.mode
    }
    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }
    pub fn buffer(&self) -> &Buffer {
        self.pool.current()
    }
    pub fn view(&self) -> &View {
        &self.views[self.pool.index()]
    }
    pub fn cursor(&self) -> Position {
        self.view().cursor
    }
    pub fn layout(&self) -> &Layout {
        &self.layout
    }
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }
    pub fn nav(&self) -> &NavState {
        &self.nav
    }
    pub fn status(&self) -> &str {
        &self.status
    }
    pub fn help_visible(&self) -> bool {
        self.help_visible
    }
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Text of line `idx` as the user currently sees it: the live session
    /// text for the line being edited, the buffer copy otherwise.
    pub fn line_text(&self, idx: usize) -> Option<&str> {
        match &self.mode {
            ModeState::Insert(session) if idx == self.cursor().line => Some(session.as_str()),
            _ => self.buffer().line(idx),
        }
    }

    /// Release every buffer.
    pub fn shutdown(self) {
        self.pool.free_all();
    }

    /// Open `path` into the pool (used for command-line arguments and `:e`).
    pub fn open(&mut self, path: &Path) -> DispatchResult {
        let result = match self.pool.open(path) {
            Ok(outcome) => {
                let idx = outcome.index();
                match &outcome {
                    OpenOutcome::Switched(_) => {}
                    _ if idx < self.views.len() => self.views[idx] = View::default(),
                    _ => self.views.push(View::default()),
                }
                self.status = match outcome {
                    OpenOutcome::Created { error, .. } => error.to_string(),
                    _ => format!(
                        "\"{}\" {} lines",
                        self.buffer().display_name(),
                        self.buffer().line_count()
                    ),
                };
                DispatchResult::buffer_switched()
            }
            Err(e) => {
                self.status = e.to_string();
                DispatchResult::dirty()
            }
        };
        self.sync_layout();
        result
    }

    /// Process one event to completion.
    pub fn handle(&mut self, event: InputEvent) -> DispatchResult {
        let result = match event {
            InputEvent::Resize(cols, rows) => {
                debug!(target: "actions.dispatch", cols, rows, "resize");
                self.size = (cols, rows);
                DispatchResult::dirty()
            }
            InputEvent::Mouse(m) => self.handle_mouse(m),
            InputEvent::Key(k) => self.handle_key(k),
        };
        self.sync_layout();
        self.scroll_to_cursor();
        if result.quit {
            self.quit = true;
        }
        result
    }

    fn handle_key(&mut self, key: KeyEvent) -> DispatchResult {
        trace!(target: "actions.dispatch", mode = ?self.mode.mode(), %key, "key");
        if self.help_visible {
            self.help_visible = false;
            return DispatchResult::dirty();
        }
        match std::mem::take(&mut self.mode) {
            ModeState::Normal => mode::handle_normal_key(self, key),
            ModeState::Insert(session) => edit::handle_insert_key(self, session, key),
            ModeState::Command(prompt) => command::handle_prompt_key(self, prompt, key, false),
            ModeState::Search(prompt) => command::handle_prompt_key(self, prompt, key, true),
        }
    }

    fn handle_mouse(&mut self, m: MouseEvent) -> DispatchResult {
        if m.kind != MouseEventKind::Down(MouseButton::Left) || self.help_visible {
            return DispatchResult::clean();
        }
        match std::mem::take(&mut self.mode) {
            ModeState::Insert(session) => edit::handle_insert_click(self, session, m),
            ModeState::Normal => match self.map_click(m) {
                Some(pos) => {
                    self.view_mut().cursor = pos;
                    DispatchResult::dirty()
                }
                None => DispatchResult::clean(),
            },
            other => {
                self.mode = other;
                DispatchResult::clean()
            }
        }
    }

    fn map_click(&mut self, m: MouseEvent) -> Option<Position> {
        let idx = self.pool.index();
        let scroll = self.views[idx].scroll_row;
        crate::mouse::map_click(self.pool.current_mut(), &self.layout, scroll, m.column, m.row)
    }

    fn view_mut(&mut self) -> &mut View {
        let idx = self.pool.index();
        &mut self.views[idx]
    }

    /// Split borrow of the current buffer and its view.
    fn parts(&mut self) -> (&mut Buffer, &mut View) {
        let idx = self.pool.index();
        (self.pool.current_mut(), &mut self.views[idx])
    }

    fn set_error(&mut self, err: EditorError) {
        debug!(target: "actions.dispatch", error = %err, "status_error");
        self.status = err.to_string();
    }

    /// Recompute gutter and text width and push the wrap width to the buffer.
    fn sync_layout(&mut self) {
        let digits = self.nav.update_line_num_width(self.pool.current().line_count());
        let gutter = if self.config.line_numbers { digits } else { 0 };
        self.layout = Layout::compute(self.size.0, self.size.1, gutter);
        let width = self.layout.text_width;
        self.pool.current_mut().set_wrap_width(width);
    }

    /// Keep the cursor inside the document and its visual row on screen.
    fn scroll_to_cursor(&mut self) {
        let idx = self.pool.index();
        let buffer = self.pool.current_mut();
        let view = &mut self.views[idx];
        let row = match &self.mode {
            ModeState::Insert(session) => cursor_visual_row(
                buffer,
                view.cursor.line,
                session.as_str(),
                session.cursor(),
                self.layout.text_width,
            ),
            _ => {
                view.cursor = buffer.clamp(view.cursor);
                let text = buffer.line(view.cursor.line).unwrap_or_default().to_string();
                cursor_visual_row(buffer, view.cursor.line, &text, view.cursor.byte, self.layout.text_width)
            }
        };
        if view.reveal(row, self.layout.text_rows, usize::from(self.config.scroll_offset)) {
            trace!(target: "actions.dispatch", scroll_row = view.scroll_row, "scroll");
        }
    }

    /// Snapshot of everything the renderer draws.
    pub fn frame(&mut self) -> Frame {
        let idx = self.pool.index();
        let cursor = self.views[idx].cursor;
        let (active_line, col) = match &self.mode {
            ModeState::Insert(session) => (
                Some(session.as_str()),
                display_col(session.as_str(), session.cursor()),
            ),
            _ => {
                let text = self.pool.current().line(cursor.line).unwrap_or_default();
                (None, display_col(text, cursor.byte))
            }
        };
        let buffer = self.pool.current();
        let name = buffer.display_name();
        let status = format_status(&StatusContext {
            mode: self.mode.mode(),
            file_name: &name,
            buffer_index: idx,
            buffer_count: self.pool.len(),
            dirty: buffer.is_dirty(),
            line: cursor.line,
            col,
            width: usize::from(self.size.0),
        });
        let (message, prompt_cursor) = match &self.mode {
            ModeState::Command(p) => (
                format!(":{}", p.as_str()),
                Some(1 + display_col(p.as_str(), p.cursor())),
            ),
            ModeState::Search(p) => (
                format!("/{}", p.as_str()),
                Some(1 + display_col(p.as_str(), p.cursor())),
            ),
            _ => (self.status.clone(), None),
        };
        let overlay = self
            .help_visible
            .then(|| HELP_LINES.iter().map(|l| l.to_string()).collect());
        Frame::build(FrameSource {
            buffer: self.pool.current_mut(),
            view: &self.views[idx],
            layout: &self.layout,
            active_line,
            status,
            message,
            prompt_cursor,
            overlay,
        })
    }
}
