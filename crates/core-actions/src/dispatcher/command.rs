//! Prompt editing for Command / Search mode and `:` command execution.
//!
//! Both prompts are single-line `LineEdit` sessions. Enter hands the text to
//! the executor and returns to Normal; Esc (or Backspace on an empty prompt)
//! abandons it. Every failure is reported through the status line and never
//! leaves the editor in a partial state.

use super::command_parser::{CommandParser, ParsedCommand};
use super::{DispatchResult, Editor, ModeState, search};
use crate::navigation::goto_line;
use core_config::ConfigStore;
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_state::EditorError;
use core_text::LineEdit;
use std::path::Path;
use tracing::{debug, info};

/// Help screen shown by `:h` / `:help`.
pub const HELP_LINES: &[&str] = &[
    "vte - modal line editor",
    "",
    "Normal mode",
    "  h j k l / arrows   move",
    "  0 $ Home End       line start / end",
    "  PageUp PageDown    scroll a page",
    "  i a                insert / append",
    "  x                  delete character",
    "  u  Ctrl-R          undo / redo",
    "  /pattern  n  N     search, next, previous",
    "  :                  command line",
    "",
    "Commands",
    "  :w [name]          write",
    "  :wq                write and quit",
    "  :q                 quit",
    "  :e <path>          open file",
    "  :bn  :bp           next / previous buffer",
    "  :<number>          go to line",
    "  :set [key=value]   show or change settings",
    "  :h  :help          this screen",
    "",
    "Press any key to return.",
];

pub(super) fn handle_prompt_key(
    ed: &mut Editor,
    mut prompt: LineEdit,
    key: KeyEvent,
    search: bool,
) -> DispatchResult {
    match key.code {
        KeyCode::Esc => return DispatchResult::dirty(),
        KeyCode::Backspace if prompt.is_empty() => return DispatchResult::dirty(),
        KeyCode::Enter => {
            let text = prompt.commit();
            return if search {
                search::execute(ed, &text)
            } else {
                execute(ed, &text)
            };
        }
        KeyCode::Backspace => {
            prompt.backspace();
        }
        KeyCode::Delete => {
            prompt.delete();
        }
        KeyCode::Left => prompt.move_left(),
        KeyCode::Right => prompt.move_right(),
        KeyCode::Home => prompt.home(),
        KeyCode::End => prompt.end(),
        KeyCode::Char(c) if !key.mods.contains(KeyModifiers::CTRL) && !c.is_control() => {
            prompt.insert(c);
        }
        _ => {}
    }
    ed.mode = if search {
        ModeState::Search(prompt)
    } else {
        ModeState::Command(prompt)
    };
    DispatchResult::dirty()
}

pub(super) fn execute(ed: &mut Editor, raw: &str) -> DispatchResult {
    let parsed = CommandParser::parse(raw);
    info!(target: "actions.command", command = ?parsed, "execute");
    match parsed {
        ParsedCommand::Write(path) => {
            write(ed, path.as_deref());
            DispatchResult::dirty()
        }
        ParsedCommand::WriteQuit => {
            if write(ed, None) {
                DispatchResult::quit()
            } else {
                DispatchResult::dirty()
            }
        }
        ParsedCommand::Quit => DispatchResult::quit(),
        ParsedCommand::Edit(path) => ed.open(&path),
        ParsedCommand::NextBuffer => switch_buffer(ed, true),
        ParsedCommand::PrevBuffer => switch_buffer(ed, false),
        ParsedCommand::Goto(n) => {
            let layout = ed.layout;
            let (buffer, view) = ed.parts();
            if let Err(e) = goto_line(buffer, view, &layout, n) {
                ed.set_error(e);
            }
            DispatchResult::dirty()
        }
        ParsedCommand::Set(None) => {
            ed.status = ed.config.show();
            DispatchResult::dirty()
        }
        ParsedCommand::Set(Some((key, value))) => {
            ed.status = match ed.config.set(&key, &value) {
                Ok(msg) => msg,
                Err(e) => EditorError::Config(e.to_string()).to_string(),
            };
            DispatchResult::dirty()
        }
        ParsedCommand::Help => {
            ed.help_visible = true;
            DispatchResult::dirty()
        }
        ParsedCommand::Empty => DispatchResult::dirty(),
        ParsedCommand::Unknown(cmd) => {
            ed.set_error(EditorError::UnknownCommand(cmd));
            DispatchResult::dirty()
        }
    }
}

/// Save the current buffer; `true` on success.
fn write(ed: &mut Editor, path: Option<&Path>) -> bool {
    match ed.pool.save(path) {
        Ok(written) => {
            let lines = ed.buffer().line_count();
            debug!(target: "actions.command", path = %written.display(), lines, "write_ok");
            ed.status = format!("\"{}\" {} lines written", written.display(), lines);
            true
        }
        Err(e) => {
            ed.set_error(e);
            false
        }
    }
}

fn switch_buffer(ed: &mut Editor, forward: bool) -> DispatchResult {
    let idx = if forward { ed.pool.next() } else { ed.pool.prev() };
    debug!(target: "actions.command", index = idx, "switch_buffer");
    ed.status = format!(
        "\"{}\" [{}/{}]",
        ed.buffer().display_name(),
        idx + 1,
        ed.pool.len()
    );
    DispatchResult::buffer_switched()
}
