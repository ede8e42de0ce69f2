mod common;
use common::*;

use core_events::KeyCode;
use core_state::Mode;
use core_text::{MAX_LINE_BYTES, Position};
use pretty_assertions::assert_eq;

#[test]
fn session_text_reaches_buffer_on_escape() {
    let mut ed = editor(&["abc"]);
    key(&mut ed, KeyCode::Char('a'));
    typed(&mut ed, "é世");
    assert_eq!(lines(&ed), vec!["aé世bc"]);
    assert_eq!(buffer_lines(&ed), vec!["abc"]);
    key(&mut ed, KeyCode::Esc);
    assert_eq!(ed.mode(), Mode::Normal);
    assert_eq!(buffer_lines(&ed), vec!["aé世bc"]);
    assert_eq!(ed.cursor(), Position::new(0, 6));
    assert!(ed.buffer().is_dirty());
}

#[test]
fn backspace_at_column_zero_joins_previous_line() {
    let mut ed = editor(&["ab", "cd"]);
    key(&mut ed, KeyCode::Char('j'));
    key(&mut ed, KeyCode::Char('i'));
    key(&mut ed, KeyCode::Backspace);
    assert_eq!(lines(&ed), vec!["abcd"]);
    assert_eq!(ed.cursor(), Position::new(0, 2));
    key(&mut ed, KeyCode::Backspace);
    assert_eq!(lines(&ed), vec!["acd"]);
    assert_eq!(ed.cursor(), Position::new(0, 1));
}

#[test]
fn backspace_on_first_line_start_does_nothing() {
    let mut ed = editor(&["ab"]);
    key(&mut ed, KeyCode::Char('i'));
    let r = key(&mut ed, KeyCode::Backspace);
    assert!(!r.dirty);
    assert_eq!(lines(&ed), vec!["ab"]);
    assert!(ed.buffer().history().is_empty());
}

#[test]
fn delete_inside_line_and_at_end_joins_next() {
    let mut ed = editor(&["ab", "cd"]);
    key(&mut ed, KeyCode::Char('i'));
    key(&mut ed, KeyCode::Delete);
    assert_eq!(lines(&ed), vec!["b", "cd"]);
    key(&mut ed, KeyCode::End);
    key(&mut ed, KeyCode::Delete);
    assert_eq!(lines(&ed), vec!["bcd"]);
    assert_eq!(ed.cursor(), Position::new(0, 1));
    // nothing left to join on the last line
    key(&mut ed, KeyCode::End);
    assert!(!key(&mut ed, KeyCode::Delete).dirty);
}

#[test]
fn tab_follows_expand_tabs_setting() {
    let mut ed = editor(&[""]);
    key(&mut ed, KeyCode::Char('i'));
    key(&mut ed, KeyCode::Tab);
    assert_eq!(lines(&ed), vec!["    "]);
    key(&mut ed, KeyCode::Esc);
    command(&mut ed, "set expand_tabs=off");
    key(&mut ed, KeyCode::Char('a'));
    key(&mut ed, KeyCode::Tab);
    assert_eq!(lines(&ed), vec!["    \t"]);
}

#[test]
fn vertical_moves_commit_and_rebegin() {
    let mut ed = editor(&["abcd", "x"]);
    key(&mut ed, KeyCode::Char('$'));
    key(&mut ed, KeyCode::Char('i'));
    typed(&mut ed, "e");
    key(&mut ed, KeyCode::Down);
    assert_eq!(buffer_lines(&ed), vec!["abcde", "x"]);
    assert_eq!(ed.cursor(), Position::new(1, 1));
    key(&mut ed, KeyCode::Up);
    assert_eq!(ed.cursor(), Position::new(0, 1));
    assert_eq!(ed.mode(), Mode::Insert);
}

#[test]
fn left_right_home_end_move_within_session() {
    let mut ed = editor(&["a世b"]);
    key(&mut ed, KeyCode::Char('i'));
    key(&mut ed, KeyCode::Right);
    key(&mut ed, KeyCode::Right);
    assert_eq!(ed.cursor().byte, 4);
    key(&mut ed, KeyCode::Left);
    assert_eq!(ed.cursor().byte, 1);
    key(&mut ed, KeyCode::End);
    assert_eq!(ed.cursor().byte, 5);
    key(&mut ed, KeyCode::Home);
    assert_eq!(ed.cursor().byte, 0);
}

#[test]
fn insert_past_line_limit_is_rejected_silently() {
    let full = "a".repeat(MAX_LINE_BYTES);
    let mut ed = editor(&[full.as_str()]);
    key(&mut ed, KeyCode::Char('i'));
    let r = key(&mut ed, KeyCode::Char('b'));
    assert!(!r.dirty);
    assert_eq!(ed.status(), "");
    key(&mut ed, KeyCode::Esc);
    assert_eq!(ed.buffer().line_len(0), MAX_LINE_BYTES);
    assert!(!ed.buffer().is_dirty());
}

#[test]
fn edits_are_recorded_and_undo_in_reverse() {
    let mut ed = editor(&["ab"]);
    key(&mut ed, KeyCode::Char('a'));
    typed(&mut ed, "X");
    key(&mut ed, KeyCode::Enter);
    typed(&mut ed, "Y");
    key(&mut ed, KeyCode::Esc);
    assert_eq!(buffer_lines(&ed), vec!["aX", "Yb"]);
    assert_eq!(ed.buffer().history().undo_depth(), 3);

    key(&mut ed, KeyCode::Char('u'));
    assert_eq!(buffer_lines(&ed), vec!["aX", "b"]);
    key(&mut ed, KeyCode::Char('u'));
    assert_eq!(buffer_lines(&ed), vec!["aXb"]);
    key(&mut ed, KeyCode::Char('u'));
    assert_eq!(buffer_lines(&ed), vec!["ab"]);
    key(&mut ed, KeyCode::Char('u'));
    assert_eq!(ed.status(), "Already at oldest change");

    ctrl(&mut ed, 'r');
    ctrl(&mut ed, 'r');
    assert_eq!(buffer_lines(&ed), vec!["aX", "b"]);
    assert_eq!(ed.buffer().history().redo_depth(), 1);
}

#[test]
fn undo_restores_cursor_to_edit_offset() {
    let mut ed = editor(&["", "xyz"]);
    key(&mut ed, KeyCode::Char('j'));
    key(&mut ed, KeyCode::Char('l'));
    key(&mut ed, KeyCode::Char('i'));
    typed(&mut ed, "é");
    assert_eq!(ed.buffer().history().undo_depth(), 1);
    key(&mut ed, KeyCode::Esc);
    assert_eq!(ed.cursor(), Position::new(1, 3));
    key(&mut ed, KeyCode::Char('u'));
    assert_eq!(buffer_lines(&ed), vec!["", "xyz"]);
    assert_eq!(ed.cursor(), Position::new(1, 1));
}

#[test]
fn click_in_insert_mode_moves_session() {
    let mut ed = editor(&["hello", "world"]);
    key(&mut ed, KeyCode::Char('i'));
    typed(&mut ed, "!");
    // gutter is 4 columns wide
    click(&mut ed, 7, 1);
    assert_eq!(ed.mode(), Mode::Insert);
    assert_eq!(buffer_lines(&ed), vec!["!hello", "world"]);
    assert_eq!(ed.cursor(), Position::new(1, 3));
}
