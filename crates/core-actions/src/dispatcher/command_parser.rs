//! Command line parsing.
//!
//! Converts the text typed after `:` into a `ParsedCommand`. Parsing is
//! pure classification; unrecognized input becomes
//! `ParsedCommand::Unknown`, which the executor reports on the status line.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    /// `w` or `w <name>`.
    Write(Option<PathBuf>),
    WriteQuit,
    Quit,
    Edit(PathBuf),
    NextBuffer,
    PrevBuffer,
    /// `<digits>`: 1-based line number (saturating on overflow).
    Goto(usize),
    /// `set` (show all) or `set key=value`; a bare `set key` means `key=on`.
    Set(Option<(String, String)>),
    Help,
    /// Blank line: nothing to do.
    Empty,
    Unknown(String),
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(raw: &str) -> ParsedCommand {
        let s = raw.trim();
        let body = s.strip_prefix(':').unwrap_or(s).trim();
        if body.is_empty() {
            return ParsedCommand::Empty;
        }
        match body {
            "w" => return ParsedCommand::Write(None),
            "wq" => return ParsedCommand::WriteQuit,
            "q" => return ParsedCommand::Quit,
            "bn" => return ParsedCommand::NextBuffer,
            "bp" => return ParsedCommand::PrevBuffer,
            "h" | "help" => return ParsedCommand::Help,
            "set" => return ParsedCommand::Set(None),
            _ => {}
        }
        if body.bytes().all(|b| b.is_ascii_digit()) {
            return ParsedCommand::Goto(body.parse().unwrap_or(usize::MAX));
        }
        let (name, arg) = match body.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (body, ""),
        };
        match (name, arg.is_empty()) {
            ("w", false) => ParsedCommand::Write(Some(PathBuf::from(arg))),
            ("e", false) => ParsedCommand::Edit(PathBuf::from(arg)),
            ("set", false) => {
                let (key, value) = arg.split_once('=').unwrap_or((arg, "on"));
                ParsedCommand::Set(Some((key.trim().to_string(), value.trim().to_string())))
            }
            _ => ParsedCommand::Unknown(body.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_write_forms() {
        assert_eq!(CommandParser::parse("w"), ParsedCommand::Write(None));
        assert_eq!(
            CommandParser::parse("w  out.txt "),
            ParsedCommand::Write(Some(PathBuf::from("out.txt")))
        );
        assert_eq!(CommandParser::parse("wq"), ParsedCommand::WriteQuit);
    }

    #[test]
    fn parse_quit_and_buffers() {
        assert_eq!(CommandParser::parse(":q"), ParsedCommand::Quit);
        assert_eq!(CommandParser::parse("bn"), ParsedCommand::NextBuffer);
        assert_eq!(CommandParser::parse("bp"), ParsedCommand::PrevBuffer);
    }

    #[test]
    fn parse_edit() {
        match CommandParser::parse("e  foo.txt") {
            ParsedCommand::Edit(p) => assert_eq!(p, PathBuf::from("foo.txt")),
            other => panic!("expected Edit, got {:?}", other),
        }
        assert_eq!(CommandParser::parse("e"), ParsedCommand::Unknown("e".into()));
    }

    #[test]
    fn parse_goto() {
        assert_eq!(CommandParser::parse("42"), ParsedCommand::Goto(42));
        assert_eq!(CommandParser::parse("0"), ParsedCommand::Goto(0));
        assert_eq!(
            CommandParser::parse("99999999999999999999999"),
            ParsedCommand::Goto(usize::MAX)
        );
    }

    #[test]
    fn parse_set() {
        assert_eq!(CommandParser::parse("set"), ParsedCommand::Set(None));
        assert_eq!(
            CommandParser::parse("set tab_width=8"),
            ParsedCommand::Set(Some(("tab_width".into(), "8".into())))
        );
        assert_eq!(
            CommandParser::parse("set syntax"),
            ParsedCommand::Set(Some(("syntax".into(), "on".into())))
        );
    }

    #[test]
    fn parse_help_and_empty() {
        assert_eq!(CommandParser::parse("h"), ParsedCommand::Help);
        assert_eq!(CommandParser::parse("help"), ParsedCommand::Help);
        assert_eq!(CommandParser::parse("   "), ParsedCommand::Empty);
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            CommandParser::parse("doesnotexist"),
            ParsedCommand::Unknown("doesnotexist".into())
        );
    }
}
