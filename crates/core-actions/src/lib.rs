//! Editing behavior: the mode state machine, navigation/search and mouse
//! mapping. Hosts feed `core_events::InputEvent`s into `Editor::handle` and
//! paint the `Frame` returned by `Editor::frame`.

pub mod dispatcher;
pub mod mouse;
pub mod navigation;

pub use dispatcher::{
    CommandParser, DispatchResult, Editor, HELP_LINES, ModeState, ParsedCommand,
};
pub use mouse::map_click;
pub use navigation::{NavState, SearchOutcome, calc_line_num_width, goto_line};
