//! Editor settings: the `:set` key table and optional TOML file loading.
//!
//! `vte.toml` (or an override path provided by the binary) holds flat keys
//! matching the `:set` names:
//!
//! ```toml
//! tab_width = 4
//! auto_indent = true
//! line_numbers = true
//! expand_tabs = true
//! scroll_offset = 3
//! syntax = true
//! ```
//!
//! Missing keys take their defaults. Out-of-range numbers are clamped at
//! load time and logged. Unknown fields are ignored so older binaries keep
//! reading newer files. A missing or malformed file yields defaults.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const TAB_WIDTH_RANGE: (u8, u8) = (1, 16);
pub const SCROLL_OFFSET_RANGE: (u8, u8) = (0, 20);

/// Runtime settings surface used by the `:set` command.
pub trait ConfigStore {
    /// Current value of `key` rendered as text (`None` for unknown keys).
    fn get(&self, key: &str) -> Option<String>;
    /// Update `key` from text; on success returns the status line to show.
    fn set(&mut self, key: &str, value: &str) -> Result<String, ConfigError>;
    /// Every setting as `key=value` separated by spaces.
    fn show(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {0}")]
    UnknownKey(String),
    #[error("Invalid {key} (must be {min}-{max})")]
    OutOfRange { key: &'static str, min: u8, max: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub tab_width: u8,
    pub auto_indent: bool,
    pub line_numbers: bool,
    pub expand_tabs: bool,
    pub scroll_offset: u8,
    pub syntax: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: 4,
            auto_indent: true,
            line_numbers: true,
            expand_tabs: true,
            scroll_offset: 3,
            syntax: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    TabWidth,
    AutoIndent,
    LineNumbers,
    ExpandTabs,
    ScrollOffset,
    Syntax,
}

impl Key {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "tabwidth" | "tab_width" => Key::TabWidth,
            "autoindent" | "auto_indent" => Key::AutoIndent,
            "linenumbers" | "line_numbers" => Key::LineNumbers,
            "expandtabs" | "expand_tabs" => Key::ExpandTabs,
            "scrolloffset" | "scroll_offset" => Key::ScrollOffset,
            "syntax" | "syntax_enabled" => Key::Syntax,
            _ => return None,
        })
    }

    fn name(self) -> &'static str {
        match self {
            Key::TabWidth => "tab_width",
            Key::AutoIndent => "auto_indent",
            Key::LineNumbers => "line_numbers",
            Key::ExpandTabs => "expand_tabs",
            Key::ScrollOffset => "scroll_offset",
            Key::Syntax => "syntax",
        }
    }

    const ALL: [Key; 6] = [
        Key::TabWidth,
        Key::AutoIndent,
        Key::LineNumbers,
        Key::ExpandTabs,
        Key::ScrollOffset,
        Key::Syntax,
    ];
}

/// `true`, `1`, `on` and `yes` are true; anything else is false.
pub fn parse_bool(value: &str) -> bool {
    matches!(value.trim(), "true" | "1" | "on" | "yes")
}

fn on_off(v: bool) -> &'static str {
    if v { "on" } else { "off" }
}

fn parse_ranged(key: Key, value: &str, (min, max): (u8, u8)) -> Result<u8, ConfigError> {
    match value.trim().parse::<u8>() {
        Ok(v) if (min..=max).contains(&v) => Ok(v),
        _ => Err(ConfigError::OutOfRange {
            key: key.name(),
            min,
            max,
        }),
    }
}

impl EditorConfig {
    fn value_of(&self, key: Key) -> String {
        match key {
            Key::TabWidth => self.tab_width.to_string(),
            Key::AutoIndent => on_off(self.auto_indent).to_string(),
            Key::LineNumbers => on_off(self.line_numbers).to_string(),
            Key::ExpandTabs => on_off(self.expand_tabs).to_string(),
            Key::ScrollOffset => self.scroll_offset.to_string(),
            Key::Syntax => on_off(self.syntax).to_string(),
        }
    }

    /// Clamp numeric settings into their valid ranges, logging adjustments.
    pub fn clamp(&mut self) {
        let (lo, hi) = TAB_WIDTH_RANGE;
        let tab = self.tab_width.clamp(lo, hi);
        if tab != self.tab_width {
            info!(target: "config", raw = self.tab_width, clamped = tab, "tab_width_clamped");
            self.tab_width = tab;
        }
        let (lo, hi) = SCROLL_OFFSET_RANGE;
        let off = self.scroll_offset.clamp(lo, hi);
        if off != self.scroll_offset {
            info!(target: "config", raw = self.scroll_offset, clamped = off, "scroll_offset_clamped");
            self.scroll_offset = off;
        }
    }

    /// Text inserted for a Tab key press.
    pub fn tab_text(&self) -> String {
        if self.expand_tabs {
            " ".repeat(usize::from(self.tab_width))
        } else {
            "\t".to_string()
        }
    }
}

impl ConfigStore for EditorConfig {
    fn get(&self, key: &str) -> Option<String> {
        Key::parse(key).map(|k| self.value_of(k))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<String, ConfigError> {
        let k = Key::parse(key).ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        match k {
            Key::TabWidth => self.tab_width = parse_ranged(k, value, TAB_WIDTH_RANGE)?,
            Key::AutoIndent => self.auto_indent = parse_bool(value),
            Key::LineNumbers => self.line_numbers = parse_bool(value),
            Key::ExpandTabs => self.expand_tabs = parse_bool(value),
            Key::ScrollOffset => self.scroll_offset = parse_ranged(k, value, SCROLL_OFFSET_RANGE)?,
            Key::Syntax => self.syntax = parse_bool(value),
        }
        debug!(target: "config", key = k.name(), "setting_changed");
        Ok(format!("{} = {}", k.name(), self.value_of(k)))
    }

    fn show(&self) -> String {
        Key::ALL
            .iter()
            .map(|k| format!("{}={}", k.name(), self.value_of(*k)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("vte.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("vte").join("vte.toml");
    }
    PathBuf::from("vte.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<EditorConfig> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        debug!(target: "config", path = %path.display(), "config_file_absent");
        return Ok(EditorConfig::default());
    };
    match toml::from_str::<EditorConfig>(&content) {
        Ok(mut cfg) => {
            cfg.clamp();
            Ok(cfg)
        }
        Err(e) => {
            info!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(EditorConfig::default())
        }
    }
}
