//! Appearance preferences controlled from the settings terminal

use serde::{Deserialize, Serialize};

use crate::command::Effect;

pub const MIN_FONT_SIZE: u8 = 12;
pub const MAX_FONT_SIZE: u8 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Grid,
    List,
}

impl Layout {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "grid" => Some(Layout::Grid),
            "list" => Some(Layout::List),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Grid => "grid",
            Layout::List => "list",
        }
    }
}

/// Session-wide appearance state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub theme: Theme,
    /// `None` keeps the stylesheet default
    pub font_size: Option<u8>,
    pub layout: Layout,
    pub animations: bool,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            font_size: None,
            layout: Layout::default(),
            animations: true,
        }
    }
}

impl Appearance {
    /// Apply an effect; returns true if it touched appearance
    pub fn apply(&mut self, effect: &Effect) -> bool {
        match *effect {
            Effect::SetTheme(theme) => self.theme = theme,
            Effect::SetFontSize(size) => self.font_size = Some(size),
            Effect::SetLayout(layout) => self.layout = layout,
            Effect::SetAnimations(on) => self.animations = on,
            _ => return false,
        }
        true
    }
}

/// Parse an `on`/`off` switch
pub fn parse_switch(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" => Some(true),
        "off" => Some(false),
        _ => None,
    }
}

/// Parse a font size within the accepted range. Only the leading digits
/// count, so `12.5` and `16px` read as 12 and 16.
pub fn parse_font_size(value: &str) -> Option<u8> {
    let value = value.trim_start();
    let digits = value
        .find(|c: char| !c.is_ascii_digit())
        .map_or(value, |end| &value[..end]);
    digits
        .parse::<u8>()
        .ok()
        .filter(|size| (MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(size))
}
