//! Theme preference and its indicator icon.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Light or dark display theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Flip between dark and light.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Name used for persistence and display.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Indicator icon matching this theme.
    pub fn icon(self) -> Icon {
        match self {
            Theme::Dark => Icon::Moon,
            Theme::Light => Icon::Sun,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(Error::UnknownTheme(s.to_string())),
        }
    }
}

impl TryFrom<String> for Theme {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Status icon shown on the theme toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Moon,
    Sun,
}

impl Icon {
    /// Symbol drawn for the icon.
    pub fn symbol(self) -> char {
        match self {
            Icon::Moon => '☾',
            Icon::Sun => '☀',
        }
    }

    /// Short class-like name of the icon.
    pub fn name(self) -> &'static str {
        match self {
            Icon::Moon => "moon",
            Icon::Sun => "sun",
        }
    }
}
