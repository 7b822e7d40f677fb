//! Light/dark colour theme.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::Rgba;

/// Page colour theme. Persisted as `"dark"` or `"light"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Switch to the other theme.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Glyph shown on the theme toggle.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "☾",
            Theme::Light => "☀",
        }
    }

    /// Colours used for this theme.
    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                sky_base: Rgba::rgb(4, 7, 20),
                panel: Rgba::rgb(12, 18, 38),
                text: Rgba::rgb(226, 232, 245),
                muted: Rgba::rgb(120, 134, 170),
                accent: Rgba::rgb(118, 185, 224),
                track: Rgba::rgb(32, 42, 70),
            },
            Theme::Light => Palette {
                sky_base: Rgba::rgb(38, 56, 104),
                panel: Rgba::rgb(238, 242, 250),
                text: Rgba::rgb(24, 30, 48),
                muted: Rgba::rgb(96, 106, 132),
                accent: Rgba::rgb(55, 66, 221),
                track: Rgba::rgb(204, 212, 232),
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseThemeError(pub String);

impl fmt::Display for ParseThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme `{}` (expected `dark` or `light`)", self.0)
    }
}

impl std::error::Error for ParseThemeError {}

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(ParseThemeError(s.to_string())),
        }
    }
}

/// Colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Opaque colour behind the sky canvas.
    pub sky_base: Rgba,
    /// Background of content panels.
    pub panel: Rgba,
    pub text: Rgba,
    pub muted: Rgba,
    pub accent: Rgba,
    /// Unfilled part of a skill bar.
    pub track: Rgba,
}
