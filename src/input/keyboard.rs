use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

/// A keyboard key the viewer can bind.
///
/// Parsing accepts both bare names (`"1"`, `"r"`, `"Escape"`) and the
/// physical key-code names produced by windowing toolkits (`"Digit1"`,
/// `"Numpad1"`, `"KeyR"`). Letters are case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Number row or numpad digit `0..=9`.
    Digit(u8),
    /// Letter key, stored lowercase.
    Letter(char),
    /// Function key `F1..=F24`.
    Function(u8),
    /// The escape key.
    Escape,
}

impl Key {
    /// Parse a key name. Returns `None` for names the viewer doesn't know.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::from_char(c);
        }

        if name.eq_ignore_ascii_case("escape") || name.eq_ignore_ascii_case("esc") {
            return Some(Self::Escape);
        }
        for prefix in ["Digit", "Numpad"] {
            if let Some(rest) = strip_prefix_ignore_case(name, prefix) {
                return single_char(rest)
                    .filter(char::is_ascii_digit)
                    .and_then(Self::from_char);
            }
        }
        if let Some(rest) = strip_prefix_ignore_case(name, "Key") {
            return single_char(rest)
                .filter(char::is_ascii_alphabetic)
                .and_then(Self::from_char);
        }
        if let Some(rest) = strip_prefix_ignore_case(name, "F") {
            return rest
                .parse::<u8>()
                .ok()
                .filter(|n| (1..=24).contains(n))
                .map(Self::Function);
        }
        None
    }

    fn from_char(c: char) -> Option<Self> {
        if let Some(d) = c.to_digit(10) {
            return u8::try_from(d).ok().map(Self::Digit);
        }
        c.is_ascii_alphabetic()
            .then(|| Self::Letter(c.to_ascii_lowercase()))
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &s[prefix.len()..])
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{d}"),
            Self::Letter(c) => write!(f, "{c}"),
            Self::Function(n) => write!(f, "F{n}"),
            Self::Escape => f.write_str("Escape"),
        }
    }
}

impl FromStr for Key {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
            .ok_or_else(|| ViewerError::config(format!("unknown key name '{s}'")))
    }
}

/// Viewer-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML options stay readable:
/// ```toml
/// [keybindings.actions]
/// reset_camera = "r"
/// cycle_colormap = "c"
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Restore the initial camera and re-frame the model.
    ResetCamera,
    /// Show or hide the deformed-mesh overlay.
    ToggleDeformed,
    /// Advance to the next colormap.
    CycleColormap,
    /// Close the viewer.
    Exit,
}
