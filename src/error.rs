//! Crate-level error types.

use std::fmt;

/// Errors produced by the trussview crate.
#[derive(Debug)]
pub enum ViewerError {
    /// A view preset was requested by a name that was never registered.
    PresetNotFound(String),
    /// A projection mode string is neither perspective nor orthographic.
    InvalidMode(String),
    /// A preset, camera configuration, or binding was rejected at
    /// registration time.
    InvalidConfiguration(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Window or event-loop failure.
    Window(String),
}

impl ViewerError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PresetNotFound(name) => {
                write!(f, "view preset '{name}' not registered")
            }
            Self::InvalidMode(mode) => {
                write!(f, "unknown camera mode '{mode}'")
            }
            Self::InvalidConfiguration(msg) => {
                write!(f, "invalid configuration: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Window(msg) => write!(f, "window error: {msg}"),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ViewerError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ViewerError>;
