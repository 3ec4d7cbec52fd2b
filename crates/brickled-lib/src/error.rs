//! Unified error type for the brickled-lib crate.
//!
//! [`BrickledError`] wraps I/O failures and the domain-specific error kinds
//! (`Settings`, `Config`, `Command`, `Color`). `From` impls allow `?` to
//! propagate across module boundaries.

use std::fmt;

/// Unified error type for brickled-lib operations.
#[derive(Debug)]
pub enum BrickledError {
    /// Standard I/O error (settings file, config persistence, control files).
    Io(std::io::Error),
    /// Settings file could not be read or written.
    Settings(String),
    /// Configuration validation error.
    Config(String),
    /// External command failed to start, timed out, or exited non-zero.
    Command(String),
    /// Color parsing error.
    Color(String),
}

impl fmt::Display for BrickledError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrickledError::Io(e) => write!(f, "I/O error: {e}"),
            BrickledError::Settings(e) => write!(f, "Settings error: {e}"),
            BrickledError::Config(e) => write!(f, "Config error: {e}"),
            BrickledError::Command(e) => write!(f, "Command error: {e}"),
            BrickledError::Color(e) => write!(f, "Color error: {e}"),
        }
    }
}

impl std::error::Error for BrickledError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BrickledError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BrickledError {
    fn from(e: std::io::Error) -> Self {
        BrickledError::Io(e)
    }
}

/// Crate-level Result alias using [`BrickledError`].
pub type Result<T> = std::result::Result<T, BrickledError>;
