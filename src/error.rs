//! Crate-level error types.

use std::fmt;

/// Errors produced by the view-animation crate.
///
/// Per-frame updates never fail; these only surface when an animation or
/// bounds region is constructed from bad input, or when options are read
/// from disk.
#[derive(Debug)]
pub enum AnimationError {
    /// A constructor argument violated its contract (non-positive duration,
    /// zero-length direction, degenerate bounds, non-finite input).
    InvalidParameter(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl AnimationError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

impl fmt::Display for AnimationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(msg) => {
                write!(f, "invalid parameter: {msg}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for AnimationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AnimationError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
