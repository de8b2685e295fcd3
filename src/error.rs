//! Error types for cellwrap.

use std::fmt;
use std::io;

/// Result type alias for cellwrap operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for cellwrap operations.
///
/// Width and wrap computations are total; errors only come from writing to
/// an output sink or from rejecting a configuration.
#[derive(Debug)]
pub enum Error {
    /// I/O error from the output sink.
    Io(io::Error),
    /// A configured breakpoint is not exactly one column wide.
    InvalidBreakpoint { ch: char, width: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidBreakpoint { ch, width } => {
                write!(
                    f,
                    "invalid breakpoint {ch:?}: breakpoints must be 1 column wide, got {width}"
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::InvalidBreakpoint { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
