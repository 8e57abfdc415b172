use core::fmt;

use std::io;

use listfilter::FilterError;

/// Errors that can occur while building or running a [`TuiApp`](crate::TuiApp).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiError {
    /// Low level terminal I/O failure.
    Io(String),
    /// The filtering core rejected an item.
    Filter(FilterError),
}

impl fmt::Display for TuiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(message) => write!(f, "terminal I/O error: {message}"),
            Self::Filter(err) => write!(f, "filter error: {err}"),
        }
    }
}

impl std::error::Error for TuiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Filter(err) => Some(err),
            Self::Io(_) => None,
        }
    }
}

impl From<io::Error> for TuiError {
    fn from(value: io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<FilterError> for TuiError {
    fn from(value: FilterError) -> Self {
        Self::Filter(value)
    }
}
