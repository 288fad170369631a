//! Error type shared by maze generation, geometry and settings

use std::fmt;

/// Errors raised by the library
#[derive(Debug)]
pub enum MazeError {
    /// A size, dimension or input value that cannot produce a valid maze or session
    InvalidConfiguration(String),
    /// Settings file could not be read or written
    Io(std::io::Error),
    /// Settings file is not valid JSON for [`crate::Settings`]
    Json(serde_json::Error),
}

impl MazeError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        MazeError::InvalidConfiguration(msg.into())
    }
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::InvalidConfiguration(msg) => write!(f, "invalid configuration: {}", msg),
            MazeError::Io(e) => write!(f, "settings I/O failed: {}", e),
            MazeError::Json(e) => write!(f, "settings JSON is malformed: {}", e),
        }
    }
}

impl std::error::Error for MazeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MazeError::InvalidConfiguration(_) => None,
            MazeError::Io(e) => Some(e),
            MazeError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for MazeError {
    fn from(e: std::io::Error) -> Self {
        MazeError::Io(e)
    }
}

impl From<serde_json::Error> for MazeError {
    fn from(e: serde_json::Error) -> Self {
        MazeError::Json(e)
    }
}
