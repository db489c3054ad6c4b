//! Errors for loading game balance data.
//!
//! The simulation itself has no recoverable failures; only reading a
//! [`crate::Tuning`] file can fail.

use std::fmt;
use std::path::PathBuf;

/// Failure while loading or validating tuning data
#[derive(Debug)]
pub enum TuningError {
    /// The file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid tuning JSON.
    Parse(serde_json::Error),

    /// A value parsed but is outside its usable range.
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable description of the accepted range.
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read tuning file {}: {}", path.display(), source)
            }
            Self::Parse(err) => write!(f, "malformed tuning JSON: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning value `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
