//! Error types for the shortcut provisioning subsystem.
//!
//! Nothing in this subsystem is fatal: a failure affects one shortcut, the
//! caller skips it and carries on, and the aggregate outcome is reported
//! upward. Variants therefore carry enough context to be logged and
//! collected rather than unwound.

use std::path::PathBuf;
use thiserror::Error;

use crate::folders::KnownFolder;

/// Main error type for shortcut operations.
#[derive(Debug, Error)]
pub enum ShortcutError {
    /// A known-folder lookup failed (folder redirected or missing). Callers
    /// treat the affected shortcut as unavailable and skip it.
    #[error("known folder {folder:?} could not be resolved")]
    UnresolvableFolder { folder: KnownFolder },

    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// The shell-link primitive failed to write a shortcut.
    #[error("shortcut write failed at {path:?}: {message}")]
    ShortcutWrite { path: PathBuf, message: String },

    /// The shell-link primitive failed to read a shortcut back.
    #[error("shortcut read failed at {path:?}: {message}")]
    ShortcutRead { path: PathBuf, message: String },

    #[error("preferences error: {message}")]
    Preferences {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

/// Result type alias for shortcut operations.
pub type Result<T> = std::result::Result<T, ShortcutError>;

impl From<std::io::Error> for ShortcutError {
    fn from(err: std::io::Error) -> Self {
        ShortcutError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl ShortcutError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        ShortcutError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }
}
