//! Error and warning types for scanning operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during scanning or export.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory was reached again through one of its own descendants.
    #[error("Symlink cycle detected: {path}")]
    SymlinkCycle { path: PathBuf },

    /// A path could not be expressed relative to the scan root.
    #[error("{path} is not under {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    /// JSON serialization failed.
    #[error("Failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Permission was denied.
    PermissionDenied,
    /// Error reading a directory.
    ReadError,
    /// Error reading metadata.
    MetadataError,
    /// Directory revisited through a symlink.
    SymlinkCycle,
    /// Entry skipped or degraded after a failure.
    EntryError,
}

impl WarningKind {
    /// Whether this kind is logged at error level rather than warning level.
    pub fn is_error(self) -> bool {
        matches!(self, WarningKind::ReadError | WarningKind::EntryError)
    }
}

/// Non-fatal problem encountered during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a permission denied warning.
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Permission denied: {}", path.display()),
            path,
            kind: WarningKind::PermissionDenied,
        }
    }

    /// Create a read error warning.
    pub fn read_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        Self {
            message: format!("Error reading directory {}: {error}", path.display()),
            path,
            kind: WarningKind::ReadError,
        }
    }

    /// Create a metadata warning for a file whose size could not be read.
    pub fn metadata_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        Self {
            message: format!("Cannot get file size: {} - {error}", path.display()),
            path,
            kind: WarningKind::MetadataError,
        }
    }

    /// Create a warning for an entry that failed and was skipped or degraded.
    pub fn entry_error(path: impl Into<PathBuf>, error: &ScanError) -> Self {
        let path = path.into();
        let kind = match error {
            ScanError::SymlinkCycle { .. } => WarningKind::SymlinkCycle,
            _ => WarningKind::EntryError,
        };
        Self {
            message: format!("Error scanning {}: {error}", path.display()),
            path,
            kind,
        }
    }
}
