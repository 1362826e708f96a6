//! Error handling for LayerKit
//!
//! The history store and bounds calculator are total over well-formed input,
//! so errors only appear at the edges: validating snapshots that arrive from
//! outside (scripts, files) and reading or writing those files.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Snapshot validation error type
///
/// Describes why a `LayersSnapshot` is not internally consistent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Two layers share the same id
    #[error("Duplicate layer id: {id}")]
    DuplicateLayerId {
        /// The repeated layer id.
        id: String,
    },

    /// A selected id does not name any layer
    #[error("Selected layer {id} does not exist")]
    UnknownSelection {
        /// The dangling selected id.
        id: String,
    },

    /// The primary layer is not part of the selection
    #[error("Primary layer {id} is not selected")]
    PrimaryNotSelected {
        /// The primary layer id.
        id: String,
    },
}

/// Main error type for LayerKit
///
/// A unified error type for the fallible edges of every crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Snapshot failed validation
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(#[from] SnapshotError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a snapshot validation error
    pub fn is_invalid_snapshot(&self) -> bool {
        matches!(self, Error::InvalidSnapshot(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
