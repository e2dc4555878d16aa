//! Ошибки библиотеки.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::pit::PointInTime;

/// Errors from spec parsing, path resolution and stream opening.
#[derive(Debug, Error)]
pub enum PitError {
    /// Malformed or out-of-range point-in-time spec.
    #[error("invalid spec {spec:?}: {reason}")]
    InvalidSpec { spec: String, reason: String },

    #[error("{} is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("{} not found", path.display())]
    NotFound { path: PathBuf },

    #[error("no PIT file found for {pit} under {}", dir.display())]
    NoSnapshotFound { pit: PointInTime, dir: PathBuf },

    /// Only raised when the caller asked for `create_new`.
    #[error("snapshot {} already exists", path.display())]
    DuplicateSnapshot { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl PitError {
    pub(crate) fn invalid_spec(spec: &str, reason: impl Into<String>) -> Self {
        PitError::InvalidSpec {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PitError>;
