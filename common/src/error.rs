use std::path::PathBuf;
use thiserror::Error;

use crate::MatchKey;

pub type ReplayResult<T> = Result<T, ReplayError>;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("no matches have been played yet (no index entries under {pattern})")]
    NoMatchesFound { pattern: String },

    #[error("could not find log files matching {pattern}")]
    NoLogFilesFound { pattern: String },

    #[error("no log data found for match {key}")]
    NoMatchingRecords { key: MatchKey },

    /// Per-line failure. Callers skip the record and keep going.
    #[error("malformed record: {reason}")]
    MalformedRecord { reason: String },

    #[error("choice {choice} out of range (0..{len}, or -1 for the most recent)")]
    ChoiceOutOfRange { choice: i64, len: usize },

    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid file pattern {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,

    #[error("search worker pool failed: {0}")]
    WorkerPool(String),
}

impl ReplayError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        ReplayError::MalformedRecord {
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReplayError::Io {
            path: path.into(),
            source,
        }
    }

    /// Errors the user can recover from by picking another match.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ReplayError::NoMatchingRecords { .. }
                | ReplayError::ChoiceOutOfRange { .. }
                | ReplayError::MalformedRecord { .. }
        )
    }
}
