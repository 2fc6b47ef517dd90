use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No Action Logger files found in {} (pattern: *-logs.txt)", dir.display())]
    NoLogFilesFound { dir: PathBuf },

    #[error("Cannot read log directory {}: {source}", dir.display())]
    LogDirUnreadable {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid log file pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Glob error: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("Malformed record: {reason}")]
    MalformedRecord { reason: String },

    #[error("Cannot read lookup table {}: {source}", path.display())]
    LookupTableMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid lookup table {}: {source}", path.display())]
    LookupTableInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to tail {}: {source}", path.display())]
    Tail {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write event feed: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            reason: reason.into(),
        }
    }
}
