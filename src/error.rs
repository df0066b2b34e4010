use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the journal's stores and start-up plumbing.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize journal data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("credentials file {} is malformed: {source}", path.display())]
    Credentials {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

pub type JournalResult<T> = Result<T, JournalError>;
