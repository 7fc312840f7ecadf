//! Error types for repeat-fs

use std::path::PathBuf;

/// Result type for repeat-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in repeat-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown text encoding: {label}")]
    UnknownEncoding { label: String },

    #[error("File {path} is not valid {encoding} text")]
    Malformed { path: PathBuf, encoding: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
