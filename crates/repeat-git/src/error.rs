//! Error types for repeat-git

use std::path::PathBuf;

/// Result type for repeat-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading history
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Folder at \"{}\" must be a git repository", path.display())]
    NotARepository { path: PathBuf },

    #[error("At least two commits must be present in repository since \"{revision}\"")]
    InsufficientHistory { revision: String },

    #[error("Revision \"{revision}\" could not be resolved: {source}")]
    UnknownRevision {
        revision: String,
        #[source]
        source: git2::Error,
    },

    #[error("Commit \"{to}\" must be after \"{from}\"")]
    RevisionOrder { from: String, to: String },

    #[error("Contents of {path} at {revision} are not valid {encoding}")]
    Decode {
        path: String,
        revision: String,
        encoding: String,
    },
}
