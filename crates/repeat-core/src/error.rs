//! Error types for repeat-core

use std::path::PathBuf;

/// Result type for repeat-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// A file a change set needs that is absent from the target tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFile {
    /// `COPY` or `UPDATE`
    pub command: &'static str,
    pub path: String,
}

impl std::fmt::Display for MissingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} file \"{}\" does not exist", self.command, self.path)
    }
}

/// Errors that can occur in repeat-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed replacements, keys or path patterns
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Files required by a change set are absent; lists every one of them
    #[error(
        "File(s) required by this recipe do not exist in \"{}\":{}",
        root.display(),
        list_missing(.missing)
    )]
    MissingFiles {
        root: PathBuf,
        missing: Vec<MissingFile>,
    },

    /// Filesystem error from repeat-fs
    #[error(transparent)]
    Fs(#[from] repeat_fs::Error),

    /// History error from repeat-git
    #[error(transparent)]
    Git(#[from] repeat_git::Error),

    /// Recipe parse error from repeat-recipe
    #[error(transparent)]
    Recipe(#[from] repeat_recipe::Error),
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

fn list_missing(missing: &[MissingFile]) -> String {
    missing.iter().map(|m| format!("\n  {m}")).collect()
}
