//! History provider trait

use repeat_fs::{NormalizedPath, TextEncoding};
use repeat_recipe::FileStatus;

use crate::{CommitInfo, Result};

/// One file that differs between the two compared commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    /// Path relative to the repository root. The new path for added files,
    /// the old path otherwise.
    pub path: String,

    pub status: FileStatus,

    /// Previous and current text, present for modified files only
    pub contents: Option<(String, String)>,
}

/// Source of the changes between two points in history.
///
/// The capture pipeline only talks to this trait, so tests can feed it
/// in-memory diffs without a repository.
pub trait HistoryProvider {
    /// Working directory the history belongs to
    fn workdir(&self) -> &NormalizedPath;

    /// Older side of the comparison
    fn from_commit(&self) -> &CommitInfo;

    /// Newer side of the comparison
    fn to_commit(&self) -> &CommitInfo;

    /// Files that differ between the two commits, in git's delta order.
    fn diff(&self, encoding: TextEncoding) -> Result<Vec<FileDiff>>;
}
