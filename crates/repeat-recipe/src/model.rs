//! Captured change data

use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset};
use repeat_diff::{EditKind, EditOp};

/// Edits recorded for one modified file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileUpdate {
    /// Path relative to the repository root
    pub path: String,
    /// Edits in capture order (ascending position)
    pub edits: Vec<EditOp>,
    /// Baseline positions whose token is removed
    pub removed: BTreeSet<usize>,
    /// Full text the positions index, used to compute drift at replay time
    pub baseline: Option<String>,
}

impl FileUpdate {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// True when the entry carries no edits.
    ///
    /// Removals are only replayed next to edits of the same file, so an entry
    /// with removals alone is empty too.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Re-derive each edit's kind from the removed positions.
    pub(crate) fn resolve_kinds(&mut self) {
        for edit in &mut self.edits {
            edit.kind = if self.removed.contains(&edit.position) {
                EditKind::Replace
            } else {
                EditKind::Insert
            };
        }
    }
}

/// Everything one capture recorded, or one recipe described.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Recipe syntax version, absent in hand-written recipes
    pub version: Option<String>,
    /// Replacement keys, in order, without duplicates
    pub keys: Vec<String>,
    /// Newly added files, relative paths, in order, without duplicates
    pub copies: Vec<String>,
    /// Modified files in capture or decode order
    pub updates: Vec<FileUpdate>,
}

impl ChangeSet {
    /// Look up the update entry for a path.
    pub fn update(&self, path: &str) -> Option<&FileUpdate> {
        self.updates.iter().find(|u| u.path == path)
    }

    /// Update entries that carry at least one edit.
    pub fn effective_updates(&self) -> impl Iterator<Item = &FileUpdate> {
        self.updates.iter().filter(|u| !u.is_empty())
    }

    pub(crate) fn update_mut(&mut self, path: &str) -> &mut FileUpdate {
        let idx = match self.updates.iter().position(|u| u.path == path) {
            Some(idx) => idx,
            None => {
                self.updates.push(FileUpdate::new(path));
                self.updates.len() - 1
            }
        };
        &mut self.updates[idx]
    }

    pub(crate) fn push_key(&mut self, key: String) {
        if !self.keys.contains(&key) {
            self.keys.push(key);
        }
    }

    pub(crate) fn push_copy(&mut self, path: String) {
        if !self.copies.contains(&path) {
            self.copies.push(path);
        }
    }
}

/// How git classified a file between the two captured commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileStatus {
    Added,
    Modified,
    Renamed,
    Deleted,
}

impl FileStatus {
    /// Single-letter marker used in recipe headers.
    pub fn letter(&self) -> char {
        match self {
            FileStatus::Added => 'A',
            FileStatus::Modified => 'M',
            FileStatus::Renamed => 'R',
            FileStatus::Deleted => 'D',
        }
    }
}

/// Why a changed file was left out of the capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exclusion {
    /// Matched one of the exclude patterns
    ByExclude,
    /// Matched none of the include patterns
    ByInclude,
}

impl Exclusion {
    pub fn marker(&self) -> &'static str {
        match self {
            Exclusion::ByExclude => "XE",
            Exclusion::ByInclude => "XI",
        }
    }
}

/// A commit as shown in the recipe header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub summary: String,
    pub author: String,
    pub committed: DateTime<FixedOffset>,
}

/// One changed file as listed in the recipe header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceFile {
    pub status: FileStatus,
    pub excluded: Option<Exclusion>,
    pub path: String,
}
