//! [`HistoryProvider`] backed by a git2 repository

use std::path::Path;

use git2::{Delta, DiffFindOptions, FileMode, Oid, Repository};
use repeat_fs::{NormalizedPath, TextEncoding};
use repeat_recipe::FileStatus;

use crate::commits::{CommitInfo, recent_commits};
use crate::{Error, FileDiff, HistoryProvider, Result};

/// Two resolved commits of a repository with a working directory.
pub struct GitHistory {
    repo: Repository,
    workdir: NormalizedPath,
    from_id: Oid,
    to_id: Oid,
    from: CommitInfo,
    to: CommitInfo,
}

impl GitHistory {
    /// Open the repository at `path` and resolve `from` and `to`.
    ///
    /// Fails when `path` is not a repository with a working directory, when
    /// fewer than two commits are reachable from `to`, or when `to` was
    /// committed before `from`.
    pub fn open(path: &Path, from: &str, to: &str) -> Result<Self> {
        let not_a_repository = || Error::NotARepository {
            path: path.to_path_buf(),
        };

        let repo = Repository::open(path).map_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "Failed to open repository");
            not_a_repository()
        })?;
        let workdir = repo
            .workdir()
            .map(NormalizedPath::new)
            .ok_or_else(not_a_repository)?;

        // Commits borrow the repository, so they must be gone before it moves
        let (from_id, to_id, from_info, to_info) = {
            let to_commit = resolve(&repo, to)?;
            if recent_commits(&repo, to_commit.id(), 2)?.len() < 2 {
                return Err(Error::InsufficientHistory {
                    revision: to.to_string(),
                });
            }
            let from_commit = resolve(&repo, from)?;

            if to_commit.time().seconds() < from_commit.time().seconds() {
                return Err(Error::RevisionOrder {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }

            (
                from_commit.id(),
                to_commit.id(),
                CommitInfo::from_commit(&from_commit),
                CommitInfo::from_commit(&to_commit),
            )
        };
        tracing::info!(from = %from_info, to = %to_info, "Comparing commits");

        Ok(Self {
            repo,
            workdir,
            from_id,
            to_id,
            from: from_info,
            to: to_info,
        })
    }

    fn blob_text(
        &self,
        id: Oid,
        path: &str,
        commit: &CommitInfo,
        encoding: TextEncoding,
    ) -> Result<String> {
        let blob = self.repo.find_blob(id)?;
        encoding
            .decode(blob.content())
            .map(|text| text.into_owned())
            .ok_or_else(|| Error::Decode {
                path: path.to_string(),
                revision: commit.hash.clone(),
                encoding: encoding.name().to_string(),
            })
    }
}

impl HistoryProvider for GitHistory {
    fn workdir(&self) -> &NormalizedPath {
        &self.workdir
    }

    fn from_commit(&self) -> &CommitInfo {
        &self.from
    }

    fn to_commit(&self) -> &CommitInfo {
        &self.to
    }

    fn diff(&self, encoding: TextEncoding) -> Result<Vec<FileDiff>> {
        let old_tree = self.repo.find_commit(self.from_id)?.tree()?;
        let new_tree = self.repo.find_commit(self.to_id)?.tree()?;

        let mut diff = self
            .repo
            .diff_tree_to_tree(Some(&old_tree), Some(&new_tree), None)?;
        let mut find = DiffFindOptions::new();
        find.renames(true);
        diff.find_similar(Some(&mut find))?;

        let mut files = Vec::new();
        for delta in diff.deltas() {
            let status = match delta.status() {
                Delta::Added | Delta::Copied => FileStatus::Added,
                Delta::Deleted => FileStatus::Deleted,
                Delta::Renamed => FileStatus::Renamed,
                Delta::Modified | Delta::Typechange => FileStatus::Modified,
                other => {
                    tracing::debug!(status = ?other, "Skipping delta");
                    continue;
                }
            };

            let side = if status == FileStatus::Added {
                delta.new_file()
            } else {
                delta.old_file()
            };
            let Some(path) = side.path() else {
                continue;
            };
            let path = path.to_string_lossy().replace('\\', "/");

            let is_blob = |mode: FileMode| matches!(mode, FileMode::Blob | FileMode::BlobExecutable);
            let contents = if status == FileStatus::Modified {
                if !is_blob(delta.old_file().mode()) || !is_blob(delta.new_file().mode()) {
                    tracing::debug!(path = %path, "Skipping non-file entry");
                    continue;
                }
                let previous = self.blob_text(delta.old_file().id(), &path, &self.from, encoding)?;
                let current = self.blob_text(delta.new_file().id(), &path, &self.to, encoding)?;
                Some((previous, current))
            } else {
                None
            };

            tracing::debug!(path = %path, status = %status.letter(), "Changed file");
            files.push(FileDiff {
                path,
                status,
                contents,
            });
        }

        Ok(files)
    }
}

fn resolve<'r>(repo: &'r Repository, revision: &str) -> Result<git2::Commit<'r>> {
    repo.revparse_single(revision)
        .and_then(|object| object.peel_to_commit())
        .map_err(|source| Error::UnknownRevision {
            revision: revision.to_string(),
            source,
        })
}
