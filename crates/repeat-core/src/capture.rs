//! Change capture from history

use chrono::Utc;
use repeat_diff::{extract_changes, tokenize};
use repeat_fs::TextEncoding;
use repeat_git::HistoryProvider;
use repeat_recipe::{
    ChangeSet, CommitSummary, FileStatus, FileUpdate, Provenance, ProvenanceFile, RECIPE_VERSION,
};

use crate::{PathFilter, Result};

/// A captured change set together with where it came from.
#[derive(Debug, Clone)]
pub struct Capture {
    pub changes: ChangeSet,
    pub provenance: Provenance,
}

/// Capture the changes between the provider's two commits.
///
/// Added files become copies, modified files become updates with their
/// previous text as baseline. Deleted and renamed files are listed in the
/// provenance but not replayed. Paths rejected by `filter` are skipped.
pub fn capture<P>(
    provider: &P,
    keys: &[String],
    filter: &PathFilter,
    encoding: TextEncoding,
) -> Result<Capture>
where
    P: HistoryProvider + ?Sized,
{
    let mut changes = ChangeSet {
        version: Some(RECIPE_VERSION.to_string()),
        ..ChangeSet::default()
    };
    for key in keys {
        if !changes.keys.contains(key) {
            changes.keys.push(key.clone());
        }
    }

    let mut files = Vec::new();

    for diff in provider.diff(encoding)? {
        let class = filter.classify(&diff.path);
        files.push(ProvenanceFile {
            status: diff.status,
            excluded: class.exclusion(),
            path: diff.path.clone(),
        });

        if let Some(exclusion) = class.exclusion() {
            tracing::debug!(path = %diff.path, reason = exclusion.marker(), "Excluded");
            continue;
        }

        match (diff.status, diff.contents) {
            (FileStatus::Added, _) => {
                tracing::info!(path = %diff.path, "Captured new file");
                if !changes.copies.contains(&diff.path) {
                    changes.copies.push(diff.path);
                }
            }
            (FileStatus::Modified, Some((previous, current))) => {
                let extracted = extract_changes(&tokenize(&previous), &tokenize(&current));
                if extracted.edits.is_empty() {
                    tracing::debug!(
                        path = %diff.path,
                        removed = extracted.removed.len(),
                        "No inserted text, not replayed"
                    );
                    continue;
                }
                tracing::info!(
                    path = %diff.path,
                    edits = extracted.edits.len(),
                    removed = extracted.removed.len(),
                    "Captured update"
                );
                changes.updates.push(FileUpdate {
                    path: diff.path,
                    edits: extracted.edits,
                    removed: extracted.removed,
                    baseline: Some(previous),
                });
            }
            (status, _) => {
                tracing::debug!(path = %diff.path, status = %status.letter(), "Not replayed");
            }
        }
    }

    let provenance = Provenance {
        repository: provider.workdir().to_string(),
        from: CommitSummary::from(provider.from_commit()),
        to: CommitSummary::from(provider.to_commit()),
        files,
        created: Utc::now(),
    };

    Ok(Capture {
        changes,
        provenance,
    })
}
