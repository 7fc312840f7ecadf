//! Commit metadata shown in logs and recipe headers.

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use git2::{Commit, Oid, Repository};
use repeat_recipe::CommitSummary;

use crate::Result;

/// Information about a single commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Short commit hash (7 characters)
    pub hash: String,

    /// First line of the commit message
    pub summary: String,

    /// Commit author name
    pub author: String,

    /// Commit timestamp in the committer's timezone
    pub timestamp: DateTime<FixedOffset>,
}

impl CommitInfo {
    pub fn from_commit(commit: &Commit<'_>) -> Self {
        let time = commit.time();
        let offset = FixedOffset::east_opt(time.offset_minutes() * 60).unwrap_or(Utc.fix());
        let timestamp = offset
            .timestamp_opt(time.seconds(), 0)
            .single()
            .unwrap_or_default();

        let summary = commit
            .message()
            .unwrap_or("")
            .lines()
            .next()
            .unwrap_or("")
            .to_string();

        let author = commit.author();
        let author_name = author.name().unwrap_or("Unknown").to_string();

        Self {
            hash: format!("{:.7}", commit.id()),
            summary,
            author: author_name,
            timestamp,
        }
    }
}

impl From<&CommitInfo> for CommitSummary {
    fn from(info: &CommitInfo) -> Self {
        CommitSummary {
            summary: info.summary.clone(),
            author: info.author.clone(),
            committed: info.timestamp,
        }
    }
}

impl std::fmt::Display for CommitInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} \"{}\"", self.hash, self.summary)
    }
}

/// Walk history back from `tip`, at most `max_count` commits.
///
/// Returns commits in reverse-chronological order (most recent first).
pub fn recent_commits(repo: &Repository, tip: Oid, max_count: usize) -> Result<Vec<CommitInfo>> {
    let mut revwalk = repo.revwalk()?;
    revwalk.push(tip)?;
    revwalk.set_sorting(git2::Sort::TIME)?;

    let mut commits = Vec::with_capacity(max_count);
    for oid in revwalk.take(max_count) {
        let commit = repo.find_commit(oid?)?;
        commits.push(CommitInfo::from_commit(&commit));
    }

    Ok(commits)
}
