//! Git history access for git-repeat
//!
//! Resolves the two commits a change is captured between and yields the
//! files that differ, decoded with the caller's encoding.

pub mod commits;
pub mod error;
pub mod history;
pub mod provider;

pub use commits::CommitInfo;
pub use error::{Error, Result};
pub use history::GitHistory;
pub use provider::{FileDiff, HistoryProvider};
