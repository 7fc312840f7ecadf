//! Shared test utilities for the git-repeat workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`]: repositories with a real commit history
//! - [`tree`]: [`TestTree`] for asserting on replay output

pub mod git;
pub mod tree;

pub use git::GitFixture;
pub use tree::TestTree;
