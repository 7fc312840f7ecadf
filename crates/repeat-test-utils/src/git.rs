//! Git repositories with a real commit history.
//!
//! Commits are made through `git2` with a fixed signature and a clock that
//! advances one minute per commit, so commit order and timestamps are
//! deterministic without a `git` binary or user config.

use std::fs;
use std::path::Path;

use git2::{IndexAddOption, Oid, Repository, Signature, Time};
use tempfile::TempDir;

/// 2024-01-01 00:00:00 UTC
const EPOCH: i64 = 1_704_067_200;

/// A temporary git repository that tests build history in.
///
/// # Example
///
/// ```rust,no_run
/// use repeat_test_utils::GitFixture;
///
/// let mut fixture = GitFixture::new();
/// fixture.write("src/Foo.cs", "class Foo {}\n");
/// fixture.commit("Initial commit");
/// fixture.write("src/Foo.cs", "class Foo { int x; }\n");
/// fixture.commit("Add field");
/// ```
pub struct GitFixture {
    temp_dir: TempDir,
    repo: Repository,
    clock: i64,
}

impl Default for GitFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl GitFixture {
    /// Initialise an empty repository in a fresh temporary directory.
    ///
    /// # Panics
    /// Panics if the directory or repository cannot be created.
    pub fn new() -> Self {
        let temp_dir =
            TempDir::new().unwrap_or_else(|e| panic!("GitFixture: failed to create temp dir: {e}"));
        let repo = Repository::init(temp_dir.path()).unwrap_or_else(|e| {
            panic!(
                "GitFixture: failed to init repository at {}: {e}",
                temp_dir.path().display()
            )
        });
        Self {
            temp_dir,
            repo,
            clock: EPOCH,
        }
    }

    /// Working directory of the repository.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// Write a file relative to the working directory, creating parents.
    pub fn write(&self, path: &str, contents: impl AsRef<[u8]>) -> &Self {
        let full = self.root().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("GitFixture: failed to create {}: {e}", parent.display()));
        }
        fs::write(&full, contents)
            .unwrap_or_else(|e| panic!("GitFixture: failed to write {path}: {e}"));
        self
    }

    /// Delete a file from the working directory.
    pub fn remove(&self, path: &str) -> &Self {
        fs::remove_file(self.root().join(path))
            .unwrap_or_else(|e| panic!("GitFixture: failed to remove {path}: {e}"));
        self
    }

    /// Move a file inside the working directory.
    pub fn rename(&self, from: &str, to: &str) -> &Self {
        let target = self.root().join(to);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("GitFixture: failed to create {}: {e}", parent.display()));
        }
        fs::rename(self.root().join(from), target)
            .unwrap_or_else(|e| panic!("GitFixture: failed to rename {from} to {to}: {e}"));
        self
    }

    /// Stage every change in the working directory and commit it on HEAD.
    ///
    /// # Panics
    /// Panics if any git operation fails.
    pub fn commit(&mut self, message: &str) -> Oid {
        fn fail(step: &str, e: git2::Error) -> ! {
            panic!("GitFixture::commit: {step}: {e}")
        }

        let mut index = self.repo.index().unwrap_or_else(|e| fail("open index", e));
        index
            .add_all(["*"], IndexAddOption::DEFAULT, None)
            .unwrap_or_else(|e| fail("add files", e));
        index
            .update_all(["*"], None)
            .unwrap_or_else(|e| fail("stage removals", e));
        index.write().unwrap_or_else(|e| fail("write index", e));

        let tree_id = index.write_tree().unwrap_or_else(|e| fail("write tree", e));
        let tree = self
            .repo
            .find_tree(tree_id)
            .unwrap_or_else(|e| fail("find tree", e));

        let signature = Signature::new("Test User", "test@test.com", &Time::new(self.clock, 0))
            .unwrap_or_else(|e| fail("create signature", e));
        self.clock += 60;

        let parent = self.repo.head().ok().and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .unwrap_or_else(|e| fail("commit", e))
    }
}
