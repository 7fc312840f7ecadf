//! [`TestTree`]: a plain directory that recipes are applied to.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// A temporary directory with helpers for seeding files and asserting on them.
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new()
                .unwrap_or_else(|e| panic!("TestTree: failed to create temp dir: {e}")),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file relative to the root, creating parents.
    pub fn write(&self, path: &str, contents: impl AsRef<[u8]>) -> &Self {
        let full = self.root().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("TestTree: failed to create {}: {e}", parent.display()));
        }
        fs::write(&full, contents)
            .unwrap_or_else(|e| panic!("TestTree: failed to write {path}: {e}"));
        self
    }

    /// Read a file relative to the root as UTF-8.
    pub fn read(&self, path: &str) -> String {
        fs::read_to_string(self.root().join(path))
            .unwrap_or_else(|e| panic!("TestTree: failed to read {path}: {e}"))
    }

    pub fn exists(&self, path: &str) -> bool {
        self.root().join(path).exists()
    }

    /// Assert a file exists and has exactly `expected` as contents.
    pub fn assert_file(&self, path: &str, expected: &str) {
        assert!(self.exists(path), "expected file {path} to exist");
        let actual = self.read(path);
        assert_eq!(actual, expected, "unexpected contents in {path}");
    }

    pub fn assert_missing(&self, path: &str) {
        assert!(!self.exists(path), "expected file {path} to be absent");
    }
}
