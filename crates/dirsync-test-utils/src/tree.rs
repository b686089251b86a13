//! [`TestTree`] builder for source/replica test scenarios.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// A temporary directory tree with helpers for setup and assertion.
///
/// Paths passed to the helpers are relative and use `/` separators.
///
/// # Example
///
/// ```rust,no_run
/// use dirsync_test_utils::tree::TestTree;
///
/// let source = TestTree::new();
/// source.file("docs/spec.txt", "spec").dir("empty");
/// source.assert_file_content("docs/spec.txt", "spec");
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Resolve a relative `/`-separated path beneath the root.
    pub fn path(&self, rel: &str) -> PathBuf {
        rel.split('/')
            .filter(|seg| !seg.is_empty())
            .fold(self.root().to_path_buf(), |acc, seg| acc.join(seg))
    }

    /// Write a file, creating parent folders as needed.
    pub fn file(&self, rel: &str, content: impl AsRef<[u8]>) -> &Self {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        self
    }

    /// Create a folder and its parents.
    pub fn dir(&self, rel: &str) -> &Self {
        fs::create_dir_all(self.path(rel)).unwrap();
        self
    }

    /// Read a file's bytes.
    pub fn read(&self, rel: &str) -> Vec<u8> {
        fs::read(self.path(rel))
            .unwrap_or_else(|e| panic!("TestTree::read: cannot read '{rel}': {e}"))
    }

    /// Every non-folder entry beneath the root as sorted relative `/` paths.
    /// Symbolic links are listed, never followed.
    pub fn files(&self) -> BTreeSet<String> {
        self.list(|entry| !entry.file_type().is_dir())
    }

    /// Every folder beneath the root (root excluded) as sorted relative `/` paths.
    pub fn dirs(&self) -> BTreeSet<String> {
        self.list(|entry| entry.file_type().is_dir())
    }

    fn list(&self, keep: impl Fn(&walkdir::DirEntry) -> bool) -> BTreeSet<String> {
        WalkDir::new(self.root())
            .min_depth(1)
            .into_iter()
            .map(|entry| entry.unwrap())
            .filter(|entry| keep(entry))
            .map(|entry| {
                entry
                    .path()
                    .strip_prefix(self.root())
                    .unwrap()
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .collect()
    }

    /// Assert that a file exists with the given content.
    pub fn assert_file_content(&self, rel: &str, expected: impl AsRef<[u8]>) {
        let actual = self.read(rel);
        assert_eq!(
            actual,
            expected.as_ref(),
            "content mismatch for '{}': got {:?}",
            rel,
            String::from_utf8_lossy(&actual)
        );
    }

    /// Assert that nothing exists at a relative path.
    pub fn assert_missing(&self, rel: &str) {
        assert!(
            !self.path(rel).exists(),
            "expected '{}' to be absent",
            rel
        );
    }
}
