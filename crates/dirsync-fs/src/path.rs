//! Relative path keys shared by the source and replica scans

use std::path::{Component, Path, PathBuf};

/// Separator used inside every key, regardless of platform.
const SEPARATOR: char = '/';

/// A path relative to a tree root, normalized to forward slashes.
///
/// Keys are the identity used for set membership when comparing two trees,
/// so both sides must be built through the same constructor. The empty key
/// denotes the root folder itself. Comparison is byte-exact (case-sensitive).
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelPath {
    /// Segments joined by `/`, no leading or trailing separator
    inner: String,
}

impl RelPath {
    /// The key of the tree root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a key from a textual path, accepting either separator.
    ///
    /// Empty segments and `.` are dropped, so `"a//b/"` and `"./a\\b"` both
    /// become `"a/b"`.
    pub fn new(path: &str) -> Self {
        let inner = path
            .split(['/', '\\'])
            .filter(|seg| !seg.is_empty() && *seg != ".")
            .collect::<Vec<_>>()
            .join("/");
        Self { inner }
    }

    /// Build a key from a path already stripped of its root prefix.
    ///
    /// Returns `None` if a component is not valid UTF-8 or is not a plain
    /// name (`..`, a drive prefix, or an absolute root).
    pub fn from_relative(path: &Path) -> Option<Self> {
        let mut segments = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(name) => segments.push(name.to_str()?),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(Self {
            inner: segments.join("/"),
        })
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Whether this key denotes the tree root.
    pub fn is_root(&self) -> bool {
        self.inner.is_empty()
    }

    /// Resolve this key beneath `root` as a platform-native path.
    pub fn under(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        for segment in self.segments() {
            path.push(segment);
        }
        path
    }

    /// Iterate the key's segments from the root downward.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.inner.split(SEPARATOR).filter(|seg| !seg.is_empty())
    }

    /// Number of segments; the root has depth zero.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Join this key with a child name.
    pub fn join(&self, segment: &str) -> Self {
        if self.is_root() {
            Self::new(segment)
        } else {
            Self::new(&format!("{}{}{}", self.inner, SEPARATOR, segment))
        }
    }

    /// Get the parent key, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.inner.rfind(SEPARATOR) {
            Some(idx) => Some(Self {
                inner: self.inner[..idx].to_string(),
            }),
            None => Some(Self::root()),
        }
    }

    /// Get the final segment.
    pub fn file_name(&self) -> Option<&str> {
        self.segments().last()
    }

    /// Render as a folder, with a trailing separator (`docs/`).
    pub fn display_dir(&self) -> String {
        if self.is_root() {
            String::new()
        } else {
            format!("{}{}", self.inner, SEPARATOR)
        }
    }
}

impl AsRef<str> for RelPath {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl std::fmt::Display for RelPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for RelPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RelPath {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}
