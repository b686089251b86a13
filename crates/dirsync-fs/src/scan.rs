//! Recursive tree scanning
//!
//! Produces the file and folder key sets of a directory tree. Scans are
//! read-only and carry no state between calls.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{Error, RelPath, Result};

/// Relative keys of every file observed under a root.
pub type FileSet = BTreeSet<RelPath>;

/// Relative keys of every folder observed under a root, including the root.
pub type FolderSet = BTreeSet<RelPath>;

/// Snapshot of one tree taken at scan time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeScan {
    pub files: FileSet,
    pub folders: FolderSet,
    /// Symbolic links that do not resolve to a regular file: links to
    /// folders and dangling links. Never descended into.
    pub links: BTreeSet<RelPath>,
}

impl TreeScan {
    /// Number of files and folders, the root included.
    pub fn len(&self) -> usize {
        self.files.len() + self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.folders.is_empty()
    }
}

/// Walk `root` and collect the keys of everything beneath it.
///
/// Symbolic links are never followed for traversal. A link that resolves to
/// a regular file is recorded as a file; links to folders and dangling links
/// go to [`TreeScan::links`]. Entries whose names are not valid UTF-8 are skipped with a
/// warning, since they cannot be given a stable key.
///
/// # Errors
///
/// Returns an error if `root` or any folder beneath it cannot be read.
pub fn scan_tree(root: &Path) -> Result<TreeScan> {
    let mut scan = TreeScan::default();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| Error::Walk {
            path: e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source: e,
        })?;

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| Error::OutsideRoot {
                path: entry.path().to_path_buf(),
                root: root.to_path_buf(),
            })?;

        let Some(key) = RelPath::from_relative(relative) else {
            warn!(path = %entry.path().display(), "skipping entry with unsupported name");
            continue;
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            scan.folders.insert(key);
        } else if file_type.is_file() {
            scan.files.insert(key);
        } else if file_type.is_symlink() {
            match fs::metadata(entry.path()) {
                Ok(meta) if meta.is_file() => {
                    scan.files.insert(key);
                }
                Ok(_) => {
                    debug!(%key, "symlink to non-file");
                    scan.links.insert(key);
                }
                Err(_) => {
                    debug!(%key, "dangling symlink");
                    scan.links.insert(key);
                }
            }
        } else {
            debug!(%key, "skipping special file");
        }
    }

    debug!(
        root = %root.display(),
        files = scan.files.len(),
        folders = scan.folders.len(),
        links = scan.links.len(),
        "scanned tree"
    );
    Ok(scan)
}
