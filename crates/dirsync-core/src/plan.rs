//! Action plans produced by one diff pass

use std::collections::BTreeSet;

use dirsync_fs::RelPath;

/// A single filesystem mutation applied to the replica.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    RemoveFile,
    RemoveDirectory,
    CreateDirectory,
    CopyFile,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::RemoveFile => "remove file",
            Self::RemoveDirectory => "remove directory",
            Self::CreateDirectory => "create directory",
            Self::CopyFile => "copy file",
        };
        f.write_str(s)
    }
}

/// The four action sets computed by one diff pass.
///
/// Plans are built fresh each cycle and dropped once applied. A modified
/// file is listed in both `files_to_delete` and `files_to_sync`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionPlan {
    /// Folders present only in the source
    pub folders_to_create: BTreeSet<RelPath>,
    /// Folders present only in the replica
    pub folders_to_delete: BTreeSet<RelPath>,
    /// New or modified files to copy from the source
    pub files_to_sync: BTreeSet<RelPath>,
    /// Orphaned or modified files to remove from the replica
    pub files_to_delete: BTreeSet<RelPath>,
    /// Keys naming a file on one side and a folder on the other.
    ///
    /// Informational only: each key is already covered by the action sets.
    pub type_conflicts: BTreeSet<RelPath>,
}

impl ActionPlan {
    /// Whether applying this plan would touch nothing.
    pub fn is_empty(&self) -> bool {
        self.folders_to_create.is_empty()
            && self.folders_to_delete.is_empty()
            && self.files_to_sync.is_empty()
            && self.files_to_delete.is_empty()
    }

    /// Total number of actions across the four sets.
    pub fn action_count(&self) -> usize {
        self.folders_to_create.len()
            + self.folders_to_delete.len()
            + self.files_to_sync.len()
            + self.files_to_delete.len()
    }

    /// Files present on both sides whose contents differ.
    pub fn modified_files(&self) -> impl Iterator<Item = &RelPath> {
        self.files_to_sync.intersection(&self.files_to_delete)
    }
}
