//! Error types for dirsync-core

use std::path::PathBuf;

use dirsync_fs::RelPath;

use crate::plan::Action;

/// Result type for dirsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dirsync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configured location is missing or is not a directory
    #[error("No such {role} directory {path}")]
    NotADirectory { role: &'static str, path: PathBuf },

    /// Source and replica are the same tree or one contains the other
    #[error("Source {source_root} and replica {replica_root} overlap")]
    OverlappingTrees {
        source_root: PathBuf,
        replica_root: PathBuf,
    },

    /// Poll interval could not be parsed
    #[error("Wrong time interval {value}: {reason}")]
    InvalidInterval { value: String, reason: String },

    /// A single reconcile action failed; the rest of the cycle was abandoned
    #[error("Failed to {action} {path}: {source}")]
    Apply {
        action: Action,
        path: RelPath,
        #[source]
        source: dirsync_fs::Error,
    },

    /// Filesystem error from dirsync-fs
    #[error(transparent)]
    Fs(#[from] dirsync_fs::Error),
}

impl Error {
    pub(crate) fn interval(value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInterval {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error belongs to the startup configuration class.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::NotADirectory { .. } | Self::OverlappingTrees { .. } | Self::InvalidInterval { .. }
        )
    }
}
