//! Filesystem layer for dirsync
//!
//! Provides tree scanning, content fingerprints, relative path keys and the
//! replica-side I/O primitives the reconciler is built from.

pub mod checksum;
pub mod error;
pub mod io;
pub mod path;
pub mod scan;

pub use checksum::{Fingerprint, compute_content_checksum, compute_file_checksum};
pub use error::{Error, Result};
pub use path::RelPath;
pub use scan::{FileSet, FolderSet, TreeScan, scan_tree};
