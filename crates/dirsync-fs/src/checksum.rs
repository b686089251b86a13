//! SHA-256 content fingerprints
//!
//! Provides a single canonical checksum format (`sha256:<hex>`) used to
//! detect modified files independent of timestamps.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::{Error, Result};

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Read buffer size; files are hashed in chunks of at most this many bytes.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Digest of a file's full byte content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    fn from_hasher(hasher: Sha256) -> Self {
        Self(format!("{}{:x}", PREFIX, hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the SHA-256 checksum of in-memory content.
pub fn compute_content_checksum(content: &[u8]) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(content);
    Fingerprint::from_hasher(hasher)
}

/// Compute the SHA-256 checksum of a file's contents.
///
/// The file is streamed in [`CHUNK_SIZE`] chunks and never held in memory
/// as a whole.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, e.g. when it was
/// removed between scanning and hashing.
pub fn compute_file_checksum(path: &Path) -> Result<Fingerprint> {
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];

    loop {
        match file.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => hasher.update(&buf[..n]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::io(path, e)),
        }
    }

    Ok(Fingerprint::from_hasher(hasher))
}
