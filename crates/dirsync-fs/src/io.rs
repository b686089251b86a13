//! Replica-side filesystem mutations and the locked log file

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use fs2::FileExt;

use crate::{Error, Result};

/// Copy `from` over `to`, creating `to`'s parent folders first.
///
/// Bytes are streamed, so large files are never held in memory. An existing
/// file at `to` is truncated and overwritten; a symbolic link at `to` is
/// removed first so the write never lands on its target. Returns the bytes
/// copied.
pub fn copy_file(from: &Path, to: &Path) -> Result<u64> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    remove_if_symlink(to)?;

    let mut reader = File::open(from).map_err(|e| Error::io(from, e))?;
    let mut writer = File::create(to).map_err(|e| Error::io(to, e))?;
    io::copy(&mut reader, &mut writer).map_err(|e| Error::io(to, e))
}

/// Remove a single file. A symbolic link is removed itself, not its target.
pub fn remove_file(path: &Path) -> Result<()> {
    let result = fs::remove_file(path);

    // Windows folder links can only be removed as folders
    #[cfg(windows)]
    let result = result.or_else(|e| {
        if is_symlink(path)? {
            fs::remove_dir(path)
        } else {
            Err(e)
        }
    });

    result.map_err(|e| Error::io(path, e))
}

/// Remove an empty folder. Fails if the folder still has entries.
pub fn remove_dir(path: &Path) -> Result<()> {
    fs::remove_dir(path).map_err(|e| Error::io(path, e))
}

/// Create a folder and any missing parents.
///
/// Returns `false` when the folder already existed. A symbolic link at
/// `path` does not count as an existing folder: it is removed and a real
/// folder created in its place.
pub fn create_dir_all(path: &Path) -> Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => return Ok(false),
        Ok(meta) if meta.file_type().is_symlink() => remove_file(path)?,
        _ => {}
    }
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))?;
    Ok(true)
}

fn is_symlink(path: &Path) -> io::Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(meta) => Ok(meta.file_type().is_symlink()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

fn remove_if_symlink(path: &Path) -> Result<()> {
    if is_symlink(path).map_err(|e| Error::io(path, e))? {
        remove_file(path)?;
    }
    Ok(())
}

/// Open `path` for appending and take an exclusive advisory lock on it.
///
/// The lock lives as long as the returned handle, so a second process
/// pointed at the same log fails here instead of interleaving lines.
pub fn open_append_locked(path: &Path) -> Result<File> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;

    file.try_lock_exclusive().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    Ok(file)
}
