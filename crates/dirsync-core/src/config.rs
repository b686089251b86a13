//! Sync target configuration
//!
//! A [`SyncTarget`] is validated once at startup and stays immutable for the
//! lifetime of the process.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{Error, Result};

/// Name of the append-only log file inside the configured log directory.
pub const LOG_FILE_NAME: &str = "dirsync.log";

const SECONDS_PER_MINUTE: u64 = 60;

/// Validated source, replica and log locations plus the poll interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    source: PathBuf,
    replica: PathBuf,
    log_dir: PathBuf,
    interval: Duration,
}

impl SyncTarget {
    /// Validate the locations and build a target.
    ///
    /// All three locations must exist and be directories. They are stored
    /// canonicalized. The replica root is never created here.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotADirectory`] for a missing location and
    /// [`Error::OverlappingTrees`] if source and replica are the same tree
    /// or nested inside one another.
    pub fn new(
        source: impl AsRef<Path>,
        replica: impl AsRef<Path>,
        log_dir: impl AsRef<Path>,
        interval_secs: u64,
    ) -> Result<Self> {
        let source = check_dir("source", source.as_ref())?;
        let replica = check_dir("replica", replica.as_ref())?;
        let log_dir = check_dir("log", log_dir.as_ref())?;

        if source.starts_with(&replica) || replica.starts_with(&source) {
            return Err(Error::OverlappingTrees {
                source_root: source,
                replica_root: replica,
            });
        }

        Ok(Self {
            source,
            replica,
            log_dir,
            interval: Duration::from_secs(interval_secs),
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn replica(&self) -> &Path {
        &self.replica
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Full path of the log file.
    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

fn check_dir(role: &'static str, path: &Path) -> Result<PathBuf> {
    let not_a_dir = || Error::NotADirectory {
        role,
        path: path.to_path_buf(),
    };
    if !path.is_dir() {
        return Err(not_a_dir());
    }
    dunce::canonicalize(path).map_err(|_| not_a_dir())
}

/// Parse a poll interval such as `30s` or `5m` into whole seconds.
///
/// The magnitude must be a non-negative integer with no sign; the suffix is
/// `s` for seconds or `m` for minutes.
pub fn parse_interval(value: &str) -> Result<u64> {
    let (digits, multiplier) = if let Some(d) = value.strip_suffix('s') {
        (d, 1)
    } else if let Some(d) = value.strip_suffix('m') {
        (d, SECONDS_PER_MINUTE)
    } else {
        return Err(Error::interval(value, "expected a suffix of 's' or 'm'"));
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::interval(value, "expected a non-negative integer"));
    }

    digits
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .ok_or_else(|| Error::interval(value, "value is too large"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::tempdir;

    #[rstest]
    #[case("0s", 0)]
    #[case("1s", 1)]
    #[case("45s", 45)]
    #[case("2m", 120)]
    #[case("0m", 0)]
    #[case("007s", 7)]
    fn parse_interval_accepts(#[case] input: &str, #[case] expected: u64) {
        assert_eq!(parse_interval(input).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("10")]
    #[case("s")]
    #[case("-5s")]
    #[case("+5s")]
    #[case("1.5m")]
    #[case("10h")]
    #[case("ten s")]
    #[case("18446744073709551615m")]
    #[case("99999999999999999999s")]
    fn parse_interval_rejects(#[case] input: &str) {
        let err = parse_interval(input).unwrap_err();
        assert!(matches!(err, Error::InvalidInterval { .. }), "got {err:?}");
        assert!(err.is_config());
    }

    #[test]
    fn target_accepts_existing_directories() {
        let source = tempdir().unwrap();
        let replica = tempdir().unwrap();
        let logs = tempdir().unwrap();

        let target = SyncTarget::new(source.path(), replica.path(), logs.path(), 30).unwrap();

        assert_eq!(target.interval(), Duration::from_secs(30));
        assert!(target.log_file().ends_with(LOG_FILE_NAME));
        assert!(target.source().is_absolute());
    }

    #[rstest]
    #[case(0, "source")]
    #[case(1, "replica")]
    #[case(2, "log")]
    fn target_rejects_missing_directory(#[case] missing: usize, #[case] role: &str) {
        let dirs = [tempdir().unwrap(), tempdir().unwrap(), tempdir().unwrap()];
        let mut paths: Vec<PathBuf> = dirs.iter().map(|d| d.path().to_path_buf()).collect();
        paths[missing] = paths[missing].join("absent");

        let err = SyncTarget::new(&paths[0], &paths[1], &paths[2], 1).unwrap_err();

        match err {
            Error::NotADirectory { role: r, .. } => assert_eq!(r, role),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn target_rejects_file_as_directory() {
        let source = tempdir().unwrap();
        let replica = tempdir().unwrap();
        let file = replica.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();

        let err = SyncTarget::new(source.path(), replica.path(), &file, 1).unwrap_err();
        assert!(err.to_string().contains("log"));
    }

    #[test]
    fn target_rejects_nested_replica() {
        let source = tempdir().unwrap();
        let nested = source.path().join("replica");
        std::fs::create_dir(&nested).unwrap();
        let logs = tempdir().unwrap();

        let err = SyncTarget::new(source.path(), &nested, logs.path(), 1).unwrap_err();
        assert!(matches!(err, Error::OverlappingTrees { .. }));
        assert!(err.is_config());
    }
}
