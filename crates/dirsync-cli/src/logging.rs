//! Log file setup
//!
//! Events go to `<log_dir>/dirsync.log`, one line each, prefixed with a
//! local timestamp. The file is appended to and held under an exclusive
//! lock for the life of the process.

use std::fmt;
use std::fs::File;
use std::sync::Mutex;

use chrono::Local;
use dirsync_core::SyncTarget;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

use crate::error::{CliError, Result};

/// `MM/DD/YYYY HH:MM:SS AM`
const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Local wall-clock timestamp for each log line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTimestamp;

impl FormatTime for LogTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", Local::now().format(TIMESTAMP_FORMAT))
    }
}

/// Build the subscriber that writes plain lines to `file`.
///
/// `RUST_LOG` overrides the default level.
pub fn subscriber(file: File, verbose: bool) -> impl Subscriber + Send + Sync {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_timer(LogTimestamp)
        .with_ansi(false)
        .with_target(false)
        .with_level(false)
        .finish()
}

/// Open the target's log file and install the global subscriber.
pub fn init(target: &SyncTarget, verbose: bool) -> Result<()> {
    let file = dirsync_fs::io::open_append_locked(&target.log_file())?;

    tracing::subscriber::set_global_default(subscriber(file, verbose))
        .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
    tracing::debug!(log = %target.log_file().display(), "logging initialised");
    Ok(())
}
