//! Log events and the sink they are reported through
//!
//! Every component that reports progress takes a `&dyn EventSink`. The
//! binary installs a [`TracingSink`] once at startup; tests use
//! [`MemorySink`] to observe what a cycle did.

use std::sync::Mutex;

use dirsync_fs::RelPath;
use tracing::{error, info};

use crate::Error;
use crate::plan::Action;

/// One human-readable log event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    FileCopied(RelPath),
    FileRemoved(RelPath),
    DirectoryCreated(RelPath),
    DirectoryRemoved(RelPath),
    /// Terminal event of a successful cycle
    Synchronized,
}

impl SyncEvent {
    /// Event reported after `action` succeeded on `path`.
    pub fn applied(action: Action, path: RelPath) -> Self {
        match action {
            Action::CopyFile => Self::FileCopied(path),
            Action::RemoveFile => Self::FileRemoved(path),
            Action::CreateDirectory => Self::DirectoryCreated(path),
            Action::RemoveDirectory => Self::DirectoryRemoved(path),
        }
    }

    pub fn path(&self) -> Option<&RelPath> {
        match self {
            Self::FileCopied(p)
            | Self::FileRemoved(p)
            | Self::DirectoryCreated(p)
            | Self::DirectoryRemoved(p) => Some(p),
            Self::Synchronized => None,
        }
    }
}

impl std::fmt::Display for SyncEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileCopied(p) => write!(f, "file copied {p}"),
            Self::FileRemoved(p) => write!(f, "file removed {p}"),
            Self::DirectoryCreated(p) => write!(f, "directory created {}", p.display_dir()),
            Self::DirectoryRemoved(p) => write!(f, "directory removed {}", p.display_dir()),
            Self::Synchronized => f.write_str("synchronized"),
        }
    }
}

/// Receiver for sync progress.
pub trait EventSink {
    /// Record an applied action or the end of a cycle.
    fn record(&self, event: &SyncEvent);

    /// Record a cycle that was abandoned because of `error`.
    fn cycle_failed(&self, error: &Error);
}

/// Forwards events to `tracing` at INFO and failures at ERROR.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &SyncEvent) {
        info!("{event}");
    }

    fn cycle_failed(&self, error: &Error) {
        error!("sync failed: {error}");
    }
}

/// Keeps events in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<SyncEvent>>,
    failures: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<SyncEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Rendered messages of the failures recorded so far.
    pub fn failures(&self) -> Vec<String> {
        self.failures.lock().map(|f| f.clone()).unwrap_or_default()
    }

    /// Events rendered as log messages.
    pub fn messages(&self) -> Vec<String> {
        self.events().iter().map(ToString::to_string).collect()
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: &SyncEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }

    fn cycle_failed(&self, error: &Error) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push(error.to_string());
        }
    }
}
