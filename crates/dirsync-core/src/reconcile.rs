//! Applying an action plan to the replica
//!
//! Actions run in a fixed order so that no step depends on something a
//! later step provides:
//!
//! 1. remove files
//! 2. remove folders, deepest first
//! 3. create folders
//! 4. copy files
//!
//! The first failing action aborts the rest of the plan.

use std::path::Path;

use dirsync_fs::{RelPath, io};
use tracing::debug;

use crate::event::{EventSink, SyncEvent};
use crate::plan::{Action, ActionPlan};
use crate::{Error, Result};

/// Applies plans to one replica, reading file content from one source.
pub struct Reconciler<'a> {
    source_root: &'a Path,
    replica_root: &'a Path,
    sink: &'a dyn EventSink,
}

impl<'a> Reconciler<'a> {
    pub fn new(source_root: &'a Path, replica_root: &'a Path, sink: &'a dyn EventSink) -> Self {
        Self {
            source_root,
            replica_root,
            sink,
        }
    }

    /// Apply `plan`, reporting each action to the sink as it completes.
    ///
    /// Returns the events of every applied action in order. The source tree
    /// is only ever read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Apply`] for the first action that fails. Actions
    /// before it stay applied and have already been reported.
    pub fn apply(&self, plan: &ActionPlan) -> Result<Vec<SyncEvent>> {
        let mut events = Vec::with_capacity(plan.action_count());

        for key in &plan.files_to_delete {
            self.run(Action::RemoveFile, key, &mut events, |replica| {
                io::remove_file(replica).map(|()| true)
            })?;
        }

        // Reverse lexicographic order puts every child before its parent.
        for key in plan.folders_to_delete.iter().rev() {
            self.run(Action::RemoveDirectory, key, &mut events, |replica| {
                io::remove_dir(replica).map(|()| true)
            })?;
        }

        for key in &plan.folders_to_create {
            self.run(Action::CreateDirectory, key, &mut events, io::create_dir_all)?;
        }

        for key in &plan.files_to_sync {
            let source = key.under(self.source_root);
            self.run(Action::CopyFile, key, &mut events, |replica| {
                io::copy_file(&source, replica).map(|bytes| {
                    debug!(%key, bytes, "copied");
                    true
                })
            })?;
        }

        Ok(events)
    }

    /// Run one action against the replica path of `key`.
    ///
    /// `op` returns whether it changed anything; no-ops are not reported.
    fn run<F>(&self, action: Action, key: &RelPath, events: &mut Vec<SyncEvent>, op: F) -> Result<()>
    where
        F: FnOnce(&Path) -> dirsync_fs::Result<bool>,
    {
        let replica = key.under(self.replica_root);
        let changed = op(&replica).map_err(|source| Error::Apply {
            action,
            path: key.clone(),
            source,
        })?;

        if changed {
            let event = SyncEvent::applied(action, key.clone());
            self.sink.record(&event);
            events.push(event);
        }
        Ok(())
    }
}
