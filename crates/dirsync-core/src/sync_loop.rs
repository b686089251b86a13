//! Periodic driver
//!
//! Runs a cycle, waits for the poll interval, repeats. The wait races a
//! shutdown future so the host can stop between cycles; a cycle that has
//! started always runs to completion.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::syncer::DirectorySyncer;

/// Counters for a finished loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopSummary {
    /// Cycles started, successful or not
    pub cycles: u64,
    /// Cycles that ended in an error
    pub failed: u64,
}

/// Drives a [`DirectorySyncer`] on a fixed interval.
pub struct SyncLoop<'a> {
    syncer: DirectorySyncer<'a>,
    interval: Duration,
}

impl<'a> SyncLoop<'a> {
    /// Loop using the target's configured interval.
    pub fn new(syncer: DirectorySyncer<'a>) -> Self {
        let interval = syncer.target().interval();
        Self { syncer, interval }
    }

    /// Run until `shutdown` resolves.
    ///
    /// Cycle errors have already been reported by the syncer and never end
    /// the loop.
    pub async fn run<F>(&self, shutdown: F) -> LoopSummary
    where
        F: Future<Output = ()>,
    {
        let mut shutdown = std::pin::pin!(shutdown);
        let mut summary = LoopSummary::default();

        loop {
            summary.cycles += 1;
            if self.syncer.run_cycle().is_err() {
                summary.failed += 1;
            }

            debug!(interval_secs = self.interval.as_secs(), "waiting for next cycle");
            tokio::select! {
                biased;
                () = &mut shutdown => break,
                () = tokio::time::sleep(self.interval) => {}
            }
        }

        debug!(cycles = summary.cycles, failed = summary.failed, "sync loop stopped");
        summary
    }
}
