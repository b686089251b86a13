//! One full sync cycle against a configured target

use tracing::debug;

use crate::Result;
use crate::config::SyncTarget;
use crate::diff::diff_trees;
use crate::event::{EventSink, SyncEvent};
use crate::plan::ActionPlan;
use crate::reconcile::Reconciler;

/// Outcome of a successful cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// The plan computed at the start of the cycle
    pub plan: ActionPlan,
    /// Events of the actions applied, in order
    pub events: Vec<SyncEvent>,
}

impl CycleReport {
    /// Whether the cycle found nothing to do.
    pub fn is_noop(&self) -> bool {
        self.events.is_empty()
    }
}

/// Keeps one replica in line with one source.
pub struct DirectorySyncer<'a> {
    target: SyncTarget,
    sink: &'a dyn EventSink,
}

impl<'a> DirectorySyncer<'a> {
    pub fn new(target: SyncTarget, sink: &'a dyn EventSink) -> Self {
        Self { target, sink }
    }

    pub fn target(&self) -> &SyncTarget {
        &self.target
    }

    /// Scan, diff and apply once, then report `synchronized`.
    ///
    /// # Errors
    ///
    /// A failed cycle is reported to the sink before its error is returned.
    /// Nothing carries over to the next cycle.
    pub fn run_cycle(&self) -> Result<CycleReport> {
        match self.try_cycle() {
            Ok(report) => {
                self.sink.record(&SyncEvent::Synchronized);
                Ok(report)
            }
            Err(e) => {
                self.sink.cycle_failed(&e);
                Err(e)
            }
        }
    }

    fn try_cycle(&self) -> Result<CycleReport> {
        let source = self.target.source();
        let replica = self.target.replica();

        let plan = diff_trees(source, replica)?;
        debug!(actions = plan.action_count(), "applying plan");

        let events = Reconciler::new(source, replica, self.sink).apply(&plan)?;
        Ok(CycleReport { plan, events })
    }
}
