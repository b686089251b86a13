//! Reconciliation layer for dirsync
//!
//! Computes and applies the filesystem operations that bring a replica tree
//! in line with a source tree:
//!
//! - **diff**: scan both trees and build an [`ActionPlan`]
//! - **reconcile**: apply a plan to the replica in dependency-safe order
//! - **syncer**: one full cycle against a validated [`SyncTarget`]
//! - **sync_loop**: repeat cycles on the poll interval until shut down
//!
//! # Architecture
//!
//! ```text
//!        dirsync-cli
//!             |
//!        dirsync-core   (diff, reconcile, syncer, sync_loop)
//!             |
//!        dirsync-fs     (scan, checksum, io, path keys)
//! ```
//!
//! Progress is reported through a single [`EventSink`] passed by reference
//! to every component that needs it.

pub mod config;
pub mod diff;
pub mod error;
pub mod event;
pub mod plan;
pub mod reconcile;
pub mod sync_loop;
pub mod syncer;

pub use config::{LOG_FILE_NAME, SyncTarget, parse_interval};
pub use diff::{diff_trees, plan_from_scans};
pub use error::{Error, Result};
pub use event::{EventSink, MemorySink, SyncEvent, TracingSink};
pub use plan::{Action, ActionPlan};
pub use reconcile::Reconciler;
pub use sync_loop::{LoopSummary, SyncLoop};
pub use syncer::{CycleReport, DirectorySyncer};
