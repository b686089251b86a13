//! Tree diffing
//!
//! Turns a scan of the source and a scan of the replica into an
//! [`ActionPlan`]. Set algebra lives in [`plan_from_scans`]; [`diff_trees`]
//! adds the scanning and content comparison.

use std::path::Path;

use dirsync_fs::{RelPath, TreeScan, compute_file_checksum, scan_tree};
use tracing::{debug, warn};

use crate::Result;
use crate::plan::ActionPlan;

/// Scan both roots and compute the plan that makes the replica match.
///
/// Every file present on both sides is fingerprinted on both sides.
///
/// # Errors
///
/// Any scan or fingerprint failure aborts the diff; no partial plan is
/// returned.
pub fn diff_trees(source_root: &Path, replica_root: &Path) -> Result<ActionPlan> {
    let source = scan_tree(source_root)?;
    let replica = scan_tree(replica_root)?;

    plan_from_scans(&source, &replica, |key| {
        contents_differ(source_root, replica_root, key)
    })
}

/// Compute a plan from two scans.
///
/// `differs` is called once for each file key present in both scans and
/// reports whether the two copies have different content. Replica links that
/// do not resolve to a file are always scheduled for removal; source links of
/// that kind are ignored.
pub fn plan_from_scans<F>(source: &TreeScan, replica: &TreeScan, mut differs: F) -> Result<ActionPlan>
where
    F: FnMut(&RelPath) -> Result<bool>,
{
    let mut plan = ActionPlan {
        files_to_sync: source.files.difference(&replica.files).cloned().collect(),
        files_to_delete: replica.files.difference(&source.files).cloned().collect(),
        folders_to_create: source.folders.difference(&replica.folders).cloned().collect(),
        folders_to_delete: replica.folders.difference(&source.folders).cloned().collect(),
        type_conflicts: source
            .files
            .intersection(&replica.folders)
            .chain(source.folders.intersection(&replica.files))
            .cloned()
            .collect(),
    };

    for key in &replica.links {
        debug!(%key, "removing replica symlink");
        plan.files_to_delete.insert(key.clone());
    }

    for key in source.files.intersection(&replica.files) {
        if differs(key)? {
            debug!(%key, "content changed");
            plan.files_to_sync.insert(key.clone());
            plan.files_to_delete.insert(key.clone());
        }
    }

    for key in &plan.type_conflicts {
        warn!(%key, "entry changed between file and directory");
    }

    debug!(
        create_dirs = plan.folders_to_create.len(),
        delete_dirs = plan.folders_to_delete.len(),
        sync_files = plan.files_to_sync.len(),
        delete_files = plan.files_to_delete.len(),
        "computed action plan"
    );
    Ok(plan)
}

fn contents_differ(source_root: &Path, replica_root: &Path, key: &RelPath) -> Result<bool> {
    let source = compute_file_checksum(&key.under(source_root))?;
    let replica = compute_file_checksum(&key.under(replica_root))?;
    Ok(source != replica)
}
