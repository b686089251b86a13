//! Cross-crate scenarios: a fixture tree replicated and then evolved over
//! several cycles.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dirsync_core::{DirectorySyncer, MemorySink, SyncEvent, SyncTarget};
use dirsync_fs::{Fingerprint, compute_file_checksum, scan_tree};
use dirsync_test_utils::tree::TestTree;
use pretty_assertions::assert_eq;

fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/trees/project")
}

/// Fingerprint of every file under `root`, keyed by relative path.
fn snapshot(root: &Path) -> BTreeMap<String, Fingerprint> {
    scan_tree(root)
        .unwrap()
        .files
        .into_iter()
        .map(|key| {
            let fp = compute_file_checksum(&key.under(root)).unwrap();
            (key.to_string(), fp)
        })
        .collect()
}

fn assert_mirrors(source: &Path, replica: &Path) {
    assert_eq!(scan_tree(replica).unwrap(), scan_tree(source).unwrap());
    assert_eq!(snapshot(replica), snapshot(source));
}

#[test]
fn replicates_fixture_without_touching_it() {
    let source = fixture_root();
    let replica = TestTree::new();
    let logs = TestTree::new();
    let before = snapshot(&source);

    let target = SyncTarget::new(&source, replica.root(), logs.root(), 0).unwrap();
    let sink = MemorySink::new();
    let report = DirectorySyncer::new(target, &sink).run_cycle().unwrap();

    assert_mirrors(&source, replica.root());
    assert_eq!(snapshot(&source), before);
    assert_eq!(report.plan.files_to_sync.len(), before.len());
    assert!(report.plan.files_to_delete.is_empty());
    replica.assert_file_content("docs/guides/start.md", "Getting started\n");
}

#[test]
fn evolving_source_converges_every_cycle() {
    let seed = fixture_root();
    let source = TestTree::new();
    let replica = TestTree::new();
    let logs = TestTree::new();
    let sink = MemorySink::new();

    // Seed a writable source from the fixture
    let seed_target = SyncTarget::new(&seed, source.root(), logs.root(), 0).unwrap();
    DirectorySyncer::new(seed_target, &sink).run_cycle().unwrap();

    let target = SyncTarget::new(source.root(), replica.root(), logs.root(), 0).unwrap();
    let cycle_sink = MemorySink::new();
    let syncer = DirectorySyncer::new(target, &cycle_sink);

    syncer.run_cycle().unwrap();
    assert_mirrors(source.root(), replica.root());

    // Modify, add and remove between cycles
    source
        .file("docs/spec.txt", "Specification final\n")
        .file("docs/changelog.md", "v1\n");
    std::fs::remove_dir_all(source.path("docs/guides")).unwrap();

    let report = syncer.run_cycle().unwrap();
    assert_mirrors(source.root(), replica.root());
    assert_eq!(
        report.events,
        vec![
            SyncEvent::FileRemoved("docs/guides/start.md".into()),
            SyncEvent::FileRemoved("docs/spec.txt".into()),
            SyncEvent::DirectoryRemoved("docs/guides".into()),
            SyncEvent::FileCopied("docs/changelog.md".into()),
            SyncEvent::FileCopied("docs/spec.txt".into()),
        ]
    );

    // Damage the replica directly; the next cycle repairs it
    replica.file("assets/data.csv", "tampered").file("intruder.txt", "x");
    std::fs::remove_file(replica.path("readme.txt")).unwrap();

    syncer.run_cycle().unwrap();
    assert_mirrors(source.root(), replica.root());

    // Nothing left to do
    assert!(syncer.run_cycle().unwrap().is_noop());
    assert_eq!(
        cycle_sink
            .messages()
            .iter()
            .filter(|m| *m == "synchronized")
            .count(),
        4
    );
}

#[tokio::test]
async fn loop_converges_fixture() {
    let source = fixture_root();
    let replica = TestTree::new();
    let logs = TestTree::new();
    let sink = MemorySink::new();

    let target = SyncTarget::new(&source, replica.root(), logs.root(), 3600).unwrap();
    let summary = dirsync_core::SyncLoop::new(DirectorySyncer::new(target, &sink))
        .run(std::future::ready(()))
        .await;

    assert_eq!(summary.cycles, 1);
    assert_mirrors(&source, replica.root());
}
