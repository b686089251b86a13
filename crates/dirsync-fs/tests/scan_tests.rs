//! Scanner behavior against trees built with the shared fixtures

use dirsync_fs::{RelPath, scan_tree};
use dirsync_test_utils::tree::TestTree;
use pretty_assertions::assert_eq;

#[test]
fn scan_keys_match_fixture_listing() {
    let tree = TestTree::new();
    tree.file("readme.txt", "r")
        .file("docs/spec.txt", "s")
        .file("docs/deep/er/notes.md", "n")
        .dir("empty/inner");

    let scan = scan_tree(tree.root()).unwrap();

    let files: Vec<_> = scan.files.iter().map(RelPath::to_string).collect();
    let expected: Vec<_> = tree.files().into_iter().collect();
    assert_eq!(files, expected);

    let folders: Vec<_> = scan
        .folders
        .iter()
        .filter(|k| !k.is_root())
        .map(RelPath::to_string)
        .collect();
    let expected: Vec<_> = tree.dirs().into_iter().collect();
    assert_eq!(folders, expected);
}

#[test]
fn source_and_replica_produce_identical_keys() {
    let source = TestTree::new();
    let replica = TestTree::new();
    for tree in [&source, &replica] {
        tree.file("a/b/c.txt", "same").dir("a/empty");
    }

    assert_eq!(
        scan_tree(source.root()).unwrap(),
        scan_tree(replica.root()).unwrap()
    );
}

#[test]
fn every_level_of_a_nested_folder_is_recorded() {
    let tree = TestTree::new();
    tree.dir("a/b/c");

    let scan = scan_tree(tree.root()).unwrap();

    for key in ["", "a", "a/b", "a/b/c"] {
        assert!(scan.folders.contains(&RelPath::new(key)), "missing {key:?}");
    }
    assert!(scan.files.is_empty());
}

#[cfg(unix)]
#[test]
fn fixture_listing_and_scan_agree_on_folder_links() {
    use std::os::unix::fs::symlink;

    let tree = TestTree::new();
    let outside = TestTree::new();
    outside.file("docs/spec.txt", "s");
    tree.file("readme.txt", "r");
    symlink(outside.path("docs"), tree.path("docs")).unwrap();

    let scan = scan_tree(tree.root()).unwrap();

    assert_eq!(tree.dirs().len(), 0);
    assert_eq!(
        tree.files().into_iter().collect::<Vec<_>>(),
        vec!["docs".to_string(), "readme.txt".to_string()]
    );
    let mut listed: Vec<_> = scan
        .files
        .iter()
        .chain(&scan.links)
        .map(RelPath::to_string)
        .collect();
    listed.sort();
    assert_eq!(listed, vec!["docs", "readme.txt"]);
}
