use dirsync_core::{DirectorySyncer, MemorySink, SyncTarget, diff_trees};
use dirsync_fs::scan_tree;
use dirsync_test_utils::tree::TestTree;
use proptest::prelude::*;

/// A small random tree: `(path, Some(content))` is a file, `None` a folder.
fn tree_strategy() -> impl Strategy<Value = Vec<(String, Option<Vec<u8>>)>> {
    let path = prop::collection::vec(prop::sample::select(vec!["a", "b", "c"]), 1..4)
        .prop_map(|segments| segments.join("/"));
    let entry = (path, prop::option::of(prop::collection::vec(any::<u8>(), 0..8)));
    prop::collection::vec(entry, 0..8)
}

/// Materialise entries, skipping any that collide with an earlier entry.
fn build(tree: &TestTree, entries: &[(String, Option<Vec<u8>>)]) {
    for (path, content) in entries {
        let native = tree.path(path);
        let blocked = native
            .ancestors()
            .skip(1)
            .take_while(|p| *p != tree.root())
            .any(|p| p.is_file());
        if blocked || native.exists() {
            continue;
        }
        match content {
            Some(bytes) => {
                tree.file(path, bytes);
            }
            None => {
                tree.dir(path);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_one_cycle_converges(source in tree_strategy(), replica in tree_strategy()) {
        let (src, rep, logs) = (TestTree::new(), TestTree::new(), TestTree::new());
        build(&src, &source);
        build(&rep, &replica);

        let target = SyncTarget::new(src.root(), rep.root(), logs.root(), 0).unwrap();
        let sink = MemorySink::new();
        DirectorySyncer::new(target, &sink).run_cycle().unwrap();

        prop_assert_eq!(scan_tree(rep.root()).unwrap(), scan_tree(src.root()).unwrap());
        for file in src.files() {
            prop_assert_eq!(rep.read(&file), src.read(&file));
        }

        // Idempotence
        prop_assert!(diff_trees(src.root(), rep.root()).unwrap().is_empty());
    }
}
