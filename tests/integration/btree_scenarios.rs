//! End-to-end scenarios exercising the public index API.

use memindex::{BTree, IndexError};

#[test]
fn search_on_empty_tree_returns_none() {
    let tree: BTree<u64> = BTree::new(16).unwrap();
    assert!(tree.search(&0).is_none());
    assert!(!tree.contains(&u64::MAX));
}

#[test]
fn construction_rejects_degenerate_degrees() {
    assert!(matches!(
        BTree::<u64>::new(0),
        Err(IndexError::InvalidArgument(_))
    ));
    assert!(matches!(
        BTree::<u64>::new(1),
        Err(IndexError::InvalidArgument(_))
    ));
}

#[test]
fn twenty_thousand_sequential_keys_stay_shallow() {
    let mut tree = BTree::new(16).unwrap();
    for key in 0..20_000u64 {
        tree.insert(key);
    }
    tree.validate().unwrap();

    let stats = tree.stats();
    for probe in [0u64, 9_999, 19_999] {
        let before = stats.snapshot();
        assert!(tree.search(&probe).is_some());
        let after = stats.snapshot();
        let visits = after.search_visits - before.search_visits;
        // ceil(log_16(10_000)) + 1
        assert!(visits <= 5, "lookup of {probe} visited {visits} nodes");
    }
    assert!(tree.height() <= 5);
}

#[test]
fn lookups_find_exactly_the_inserted_keys() {
    let mut tree = BTree::new(3).unwrap();
    for key in (0..5_000u64).map(|i| i * 2) {
        tree.insert(key);
    }
    for key in 0..10_000u64 {
        assert_eq!(tree.contains(&key), key % 2 == 0, "key {key}");
    }
}

#[test]
fn repeated_search_is_idempotent_and_read_only() {
    let mut tree = BTree::new(2).unwrap();
    for key in [44, 17, 3, 91, 17, 56, 8] {
        tree.insert(key);
    }
    let rendered_before = tree.to_string();

    let first = tree.search(&17).map(|(node, idx)| (node.keys().to_vec(), idx));
    let second = tree.search(&17).map(|(node, idx)| (node.keys().to_vec(), idx));
    assert_eq!(first, second);
    assert!(first.is_some());

    assert!(tree.search(&1_000).is_none());
    assert_eq!(tree.to_string(), rendered_before);
    tree.validate().unwrap();
}

#[test]
fn duplicate_inserts_accumulate() {
    let mut tree = BTree::new(2).unwrap();
    tree.insert(5);
    tree.insert(5);
    assert!(tree.search(&5).is_some());

    let keys: Vec<u64> = tree.iter().copied().collect();
    assert_eq!(keys, vec![5, 5]);
    assert_eq!(tree.len(), 2);
}

#[test]
fn interleaved_inserts_keep_global_order() {
    let mut tree = BTree::new(4).unwrap();
    let mut expected = Vec::new();
    for round in 0..200i64 {
        for key in [round, -round, round * 7 % 31] {
            tree.insert(key);
            expected.push(key);
        }
    }
    expected.sort();
    let actual: Vec<i64> = tree.iter().copied().collect();
    assert_eq!(actual, expected);
    tree.validate().unwrap();
}
