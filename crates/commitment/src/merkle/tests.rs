// Path: crates/commitment/src/merkle/tests.rs

use super::*;
use strata_types::error::ProofError;

fn leaves(items: &[&[u8]]) -> Vec<Vec<u8>> {
    items.iter().map(|i| i.to_vec()).collect()
}

/// Replays an inclusion path from a leaf payload, the way an external
/// verifier with no access to the tree would.
fn replay_path(payload: &[u8], path: &[PathStep]) -> Hash {
    let mut current = leaf_hash(payload);
    for step in path {
        current = match step.side {
            Side::Left => inner_hash(&step.sibling, &current),
            Side::Right => inner_hash(&current, &step.sibling),
        };
    }
    current
}

#[test]
fn empty_tree_has_no_root() {
    assert_eq!(root_hash(&[]), None);
}

#[test]
fn single_leaf_root_is_leaf_hash() {
    let input = leaves(&[b"only"]);
    assert_eq!(root_hash(&input), Some(leaf_hash(b"only")));
}

#[test]
fn two_leaf_root_joins_leaf_hashes() {
    let input = leaves(&[b"left", b"right"]);
    let expected = inner_hash(&leaf_hash(b"left"), &leaf_hash(b"right"));
    assert_eq!(root_hash(&input), Some(expected));
}

#[test]
fn three_leaf_tree_splits_at_two() {
    // Split point for n=3 is 2: ((a, b), c).
    let input = leaves(&[b"a", b"b", b"c"]);
    let left = inner_hash(&leaf_hash(b"a"), &leaf_hash(b"b"));
    let expected = inner_hash(&left, &leaf_hash(b"c"));
    assert_eq!(root_hash(&input), Some(expected));
}

#[test]
fn five_leaf_tree_splits_at_four() {
    // Split point for n=5 is 4: (((a,b),(c,d)), e).
    let input = leaves(&[b"a", b"b", b"c", b"d", b"e"]);
    let left = inner_hash(
        &inner_hash(&leaf_hash(b"a"), &leaf_hash(b"b")),
        &inner_hash(&leaf_hash(b"c"), &leaf_hash(b"d")),
    );
    let expected = inner_hash(&left, &leaf_hash(b"e"));
    assert_eq!(root_hash(&input), Some(expected));
}

#[test]
fn leaf_and_inner_domains_are_separated() {
    // A 33-byte payload that mimics an inner preimage must not collide
    // with the inner hash of the same bytes.
    let a = leaf_hash(b"a");
    let b = leaf_hash(b"b");
    let mut fake_inner = Vec::new();
    fake_inner.extend_from_slice(&a);
    fake_inner.extend_from_slice(&b);
    assert_ne!(leaf_hash(&fake_inner), inner_hash(&a, &b));
}

#[test]
fn paths_replay_to_root_for_every_index_and_size() {
    for n in 1..=8usize {
        let input: Vec<Vec<u8>> = (0..n).map(|i| format!("leaf-{i}").into_bytes()).collect();
        let expected_root = root_hash(&input).unwrap();

        for index in 0..n {
            let (root, path) = root_with_path(&input, index).unwrap();
            assert_eq!(root, expected_root, "root for n={n} index={index}");
            assert_eq!(
                replay_path(&input[index], &path),
                expected_root,
                "replayed path for n={n} index={index}"
            );
        }
    }
}

#[test]
fn single_leaf_path_is_empty() {
    let input = leaves(&[b"only"]);
    let (root, path) = root_with_path(&input, 0).unwrap();
    assert_eq!(root, leaf_hash(b"only"));
    assert!(path.is_empty());
}

#[test]
fn changing_one_leaf_changes_the_root() {
    let base = leaves(&[b"a", b"b", b"c"]);
    let mut tampered = base.clone();
    tampered[1] = b"B".to_vec();
    assert_ne!(root_hash(&base), root_hash(&tampered));
}

#[test]
fn path_for_empty_tree_is_an_error() {
    assert_eq!(root_with_path(&[], 0), Err(ProofError::EmptyTree));
}

#[test]
fn path_for_out_of_range_index_is_an_error() {
    let input = leaves(&[b"a", b"b"]);
    assert_eq!(
        root_with_path(&input, 2),
        Err(ProofError::LeafIndexOutOfRange { index: 2, len: 2 })
    );
}
