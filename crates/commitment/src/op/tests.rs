// Path: crates/commitment/src/op/tests.rs

use super::*;
use crate::hash::Hash;
use crate::merkle;
use crate::proof::{CommitmentProof, ExistenceProof};
use std::collections::BTreeMap;
use strata_types::error::ProofError;

fn leaf_payload(name: &str, hash: &[u8]) -> Vec<u8> {
    let mut payload = name.as_bytes().to_vec();
    payload.extend_from_slice(hash);
    payload
}

/// Builds a simple-merkle operator proving `entries[index]`, plus the tree
/// root it should verify against.
fn simple_op_for(entries: &[(&str, &[u8])], index: usize) -> (Hash, CommitmentOp) {
    let leaves: Vec<Vec<u8>> = entries
        .iter()
        .map(|(name, hash)| leaf_payload(name, hash))
        .collect();
    let (root, path) = merkle::root_with_path(&leaves, index).unwrap();
    let (name, hash) = entries[index];
    let existence =
        ExistenceProof::from_merkle_path(name.as_bytes().to_vec(), hash.to_vec(), &path);
    (
        root,
        CommitmentOp::new_simple_merkle(
            name.as_bytes().to_vec(),
            CommitmentProof::Existence(existence),
        ),
    )
}

const STORES: &[(&str, &[u8])] = &[
    ("auth", b"hash-auth"),
    ("bank", b"hash-bank"),
    ("ibc", b"hash-ibc"),
];

#[test]
fn run_verifies_existence_and_returns_root() {
    let (root, op) = simple_op_for(STORES, 1);
    let result = op.run(&[b"hash-bank".to_vec()]).unwrap();
    assert_eq!(result, vec![root.to_vec()]);
}

#[test]
fn run_rejects_wrong_value() {
    let (_, op) = simple_op_for(STORES, 1);
    let err = op.run(&[b"hash-auth".to_vec()]).unwrap_err();
    assert!(matches!(err, ProofError::InvalidExistence { .. }));
}

#[test]
fn run_with_no_args_rejects_existence_proof() {
    // "bank" is present; claiming absence must fail.
    let (_, op) = simple_op_for(STORES, 1);
    let err = op.run(&[]).unwrap_err();
    assert!(matches!(err, ProofError::InvalidNonExistence { .. }));
}

#[test]
fn run_rejects_two_or_more_args() {
    let (_, op) = simple_op_for(STORES, 1);
    for extra in 2..=4usize {
        let args = vec![b"hash-bank".to_vec(); extra];
        let err = op.run(&args).unwrap_err();
        assert_eq!(err, ProofError::InvalidArgCount { got: extra });
    }
}

#[test]
fn op_type_tags_round_trip() {
    for op_type in [ProofOpType::Iavl, ProofOpType::SimpleMerkle, ProofOpType::Smt] {
        assert_eq!(op_type.as_str().parse::<ProofOpType>().unwrap(), op_type);
    }
}

#[test]
fn unknown_tag_is_a_hard_error() {
    let err = "commitment:verkle".parse::<ProofOpType>().unwrap_err();
    assert_eq!(err, ProofError::UnknownOpType("commitment:verkle".to_string()));
}

#[test]
fn wire_envelope_round_trips() {
    let (_, op) = simple_op_for(STORES, 2);
    let wire = op.to_proof_op();
    assert_eq!(wire.op_type, "commitment:simple");
    assert_eq!(wire.key, b"ibc".to_vec());

    let decoded = CommitmentOp::from_proof_op(&wire).unwrap();
    assert_eq!(decoded, op);
}

#[test]
fn wire_envelope_with_unknown_tag_fails_to_decode() {
    let (_, op) = simple_op_for(STORES, 2);
    let mut wire = op.to_proof_op();
    wire.op_type = "commitment:patricia".to_string();
    let err = CommitmentOp::from_proof_op(&wire).unwrap_err();
    assert!(matches!(err, ProofError::UnknownOpType(_)));
}

#[test]
fn wire_envelope_with_corrupt_payload_fails_to_decode() {
    let (_, op) = simple_op_for(STORES, 2);
    let mut wire = op.to_proof_op();
    wire.data.truncate(wire.data.len() / 2);
    let err = CommitmentOp::from_proof_op(&wire).unwrap_err();
    assert!(matches!(err, ProofError::Decode(_)));
}

// --- Map proofs ---

fn commit_map() -> BTreeMap<String, Vec<u8>> {
    let mut map = BTreeMap::new();
    map.insert("a".to_string(), b"hash-a".to_vec());
    map.insert("b".to_string(), b"hash-b".to_vec());
    map.insert("c".to_string(), b"hash-c".to_vec());
    map
}

#[test]
fn map_proof_verifies_against_the_map_root() {
    let map = commit_map();
    let leaves: Vec<Vec<u8>> = map
        .iter()
        .map(|(name, hash)| leaf_payload(name, hash))
        .collect();
    let root = merkle::root_hash(&leaves).unwrap();

    let wire = proof_op_from_map(&map, "b").unwrap();
    let op = CommitmentOp::from_proof_op(&wire).unwrap();
    let result = op.run(&[b"hash-b".to_vec()]).unwrap();
    assert_eq!(result, vec![root.to_vec()]);
}

#[test]
fn map_proof_for_unknown_store_fails() {
    let err = proof_op_from_map(&commit_map(), "d").unwrap_err();
    assert_eq!(err, ProofError::UnknownStore("d".to_string()));
}

// --- Chained operators ---

#[test]
fn single_op_chain_returns_its_root() {
    let (root, op) = simple_op_for(STORES, 0);
    let chain = OpChain::new(vec![op]);
    let result = chain.verify(&[b"hash-auth".to_vec()]).unwrap();
    assert_eq!(result, root.to_vec());
}

#[test]
fn two_op_chain_feeds_inner_root_to_outer_proof() {
    // Inner layer: a substore's own tree containing one key.
    let inner_entries: &[(&str, &[u8])] = &[("balances", b"value-bytes")];
    let (inner_root, inner_op) = simple_op_for(inner_entries, 0);

    // Outer layer: the aggregate commits to the substore's root.
    let outer_entries_owned = [("bank".to_string(), inner_root.to_vec())];
    let outer_entries: Vec<(&str, &[u8])> = outer_entries_owned
        .iter()
        .map(|(name, hash)| (name.as_str(), hash.as_slice()))
        .collect();
    let (outer_root, outer_op) = simple_op_for(&outer_entries, 0);

    let chain = OpChain::new(vec![inner_op, outer_op]);
    let result = chain.verify(&[b"value-bytes".to_vec()]).unwrap();
    assert_eq!(result, outer_root.to_vec());

    chain
        .verify_against(&[b"value-bytes".to_vec()], &outer_root)
        .unwrap();
}

#[test]
fn chain_against_wrong_root_fails() {
    let (_, op) = simple_op_for(STORES, 0);
    let chain = OpChain::new(vec![op]);
    let err = chain
        .verify_against(&[b"hash-auth".to_vec()], &[0u8; 32])
        .unwrap_err();
    assert!(matches!(err, ProofError::RootMismatch { .. }));
}

#[test]
fn empty_chain_is_an_error() {
    let chain = OpChain::new(vec![]);
    assert_eq!(chain.verify(&[]).unwrap_err(), ProofError::EmptyChain);
}
