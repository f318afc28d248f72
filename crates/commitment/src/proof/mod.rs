// Path: crates/commitment/src/proof/mod.rs
//! Standardized commitment proofs and their stateless verifier.
//!
//! A proof is a self-contained recipe for recomputing a root hash from a
//! key and value (existence) or from bounding neighbors (non-existence).
//! The hashing rules a proof claims to follow are checked against a
//! [`ProofSpec`] before the root is trusted; a proof that deviates from the
//! spec of its tree family is rejected outright rather than verified under
//! the wrong rules.

use crate::hash::{sha256, Hash};
use crate::merkle::{PathStep, Side, INNER_PREFIX, LEAF_PREFIX};
use parity_scale_codec::{Decode, Encode};
use strata_types::codec;
use strata_types::error::ProofError;

// --- Hashing Primitives ---

/// The hash operation to apply to a key or value before concatenation.
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub enum HashOp {
    /// Do not hash the data; use it directly.
    NoHash,
    /// Apply SHA-256 to the data.
    Sha256,
}

impl HashOp {
    /// Applies the op as a prehash, where passing data through unchanged is
    /// legitimate.
    fn prehash(&self, data: &[u8]) -> Vec<u8> {
        match self {
            HashOp::NoHash => data.to_vec(),
            HashOp::Sha256 => sha256(data).to_vec(),
        }
    }

    /// Applies the op as a node hash. Node hashes must produce a fixed-width
    /// digest, so `NoHash` is rejected here.
    fn hash_node(&self, data: &[u8]) -> Result<Hash, ProofError> {
        match self {
            HashOp::NoHash => Err(ProofError::RootCalculation(
                "node hashing requires a digest operation, got NoHash".to_string(),
            )),
            HashOp::Sha256 => Ok(sha256(data)),
        }
    }
}

/// How the length of a key or value is encoded into the leaf preimage.
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub enum LengthOp {
    /// No length prefix is used.
    NoPrefix,
    /// A protobuf-style varint length prefix is used.
    VarProto,
}

impl LengthOp {
    fn append(&self, buf: &mut Vec<u8>, data: &[u8]) {
        match self {
            LengthOp::NoPrefix => buf.extend_from_slice(data),
            LengthOp::VarProto => codec::write_bytes(buf, data),
        }
    }
}

// --- Proof Data Structures ---

/// The leaf hashing rule: how a key/value pair becomes a leaf digest.
///
/// `prefix` is the domain-separation tag; a verifier rejects any leaf whose
/// rule differs from its spec's in any field.
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct LeafOp {
    /// The digest applied over the assembled preimage.
    pub hash: HashOp,
    /// Prehash applied to the key.
    pub prehash_key: HashOp,
    /// Prehash applied to the value.
    pub prehash_value: HashOp,
    /// Length encoding applied to the (pre-hashed) key and value.
    pub length: LengthOp,
    /// Domain-separation prefix prepended to the preimage.
    pub prefix: Vec<u8>,
}

impl LeafOp {
    /// Computes the leaf digest for `key` and `value`.
    pub fn apply(&self, key: &[u8], value: &[u8]) -> Result<Hash, ProofError> {
        let hashed_key = self.prehash_key.prehash(key);
        let hashed_value = self.prehash_value.prehash(value);

        let mut data = Vec::with_capacity(self.prefix.len() + hashed_key.len() + hashed_value.len() + 8);
        data.extend_from_slice(&self.prefix);
        self.length.append(&mut data, &hashed_key);
        self.length.append(&mut data, &hashed_value);
        self.hash.hash_node(&data)
    }
}

/// One inner step of a proof path.
///
/// The child digest is framed by opaque prefix and suffix bytes; for a
/// binary tree the sibling hash lives in whichever side the child does not.
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct InnerOp {
    /// The digest applied over `prefix || child || suffix`.
    pub hash: HashOp,
    /// Bytes hashed before the child digest.
    pub prefix: Vec<u8>,
    /// Bytes hashed after the child digest.
    pub suffix: Vec<u8>,
}

impl InnerOp {
    /// Folds a child digest into this step's parent digest.
    pub fn apply(&self, child: &Hash) -> Result<Hash, ProofError> {
        let mut data = Vec::with_capacity(self.prefix.len() + child.len() + self.suffix.len());
        data.extend_from_slice(&self.prefix);
        data.extend_from_slice(child);
        data.extend_from_slice(&self.suffix);
        self.hash.hash_node(&data)
    }
}

/// Proof that `key` maps to `value` under some root.
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct ExistenceProof {
    /// The key whose presence is proven.
    pub key: Vec<u8>,
    /// The value the key maps to.
    pub value: Vec<u8>,
    /// The leaf hashing rule used at the bottom of the path.
    pub leaf: LeafOp,
    /// The inner steps from the leaf up to the root.
    pub path: Vec<InnerOp>,
}

impl ExistenceProof {
    /// Builds an existence proof from a tree-builder inclusion path, under
    /// the plain binary Merkle leaf rule.
    ///
    /// A sibling joined on the left lands in the step's prefix, one joined
    /// on the right in its suffix; the inner-node domain tag always leads
    /// the prefix.
    pub fn from_merkle_path(key: Vec<u8>, value: Vec<u8>, path: &[PathStep]) -> Self {
        let path = path
            .iter()
            .map(|step| match step.side {
                Side::Left => {
                    let mut prefix = Vec::with_capacity(1 + step.sibling.len());
                    prefix.push(INNER_PREFIX);
                    prefix.extend_from_slice(&step.sibling);
                    InnerOp {
                        hash: HashOp::Sha256,
                        prefix,
                        suffix: Vec::new(),
                    }
                }
                Side::Right => InnerOp {
                    hash: HashOp::Sha256,
                    prefix: vec![INNER_PREFIX],
                    suffix: step.sibling.to_vec(),
                },
            })
            .collect();

        Self {
            key,
            value,
            leaf: simple_leaf_op(),
            path,
        }
    }

    /// Recomputes the root this proof commits to.
    pub fn calculate_root(&self) -> Result<Hash, ProofError> {
        let mut current = self.leaf.apply(&self.key, &self.value)?;
        for op in &self.path {
            current = op.apply(&current)?;
        }
        Ok(current)
    }

    /// Verifies that this proof places `key` with `value` under `root`
    /// following the hashing rules of `spec`.
    pub fn verify(
        &self,
        spec: &ProofSpec,
        root: &Hash,
        key: &[u8],
        value: &[u8],
    ) -> Result<(), ProofError> {
        if self.key != key || self.value != value {
            return Err(ProofError::InvalidExistence {
                key: hex::encode(key),
            });
        }
        self.check_against_spec(spec)?;

        let computed = self.calculate_root()?;
        log::debug!(
            "existence verify: key={} steps={} root={}",
            hex::encode(key),
            self.path.len(),
            hex::encode(computed),
        );
        if computed != *root {
            return Err(ProofError::RootMismatch {
                expected: hex::encode(root),
                got: hex::encode(computed),
            });
        }
        Ok(())
    }

    fn check_against_spec(&self, spec: &ProofSpec) -> Result<(), ProofError> {
        if spec.min_key_length > 0 && self.key.len() < spec.min_key_length {
            return Err(ProofError::SpecMismatch(format!(
                "key length {} below spec minimum {}",
                self.key.len(),
                spec.min_key_length
            )));
        }
        if spec.max_key_length > 0 && self.key.len() > spec.max_key_length {
            return Err(ProofError::SpecMismatch(format!(
                "key length {} above spec maximum {}",
                self.key.len(),
                spec.max_key_length
            )));
        }
        let leaf = &spec.leaf_spec;
        if self.leaf.hash != leaf.hash
            || self.leaf.prehash_key != leaf.prehash_key
            || self.leaf.prehash_value != leaf.prehash_value
            || self.leaf.length != leaf.length
        {
            return Err(ProofError::SpecMismatch(
                "leaf operation does not match the spec's leaf rule".to_string(),
            ));
        }
        // The domain tag must lead the leaf prefix; tree families that fold
        // node metadata into the prefix append it after the tag.
        if !self.leaf.prefix.starts_with(&leaf.prefix) {
            return Err(ProofError::SpecMismatch(
                "leaf prefix does not begin with the spec's domain tag".to_string(),
            ));
        }

        let inner = &spec.inner_spec;
        for op in &self.path {
            if op.hash != inner.hash {
                return Err(ProofError::SpecMismatch(
                    "inner operation uses a different hash than the spec".to_string(),
                ));
            }
            if op.prefix.starts_with(&spec.leaf_spec.prefix) {
                return Err(ProofError::SpecMismatch(
                    "inner operation begins with the leaf domain prefix".to_string(),
                ));
            }
            if op.prefix.len() < inner.min_prefix_length
                || op.prefix.len() > inner.max_prefix_length + inner.child_size
            {
                return Err(ProofError::SpecMismatch(format!(
                    "inner prefix length {} outside spec bounds",
                    op.prefix.len()
                )));
            }
            if op.suffix.len() % inner.child_size != 0 {
                return Err(ProofError::SpecMismatch(format!(
                    "inner suffix length {} is not a whole number of children",
                    op.suffix.len()
                )));
            }
        }
        Ok(())
    }
}

/// Proof that `key` is absent, witnessed by its nearest present neighbors.
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct NonExistenceProof {
    /// The key whose absence is proven.
    pub key: Vec<u8>,
    /// Existence proof for the nearest key below `key`, if any.
    pub left: Option<ExistenceProof>,
    /// Existence proof for the nearest key above `key`, if any.
    pub right: Option<ExistenceProof>,
}

/// A commitment proof: existence or non-existence, mutually exclusive.
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub enum CommitmentProof {
    /// The key is present with a specific value.
    Existence(ExistenceProof),
    /// The key is provably absent.
    NonExistence(NonExistenceProof),
}

impl CommitmentProof {
    /// Recomputes the root implied by the embedded proof material alone.
    pub fn calculate_root(&self) -> Result<Hash, ProofError> {
        match self {
            CommitmentProof::Existence(existence) => existence.calculate_root(),
            CommitmentProof::NonExistence(non_existence) => {
                if let Some(left) = &non_existence.left {
                    left.calculate_root()
                } else if let Some(right) = &non_existence.right {
                    right.calculate_root()
                } else {
                    Err(ProofError::RootCalculation(
                        "non-existence proof carries no neighbor proofs".to_string(),
                    ))
                }
            }
        }
    }
}

// --- Verifier Entry Points ---

/// Verifies that `proof` places `key` with `value` under `root`.
pub fn verify_membership(
    spec: &ProofSpec,
    root: &Hash,
    proof: &CommitmentProof,
    key: &[u8],
    value: &[u8],
) -> Result<(), ProofError> {
    match proof {
        CommitmentProof::Existence(existence) => existence.verify(spec, root, key, value),
        CommitmentProof::NonExistence(_) => Err(ProofError::InvalidExistence {
            key: hex::encode(key),
        }),
    }
}

/// Verifies that `proof` shows `key` to be absent under `root`.
///
/// Both bounding neighbors, when present, must verify against the same
/// root, sit on the correct side of the missing key, and be ordered with
/// respect to each other.
pub fn verify_non_membership(
    spec: &ProofSpec,
    root: &Hash,
    proof: &CommitmentProof,
    key: &[u8],
) -> Result<(), ProofError> {
    let non_existence = match proof {
        CommitmentProof::NonExistence(non_existence) => non_existence,
        CommitmentProof::Existence(_) => {
            return Err(ProofError::InvalidNonExistence {
                key: hex::encode(key),
            })
        }
    };

    if non_existence.key != key {
        return Err(ProofError::InvalidNonExistence {
            key: hex::encode(key),
        });
    }
    if non_existence.left.is_none() && non_existence.right.is_none() {
        return Err(ProofError::InvalidNonExistence {
            key: hex::encode(key),
        });
    }

    if let Some(left) = &non_existence.left {
        if left.key.as_slice() >= key {
            return Err(ProofError::InvalidNonExistence {
                key: hex::encode(key),
            });
        }
        left.verify(spec, root, &left.key, &left.value)?;
    }
    if let Some(right) = &non_existence.right {
        if right.key.as_slice() <= key {
            return Err(ProofError::InvalidNonExistence {
                key: hex::encode(key),
            });
        }
        right.verify(spec, root, &right.key, &right.value)?;
    }
    if let (Some(left), Some(right)) = (&non_existence.left, &non_existence.right) {
        if left.key >= right.key {
            return Err(ProofError::InvalidNonExistence {
                key: hex::encode(key),
            });
        }
    }

    log::debug!(
        "non-existence verify: key={} root={}",
        hex::encode(key),
        hex::encode(root),
    );
    Ok(())
}

// --- Proof Specs ---

/// Structural parameters for inner path steps of one tree family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerSpec {
    /// The digest inner steps must use.
    pub hash: HashOp,
    /// Minimum allowed inner prefix length, before any embedded child.
    pub min_prefix_length: usize,
    /// Maximum allowed inner prefix length, before any embedded child.
    pub max_prefix_length: usize,
    /// Width of one embedded child (digest plus any framing bytes).
    pub child_size: usize,
}

/// Everything a verifier must pin down about a tree family before trusting
/// one of its proofs.
///
/// A spec is derived locally from the wire type tag and is never itself
/// transmitted, so the tag-to-spec mapping is a fixed, versioned constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofSpec {
    /// The exact leaf rule proofs of this family must carry.
    pub leaf_spec: LeafOp,
    /// Bounds on the shape of inner path steps.
    pub inner_spec: InnerSpec,
    /// Minimum key length in bytes; 0 means unbounded.
    pub min_key_length: usize,
    /// Maximum key length in bytes; 0 means unbounded.
    pub max_key_length: usize,
}

fn simple_leaf_op() -> LeafOp {
    LeafOp {
        hash: HashOp::Sha256,
        prehash_key: HashOp::NoHash,
        prehash_value: HashOp::NoHash,
        length: LengthOp::NoPrefix,
        prefix: vec![LEAF_PREFIX],
    }
}

/// Spec for versioned AVL tree proofs.
pub fn iavl_spec() -> ProofSpec {
    ProofSpec {
        leaf_spec: LeafOp {
            hash: HashOp::Sha256,
            prehash_key: HashOp::NoHash,
            prehash_value: HashOp::Sha256,
            length: LengthOp::VarProto,
            prefix: vec![LEAF_PREFIX],
        },
        inner_spec: InnerSpec {
            hash: HashOp::Sha256,
            min_prefix_length: 4,
            max_prefix_length: 12,
            child_size: 33,
        },
        min_key_length: 0,
        max_key_length: 0,
    }
}

/// Spec for the plain binary Merkle tree the aggregate layer builds.
pub fn simple_spec() -> ProofSpec {
    ProofSpec {
        leaf_spec: simple_leaf_op(),
        inner_spec: InnerSpec {
            hash: HashOp::Sha256,
            min_prefix_length: 1,
            max_prefix_length: 1,
            child_size: 32,
        },
        min_key_length: 0,
        max_key_length: 0,
    }
}

/// Spec for sparse Merkle tree proofs, whose keys are 32-byte paths.
pub fn smt_spec() -> ProofSpec {
    ProofSpec {
        leaf_spec: LeafOp {
            hash: HashOp::Sha256,
            prehash_key: HashOp::NoHash,
            prehash_value: HashOp::Sha256,
            length: LengthOp::NoPrefix,
            prefix: vec![LEAF_PREFIX],
        },
        inner_spec: InnerSpec {
            hash: HashOp::Sha256,
            min_prefix_length: 1,
            max_prefix_length: 1,
            child_size: 32,
        },
        min_key_length: 32,
        max_key_length: 32,
    }
}
