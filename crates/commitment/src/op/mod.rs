// Path: crates/commitment/src/op/mod.rs
//! Commitment proof operators and their wire envelope.
//!
//! An operator binds a commitment proof to the key it speaks about and to
//! the proof spec of the tree family that produced it. Only the family's
//! type tag travels on the wire; the spec is reconstructed locally from a
//! fixed table, so a peer can never talk a verifier into checking a proof
//! under weaker hashing rules than the tag demands.

use crate::merkle;
use crate::proof::{
    iavl_spec, simple_spec, smt_spec, verify_membership, verify_non_membership, CommitmentProof,
    ExistenceProof, ProofSpec,
};
use parity_scale_codec::{Decode, Encode};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use strata_api::proof::ProofOperator;
use strata_types::commitment::ProofOp;
use strata_types::error::ProofError;

/// Wire type tag for versioned AVL tree proofs.
pub const PROOF_OP_IAVL: &str = "commitment:iavl";
/// Wire type tag for plain binary Merkle proofs.
pub const PROOF_OP_SIMPLE_MERKLE: &str = "commitment:simple";
/// Wire type tag for sparse Merkle tree proofs.
pub const PROOF_OP_SMT: &str = "commitment:smt";

/// The closed set of supported tree families.
///
/// The tag-to-spec mapping is a versioned constant: an unrecognized tag is
/// a hard decoding error, never a fallback to some default spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofOpType {
    /// Versioned AVL tree.
    Iavl,
    /// Plain binary Merkle tree (the aggregate layer's own family).
    SimpleMerkle,
    /// Sparse Merkle tree.
    Smt,
}

impl ProofOpType {
    /// The wire tag for this family.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProofOpType::Iavl => PROOF_OP_IAVL,
            ProofOpType::SimpleMerkle => PROOF_OP_SIMPLE_MERKLE,
            ProofOpType::Smt => PROOF_OP_SMT,
        }
    }

    /// The proof spec this family's proofs are verified under.
    pub fn spec(&self) -> ProofSpec {
        match self {
            ProofOpType::Iavl => iavl_spec(),
            ProofOpType::SimpleMerkle => simple_spec(),
            ProofOpType::Smt => smt_spec(),
        }
    }
}

impl FromStr for ProofOpType {
    type Err = ProofError;

    fn from_str(tag: &str) -> Result<Self, ProofError> {
        match tag {
            PROOF_OP_IAVL => Ok(ProofOpType::Iavl),
            PROOF_OP_SIMPLE_MERKLE => Ok(ProofOpType::SimpleMerkle),
            PROOF_OP_SMT => Ok(ProofOpType::Smt),
            other => Err(ProofError::UnknownOpType(other.to_string())),
        }
    }
}

impl fmt::Display for ProofOpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A commitment proof bound to its key and tree-family spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitmentOp {
    /// The tree family the proof comes from.
    pub op_type: ProofOpType,
    /// The key the proof proves something about.
    pub key: Vec<u8>,
    /// The spec the proof is verified under. Derived from `op_type`,
    /// never transmitted.
    pub spec: ProofSpec,
    /// The existence or non-existence proof payload.
    pub proof: CommitmentProof,
}

impl CommitmentOp {
    /// Wraps a versioned-AVL proof.
    pub fn new_iavl(key: Vec<u8>, proof: CommitmentProof) -> Self {
        Self {
            op_type: ProofOpType::Iavl,
            spec: iavl_spec(),
            key,
            proof,
        }
    }

    /// Wraps a plain binary Merkle proof.
    pub fn new_simple_merkle(key: Vec<u8>, proof: CommitmentProof) -> Self {
        Self {
            op_type: ProofOpType::SimpleMerkle,
            spec: simple_spec(),
            key,
            proof,
        }
    }

    /// Wraps a sparse Merkle tree proof.
    pub fn new_smt(key: Vec<u8>, proof: CommitmentProof) -> Self {
        Self {
            op_type: ProofOpType::Smt,
            spec: smt_spec(),
            key,
            proof,
        }
    }

    /// Runs the proof against `args`.
    ///
    /// The root is derived from the embedded proof material alone; no
    /// externally supplied root is involved. Zero args verify the absence
    /// of the key, one arg verifies its presence with that value, anything
    /// else is a usage error. On success the derived root is returned as a
    /// single-element list so operators can be chained.
    pub fn run(&self, args: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, ProofError> {
        let root = self.proof.calculate_root()?;

        match args {
            [] => verify_non_membership(&self.spec, &root, &self.proof, &self.key)?,
            [value] => verify_membership(&self.spec, &root, &self.proof, &self.key, value)?,
            _ => return Err(ProofError::InvalidArgCount { got: args.len() }),
        }

        Ok(vec![root.to_vec()])
    }

    /// Converts into the generic wire envelope. Only the type tag, key, and
    /// serialized proof payload cross the process boundary.
    pub fn to_proof_op(&self) -> ProofOp {
        ProofOp {
            op_type: self.op_type.as_str().to_string(),
            key: self.key.clone(),
            data: self.proof.encode(),
        }
    }

    /// Reconstructs an operator from its wire envelope, resolving the spec
    /// from the type tag.
    pub fn from_proof_op(op: &ProofOp) -> Result<Self, ProofError> {
        let op_type = ProofOpType::from_str(&op.op_type)?;
        let proof = CommitmentProof::decode(&mut op.data.as_slice())
            .map_err(|e| ProofError::Decode(e.to_string()))?;
        Ok(Self {
            op_type,
            spec: op_type.spec(),
            key: op.key.clone(),
            proof,
        })
    }
}

impl ProofOperator for CommitmentOp {
    fn key(&self) -> &[u8] {
        &self.key
    }

    fn run(&self, args: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, ProofError> {
        CommitmentOp::run(self, args)
    }

    fn to_proof_op(&self) -> ProofOp {
        CommitmentOp::to_proof_op(self)
    }
}

/// Builds a wire inclusion proof for one store from a flat name-to-hash
/// view, without going through a full commit record.
///
/// Fails with an unknown-store error when `store_name` is not a key of the
/// map. That is distinct from a verified non-existence proof: it means the
/// proof cannot even be attempted.
pub fn proof_op_from_map(
    commitments: &BTreeMap<String, Vec<u8>>,
    store_name: &str,
) -> Result<ProofOp, ProofError> {
    let value = commitments
        .get(store_name)
        .ok_or_else(|| ProofError::UnknownStore(store_name.to_string()))?;

    // BTreeMap iterates in byte-lexicographic name order, which is exactly
    // the aggregate's leaf order.
    let leaves: Vec<Vec<u8>> = commitments
        .iter()
        .map(|(name, hash)| {
            let mut payload = Vec::with_capacity(name.len() + hash.len());
            payload.extend_from_slice(name.as_bytes());
            payload.extend_from_slice(hash);
            payload
        })
        .collect();
    let index = commitments
        .keys()
        .position(|name| name == store_name)
        .ok_or_else(|| ProofError::UnknownStore(store_name.to_string()))?;

    let (_, path) = merkle::root_with_path(&leaves, index)?;
    let existence =
        ExistenceProof::from_merkle_path(store_name.as_bytes().to_vec(), value.clone(), &path);
    let op = CommitmentOp::new_simple_merkle(
        store_name.as_bytes().to_vec(),
        CommitmentProof::Existence(existence),
    );
    Ok(op.to_proof_op())
}

/// An ordered pipeline of proof operators.
///
/// Each step consumes the roots produced by the step before it, so an inner
/// proof's root becomes the value an outer proof vouches for. The final
/// step's root is the chain's result.
#[derive(Debug, Clone)]
pub struct OpChain {
    ops: Vec<CommitmentOp>,
}

impl OpChain {
    /// Creates a chain from operators ordered innermost first.
    pub fn new(ops: Vec<CommitmentOp>) -> Self {
        Self { ops }
    }

    /// Runs every operator in order, feeding roots forward, and returns the
    /// final root. An empty chain is an error.
    pub fn verify(&self, args: &[Vec<u8>]) -> Result<Vec<u8>, ProofError> {
        if self.ops.is_empty() {
            return Err(ProofError::EmptyChain);
        }

        let mut current = args.to_vec();
        for op in &self.ops {
            current = op.run(&current)?;
        }
        // Each run returns exactly one root, so the last output is it.
        current.pop().ok_or(ProofError::EmptyChain)
    }

    /// Runs the chain and additionally requires the final root to equal
    /// `expected_root`.
    pub fn verify_against(
        &self,
        args: &[Vec<u8>],
        expected_root: &[u8],
    ) -> Result<(), ProofError> {
        let root = self.verify(args)?;
        if root != expected_root {
            return Err(ProofError::RootMismatch {
                expected: hex::encode(expected_root),
                got: hex::encode(root),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
