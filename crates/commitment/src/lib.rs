// Path: crates/commitment/src/lib.rs
#![forbid(unsafe_code)]
//! # Strata Commitment
//!
//! The commitment and proof layer of the multi-store state database. This
//! crate folds the per-substore `(name, hash)` commitments reported at a
//! commit height into one externally verifiable Merkle root, extracts
//! inclusion proofs for individual stores, and verifies standardized
//! existence/non-existence proofs against supplied arguments.
//!
//! Everything in here is synchronous, in-memory, and deterministic: the
//! same inputs produce the same bytes on every process, which is what lets
//! a third party verify a proof without trusting the node that produced it.

pub mod commit;
pub mod hash;
pub mod merkle;
pub mod op;
pub mod proof;

/// A prelude for easily importing the most common types.
pub mod prelude {
    pub use crate::commit::{CommitInfo, CommitInfoBuilder};
    pub use crate::op::{proof_op_from_map, CommitmentOp, OpChain, ProofOpType};
    pub use crate::proof::{CommitmentProof, ExistenceProof, NonExistenceProof, ProofSpec};
    pub use strata_api::prelude::*;
    pub use strata_types::commitment::{CommitId, ProofOp, StoreInfo, Timestamp};
}
