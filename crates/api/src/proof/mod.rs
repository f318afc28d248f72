// Path: crates/api/src/proof/mod.rs
//! The proof-operator contract consumed by query and verification layers.

use strata_types::commitment::ProofOp;
use strata_types::error::ProofError;

/// A single verifiable proof step.
///
/// An operator wraps one commitment proof and knows how to check it against
/// caller-supplied arguments: one argument claims the operator's key maps to
/// that value, zero arguments claim the key is absent. On success it returns
/// the root hash it derived from its own proof material, wrapped in a
/// single-element list so that operators can be chained: the roots produced
/// by one step become the arguments consumed by the next.
pub trait ProofOperator {
    /// The key this operator proves something about.
    fn key(&self) -> &[u8];

    /// Runs the proof against `args` and returns the derived root.
    ///
    /// `args` must have length 0 (non-existence) or 1 (existence with the
    /// given value); any other arity is a usage error. Verification is pure:
    /// no retries, no logging, no side effects.
    fn run(&self, args: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, ProofError>;

    /// Converts the operator into the generic wire envelope.
    fn to_proof_op(&self) -> ProofOp;
}
