// Path: crates/types/src/error/mod.rs
//! Core error types for Strata.

use thiserror::Error;

/// Errors raised while constructing or verifying commitment proofs.
///
/// Every variant carries enough context to diagnose the failure at the
/// caller; this layer never logs and never retries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProofError {
    /// The proof payload failed to reproduce a root hash.
    #[error("Could not calculate root for proof: {0}")]
    RootCalculation(String),
    /// Existence verification failed for the given key.
    #[error("Proof did not verify existence of key {key} with the given value")]
    InvalidExistence {
        /// Hex encoding of the key whose existence was claimed.
        key: String,
    },
    /// Non-existence verification failed for the given key.
    #[error("Proof did not verify absence of key {key}")]
    InvalidNonExistence {
        /// Hex encoding of the key whose absence was claimed.
        key: String,
    },
    /// The recomputed root does not match the expected root.
    #[error("Root mismatch. Expected {expected}, got {got}")]
    RootMismatch {
        /// Hex encoding of the expected root hash.
        expected: String,
        /// Hex encoding of the recomputed root hash.
        got: String,
    },
    /// A proof operator was run with an unsupported number of arguments.
    #[error("Args must be length 0 or 1, got: {got}")]
    InvalidArgCount {
        /// The number of arguments that was actually supplied.
        got: usize,
    },
    /// The requested store name is not part of the commitment.
    #[error("Store {0} is not a registered store name")]
    UnknownStore(String),
    /// The wire type tag does not map to a known proof spec.
    #[error("Unknown proof op type tag: {0}")]
    UnknownOpType(String),
    /// A proof payload could not be decoded from its wire form.
    #[error("Malformed proof payload: {0}")]
    Decode(String),
    /// The proof structure does not conform to the spec for its tree family.
    #[error("Proof does not conform to spec: {0}")]
    SpecMismatch(String),
    /// A proof was requested over an empty tree.
    #[error("Cannot generate a proof over an empty tree")]
    EmptyTree,
    /// An inclusion path was requested for a leaf index that does not exist.
    #[error("Leaf index {index} out of range for {len} leaves")]
    LeafIndexOutOfRange {
        /// The requested leaf index.
        index: usize,
        /// The number of leaves in the tree.
        len: usize,
    },
    /// Chained verification was attempted with no operators.
    #[error("Proof operator chain is empty")]
    EmptyChain,
}

/// Errors raised by the deterministic binary codec.
///
/// A decode error is always fatal to that decode call; nothing is ever
/// partially recovered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The input ended before the value being decoded was complete.
    #[error("Unexpected end of input while decoding {0}")]
    UnexpectedEof(&'static str),
    /// A varint was malformed or truncated.
    #[error("Invalid varint: {0}")]
    InvalidVarint(String),
    /// A declared length exceeds the remaining input.
    #[error("Declared length {len} exceeds remaining input ({remaining} bytes)")]
    LengthOverflow {
        /// The length declared by the prefix.
        len: u64,
        /// The number of bytes actually remaining.
        remaining: usize,
    },
    /// A decoded byte string was expected to be UTF-8 but was not.
    #[error("Invalid UTF-8 in decoded string: {0}")]
    InvalidUtf8(String),
    /// Input remained after a structurally complete record was decoded.
    #[error("Trailing bytes after decoded record: {remaining} bytes")]
    TrailingBytes {
        /// The number of unconsumed bytes.
        remaining: usize,
    },
}
