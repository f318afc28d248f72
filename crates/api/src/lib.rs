// Path: crates/api/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]
//! # Strata API
//!
//! Core traits and interfaces for Strata. This crate defines the stable
//! contract between the commitment layer, the substore engines that feed
//! it, and the query layers that consume its proofs.

pub mod commit;
pub mod error;
pub mod proof;

/// A curated set of the most commonly used traits and types.
pub mod prelude {
    pub use crate::commit::CommitStore;
    pub use crate::proof::ProofOperator;
}
