// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # Strata Types
//!
//! This crate is the foundational library for Strata, containing the core
//! data structures, error types, and codec primitives shared by the rest of
//! the workspace.
//!
//! ## Architectural Role
//!
//! As the base crate, `strata-types` has minimal dependencies and is itself
//! a dependency for every other crate in the workspace. This structure
//! prevents circular dependencies and provides a stable, canonical
//! definition for shared types like `CommitId`, `StoreInfo`, and the wire
//! `ProofOp` envelope.

/// The canonical, deterministic binary codec primitives used for
/// consensus-critical records (varints and length-prefixed byte strings).
pub mod codec;
/// Core types for store commitments: identifiers, per-store records, and
/// the generic wire proof-operation envelope.
pub mod commitment;
/// A unified set of the error types used across the workspace.
pub mod error;
