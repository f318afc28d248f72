// Path: crates/api/src/error/mod.rs
//! Re-exports of the core error types from the central types crate.

pub use strata_types::error::{CodecError, ProofError};
