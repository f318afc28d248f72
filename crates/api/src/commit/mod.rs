// Path: crates/api/src/commit/mod.rs
//! The contract a substore engine fulfils toward the commitment layer.

use strata_types::commitment::CommitId;

/// A committed substore, as seen by the aggregate commitment layer.
///
/// The aggregate never inspects a store's internal structure; all it
/// consumes is a stable name and the store's own root commitment. How the
/// store computes that root (versioned tree, sparse tree, flat hash) is
/// entirely its own business.
pub trait CommitStore {
    /// The store's unique name within the multi-store.
    fn name(&self) -> &str;

    /// The store's commit id at the height being aggregated.
    fn commit_id(&self) -> CommitId;
}
