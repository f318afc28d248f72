// Path: crates/types/src/commitment/mod.rs
//! Core types for store commitments.

use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Nanoseconds in one second, used to split and merge [`Timestamp`] values.
pub const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Identifies one store's committed state at one height.
///
/// The zero value (`version == 0` and an empty hash) means "unset" and is
/// what lookups return for a store that is not part of a commitment.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitId {
    /// The height at which the store was committed.
    pub version: u64,
    /// The store's root content hash. Opaque to the aggregate layer.
    pub hash: Vec<u8>,
}

impl CommitId {
    /// Creates a commit id from a version and a root hash.
    pub fn new(version: u64, hash: Vec<u8>) -> Self {
        Self { version, hash }
    }

    /// Returns true for the "unset" zero value.
    pub fn is_zero(&self) -> bool {
        self.version == 0 && self.hash.is_empty()
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitId{{{}:{}}}", hex::encode(&self.hash), self.version)
    }
}

/// One named substore's commitment within an aggregate.
///
/// `name` is the sort and lookup key; comparison is byte-lexicographic and
/// names are unique within one commitment.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct StoreInfo {
    /// The substore's name.
    pub name: String,
    /// The substore's commit id at the aggregate's height.
    pub commit_id: CommitId,
}

impl StoreInfo {
    /// Creates a store info record.
    pub fn new(name: impl Into<String>, commit_id: CommitId) -> Self {
        Self {
            name: name.into(),
            commit_id,
        }
    }

    /// The store's root content hash.
    pub fn hash(&self) -> &[u8] {
        &self.commit_id.hash
    }
}

/// A commit wall-clock instant, split into seconds and nanoseconds.
///
/// The wire form is a single signed nanosecond count; the split
/// representation keeps `nanos` normalized to `0..NANOS_PER_SEC` so equal
/// instants always compare equal.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timestamp {
    /// Whole seconds since the Unix epoch. Negative for pre-epoch instants.
    pub secs: i64,
    /// Nanosecond remainder, always in `0..NANOS_PER_SEC`.
    pub nanos: u32,
}

impl Timestamp {
    /// Creates a timestamp from already-normalized parts.
    pub fn new(secs: i64, nanos: u32) -> Self {
        Self { secs, nanos }
    }

    /// The current wall-clock time. Falls back to the epoch if the system
    /// clock reports a pre-epoch instant.
    pub fn now() -> Self {
        match std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH) {
            Ok(elapsed) => Self {
                secs: elapsed.as_secs() as i64,
                nanos: elapsed.subsec_nanos(),
            },
            Err(_) => Self::default(),
        }
    }

    /// Rebuilds a timestamp from a signed nanosecond count, splitting via
    /// integer division and modulo against one second in nanoseconds.
    pub fn from_unix_nanos(nanos: i64) -> Self {
        Self {
            secs: nanos.div_euclid(NANOS_PER_SEC),
            nanos: nanos.rem_euclid(NANOS_PER_SEC) as u32,
        }
    }

    /// The instant as a signed nanosecond count since the Unix epoch.
    pub fn unix_nanos(&self) -> i64 {
        self.secs * NANOS_PER_SEC + i64::from(self.nanos)
    }
}

/// The generic wire proof-operation envelope.
///
/// This is the sole cross-process proof artifact: a type tag naming the
/// tree family, the key the proof speaks about, and the serialized proof
/// payload. The tag alone decides how `data` is interpreted on the
/// receiving side.
#[derive(Serialize, Deserialize, Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct ProofOp {
    /// The tree-family type tag, e.g. `"commitment:simple"`.
    pub op_type: String,
    /// The key the proof proves something about.
    pub key: Vec<u8>,
    /// The serialized commitment-proof payload.
    pub data: Vec<u8>,
}
