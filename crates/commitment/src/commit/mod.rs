// Path: crates/commitment/src/commit/mod.rs
//! The aggregate commit record for one height of the multi-store.
//!
//! Assembly and use are two separate phases: a [`CommitInfoBuilder`]
//! collects per-store commitments in any order, and `finalize` freezes them
//! into a [`CommitInfo`] whose store list is sorted by name and whose
//! aggregate root is already computed. After that point the record is
//! immutable (every method takes `&self`), so it can be read from any
//! number of threads without synchronization.

use crate::merkle;
use crate::op::CommitmentOp;
use crate::proof::{CommitmentProof, ExistenceProof};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strata_api::commit::CommitStore;
use strata_types::codec;
use strata_types::commitment::{CommitId, StoreInfo, Timestamp};
use strata_types::error::{CodecError, ProofError};

/// Assembles the per-store commitments for one height.
#[derive(Debug, Clone, Default)]
pub struct CommitInfoBuilder {
    version: u64,
    timestamp: Timestamp,
    stores: BTreeMap<String, CommitId>,
}

impl CommitInfoBuilder {
    /// Starts a record for the given height and commit time.
    pub fn new(version: u64, timestamp: Timestamp) -> Self {
        Self {
            version,
            timestamp,
            stores: BTreeMap::new(),
        }
    }

    /// Records one store's commitment. Adding the same name twice keeps the
    /// latest commit id.
    pub fn add_store(&mut self, name: impl Into<String>, commit_id: CommitId) -> &mut Self {
        self.stores.insert(name.into(), commit_id);
        self
    }

    /// Records a committed store through the [`CommitStore`] contract.
    pub fn add_committed<S: CommitStore + ?Sized>(&mut self, store: &S) -> &mut Self {
        self.add_store(store.name(), store.commit_id())
    }

    /// Freezes the record: sorts the stores by name and computes the
    /// aggregate root once, up front.
    pub fn finalize(self) -> CommitInfo {
        let store_infos: Vec<StoreInfo> = self
            .stores
            .into_iter()
            .map(|(name, commit_id)| StoreInfo { name, commit_id })
            .collect();
        let commit_hash = aggregate_root(&store_infos);
        CommitInfo {
            version: self.version,
            store_infos,
            timestamp: self.timestamp,
            commit_hash,
        }
    }
}

/// The committed state of the whole multi-store at one height.
///
/// Constructed by [`CommitInfoBuilder::finalize`] or by [`CommitInfo::decode`];
/// immutable thereafter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    version: u64,
    store_infos: Vec<StoreInfo>,
    timestamp: Timestamp,
    commit_hash: Vec<u8>,
}

impl CommitInfo {
    /// The height this record commits.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The commit wall-clock time.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// The per-store commitments, in stored order.
    pub fn store_infos(&self) -> &[StoreInfo] {
        &self.store_infos
    }

    /// The aggregate root over all stores, computed at construction.
    ///
    /// Empty for a record with no stores: the "no data" sentinel, not a
    /// hash of zero leaves.
    pub fn hash(&self) -> &[u8] {
        &self.commit_hash
    }

    /// The commit id for the given store, or the zero id when the store is
    /// not part of this commitment. An absent store is a valid query
    /// outcome at this layer, not an error.
    pub fn store_commit_id(&self, store_name: &str) -> CommitId {
        self.store_infos
            .iter()
            .find(|si| si.name == store_name)
            .map(|si| si.commit_id.clone())
            .unwrap_or_default()
    }

    /// This record's own commit id: the height plus the aggregate root.
    pub fn commit_id(&self) -> CommitId {
        CommitId {
            version: self.version,
            hash: self.commit_hash.clone(),
        }
    }

    /// Builds the inclusion proof for one store against the aggregate root.
    ///
    /// Returns the root together with a simple-merkle commitment operator
    /// keyed by the store name whose proven value is the store's hash.
    /// Requesting a name that is not part of the commitment is an error;
    /// there is no index such a proof could honestly be built for.
    pub fn store_proof(&self, store_name: &str) -> Result<(Vec<u8>, CommitmentOp), ProofError> {
        if self.store_infos.is_empty() {
            return Err(ProofError::EmptyTree);
        }

        let sorted = self.sorted_infos();
        let index = sorted
            .iter()
            .position(|si| si.name == store_name)
            .ok_or_else(|| ProofError::UnknownStore(store_name.to_string()))?;

        let leaves: Vec<Vec<u8>> = sorted.iter().map(|si| leaf_payload(si)).collect();
        let (root, path) = merkle::root_with_path(&leaves, index)?;

        let existence = ExistenceProof::from_merkle_path(
            store_name.as_bytes().to_vec(),
            sorted[index].hash().to_vec(),
            &path,
        );
        let op = CommitmentOp::new_simple_merkle(
            store_name.as_bytes().to_vec(),
            CommitmentProof::Existence(existence),
        );

        Ok((root.to_vec(), op))
    }

    /// Encodes the record into its deterministic binary form.
    ///
    /// Layout: `uvarint(version) || varint(timestamp nanos) ||
    /// uvarint(store count) || { bytes(name) || bytes(hash) }*`, stores in
    /// stored order. The aggregate root is never encoded; it is recomputed
    /// on decode.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        codec::write_uvarint(&mut buf, self.version);
        codec::write_varint(&mut buf, self.timestamp.unix_nanos());
        codec::write_uvarint(&mut buf, self.store_infos.len() as u64);
        for si in &self.store_infos {
            codec::write_bytes(&mut buf, si.name.as_bytes());
            codec::write_bytes(&mut buf, si.hash());
        }
        buf
    }

    fn encoded_len(&self) -> usize {
        let mut size = codec::uvarint_len(self.version)
            + codec::varint_len(self.timestamp.unix_nanos())
            + codec::uvarint_len(self.store_infos.len() as u64);
        for si in &self.store_infos {
            size += codec::bytes_len(si.name.as_bytes()) + codec::bytes_len(si.hash());
        }
        size
    }

    /// Decodes a record from its binary form, consuming the whole buffer.
    ///
    /// Each store's commit version is reconstructed as the record's own
    /// version; per-store versions are implied by the height, not encoded.
    /// The aggregate root is recomputed from the decoded stores.
    pub fn decode(buf: &[u8]) -> Result<Self, CodecError> {
        let mut input = buf;

        let (version, n) = codec::read_uvarint(input)?;
        input = &input[n..];

        let (timestamp_nanos, n) = codec::read_varint(input)?;
        input = &input[n..];

        let (count, n) = codec::read_uvarint(input)?;
        input = &input[n..];

        let mut store_infos = Vec::new();
        for _ in 0..count {
            let (name_bytes, n) = codec::read_bytes(input)?;
            input = &input[n..];
            let name =
                String::from_utf8(name_bytes).map_err(|e| CodecError::InvalidUtf8(e.to_string()))?;

            let (hash, n) = codec::read_bytes(input)?;
            input = &input[n..];

            store_infos.push(StoreInfo {
                name,
                commit_id: CommitId { version, hash },
            });
        }

        if !input.is_empty() {
            return Err(CodecError::TrailingBytes {
                remaining: input.len(),
            });
        }

        let commit_hash = aggregate_root(&store_infos);
        Ok(Self {
            version,
            store_infos,
            timestamp: Timestamp::from_unix_nanos(timestamp_nanos),
            commit_hash,
        })
    }

    fn sorted_infos(&self) -> Vec<&StoreInfo> {
        sorted_refs(&self.store_infos)
    }
}

/// Name-sorted view over store infos, leaving the original order untouched.
fn sorted_refs(store_infos: &[StoreInfo]) -> Vec<&StoreInfo> {
    let mut sorted: Vec<&StoreInfo> = store_infos.iter().collect();
    sorted.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
    sorted
}

/// One leaf payload of the aggregate tree: the store name followed by the
/// store's root hash.
fn leaf_payload(si: &StoreInfo) -> Vec<u8> {
    let mut payload = Vec::with_capacity(si.name.len() + si.hash().len());
    payload.extend_from_slice(si.name.as_bytes());
    payload.extend_from_slice(si.hash());
    payload
}

/// Computes the aggregate root over name-sorted leaves, without touching
/// the caller's ordering. Empty input yields the empty sentinel.
fn aggregate_root(store_infos: &[StoreInfo]) -> Vec<u8> {
    if store_infos.is_empty() {
        return Vec::new();
    }
    let leaves: Vec<Vec<u8>> = sorted_refs(store_infos)
        .iter()
        .map(|si| leaf_payload(si))
        .collect();
    match merkle::root_hash(&leaves) {
        Some(root) => root.to_vec(),
        None => Vec::new(),
    }
}
