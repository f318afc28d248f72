// Path: crates/commitment/src/hash/mod.rs
//! SHA-256 helpers shared by the tree builder and the proof verifier.

use sha2::{Digest, Sha256};

/// The length of a digest in bytes.
pub const HASH_SIZE: usize = 32;

/// A cryptographic hash digest.
pub type Hash = [u8; HASH_SIZE];

/// Hashes `data` with SHA-256.
pub fn sha256(data: &[u8]) -> Hash {
    let mut digest = Hash::default();
    digest.copy_from_slice(&Sha256::digest(data));
    digest
}
