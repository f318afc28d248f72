// Path: crates/types/src/codec/mod.rs
//! Deterministic varint codec primitives.
//!
//! These are the protobuf-style wire primitives used by the commit-record
//! codec: unsigned varints, zigzag signed varints, and length-prefixed byte
//! strings. Identical inputs must encode to identical bytes on every
//! process and every implementation, so nothing here is configurable.
//!
//! All `read_*` functions return the decoded value together with the number
//! of bytes consumed, and fail fatally on truncated or malformed input.

use crate::error::CodecError;
use prost::encoding::{decode_varint, encode_varint, encoded_len_varint};

/// Appends `value` as an unsigned LEB128 varint.
pub fn write_uvarint(buf: &mut Vec<u8>, value: u64) {
    encode_varint(value, buf);
}

/// The encoded size of `value` as an unsigned varint.
pub fn uvarint_len(value: u64) -> usize {
    encoded_len_varint(value)
}

/// Reads an unsigned varint from the front of `input`.
pub fn read_uvarint(input: &[u8]) -> Result<(u64, usize), CodecError> {
    let mut cursor = input;
    let value =
        decode_varint(&mut cursor).map_err(|e| CodecError::InvalidVarint(e.to_string()))?;
    Ok((value, input.len() - cursor.len()))
}

/// Appends `value` as a zigzag-encoded signed varint.
pub fn write_varint(buf: &mut Vec<u8>, value: i64) {
    write_uvarint(buf, zigzag_encode(value));
}

/// The encoded size of `value` as a signed varint.
pub fn varint_len(value: i64) -> usize {
    uvarint_len(zigzag_encode(value))
}

/// Reads a zigzag-encoded signed varint from the front of `input`.
pub fn read_varint(input: &[u8]) -> Result<(i64, usize), CodecError> {
    let (raw, consumed) = read_uvarint(input)?;
    Ok((zigzag_decode(raw), consumed))
}

/// Appends `bytes` with an unsigned-varint length prefix.
pub fn write_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    write_uvarint(buf, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// The encoded size of `bytes` with its length prefix.
pub fn bytes_len(bytes: &[u8]) -> usize {
    uvarint_len(bytes.len() as u64) + bytes.len()
}

/// Reads a length-prefixed byte string from the front of `input`.
///
/// The declared length is validated against the remaining input before any
/// allocation, so a corrupt prefix cannot trigger an oversized allocation.
pub fn read_bytes(input: &[u8]) -> Result<(Vec<u8>, usize), CodecError> {
    let (len, prefix) = read_uvarint(input)?;
    let rest = &input[prefix..];
    let len_usize = usize::try_from(len).map_err(|_| CodecError::LengthOverflow {
        len,
        remaining: rest.len(),
    })?;
    if rest.len() < len_usize {
        return Err(CodecError::LengthOverflow {
            len,
            remaining: rest.len(),
        });
    }
    Ok((rest[..len_usize].to_vec(), prefix + len_usize))
}

fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

fn zigzag_decode(raw: u64) -> i64 {
    ((raw >> 1) as i64) ^ -((raw & 1) as i64)
}
