// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Everything that can go wrong happens at construction time (bad keys, bad
//! config) or when decoding a snapshot. Once a `Fuse` exists, `search` is
//! total: any query string, any limit, no errors.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FuseError>;

/// Configuration and snapshot errors.
#[derive(Debug, Error)]
pub enum FuseError {
    /// A key path was empty, or contained an empty segment (`"a..b"`).
    #[error("key path is empty or has an empty segment: {path:?}")]
    EmptyKeyPath { path: String },

    /// Key weights must be finite and strictly positive.
    #[error("key {key:?} has invalid weight {weight} (must be > 0)")]
    InvalidKeyWeight { key: String, weight: f64 },

    /// Threshold must be a finite, non-negative number.
    #[error("threshold {0} is not a finite non-negative number")]
    InvalidThreshold(f64),

    /// Field norm weight must be a finite, non-negative number.
    #[error("field norm weight {0} is not a finite non-negative number")]
    InvalidFieldNormWeight(f64),

    /// A JSON config could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    /// A snapshot could not be decoded.
    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Reasons a snapshot fails to load.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot truncated: need {needed} bytes, have {actual}")]
    Truncated { needed: usize, actual: usize },

    #[error("bad magic bytes {0:02x?}")]
    BadMagic([u8; 4]),

    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u8),

    #[error("checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("payload compression failed: {0}")]
    Encode(#[source] std::io::Error),

    #[error("payload decompression failed: {0}")]
    Decompress(#[source] std::io::Error),

    #[error("payload decode failed: {0}")]
    Payload(#[source] serde_json::Error),

    #[error("payload holds {actual} entries but header says {claimed}")]
    EntryCount { claimed: u32, actual: usize },

    #[error("ref index {0} appears more than once")]
    DuplicateRef(usize),

    #[error("entry {ref_index} has {actual} key slots but the index has {expected} keys")]
    SlotCount {
        ref_index: usize,
        expected: usize,
        actual: usize,
    },
}
