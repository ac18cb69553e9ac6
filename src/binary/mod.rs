// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Snapshot format for bitfuse indexes.
//!
//! A snapshot stores everything needed to skip key resolution on load: the
//! config, every item with its `ref_index`, the precomputed records and the
//! next `ref_index` to hand out. The payload is JSON, because items are
//! arbitrary serde types, and brotli does the heavy lifting on size: key
//! names and field layouts repeat for every entry, which is exactly what
//! brotli is good at.
//!
//! # Security Considerations
//!
//! Snapshots may come from disk or the network, so parsing is defensive:
//! - The header is checked (magic, version) before anything is allocated
//! - The declared payload length must match the bytes actually present
//! - CRC32 footer detects corruption/truncation
//! - Decompression output is capped at `MAX_DECODED_SIZE`
//!
//! # Format Overview
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (16 bytes)                                          │
//! │   magic: [u8; 4] = "BFSE"                                  │
//! │   version: u8 = 1                                          │
//! │   flags: u8                                                │
//! │   reserved: [u8; 2]                                        │
//! │   payload_len: u32, entry_count: u32                       │
//! ├────────────────────────────────────────────────────────────┤
//! │ PAYLOAD (brotli-compressed JSON)                           │
//! │   { config, nextRef, entries: [{refIndex, item, record}] } │
//! ├────────────────────────────────────────────────────────────┤
//! │ FOOTER (8 bytes): crc32 + magic "ESFB"                     │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod header;

pub use header::{FormatFlags, SnapshotFooter, SnapshotHeader, FOOTER_MAGIC, MAGIC, VERSION};

use std::io::{Read, Write};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Result, SnapshotError};
use crate::index::Record;
use crate::search::{Entry, Fuse};

/// Brotli quality for snapshot payloads (0-11).
const BROTLI_QUALITY: u32 = 9;

/// Brotli window size, log2.
const BROTLI_LG_WINDOW: u32 = 22;

const BROTLI_BUFFER: usize = 4096;

/// Largest decompressed payload accepted: 512 MB.
pub const MAX_DECODED_SIZE: u64 = 512 * 1024 * 1024;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PayloadRef<'a, T> {
    config: &'a Config,
    next_ref: usize,
    entries: &'a [Entry<T>],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Payload<T> {
    config: Config,
    next_ref: usize,
    entries: Vec<Entry<T>>,
}

/// What `inspect` can tell without decoding the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotInfo {
    pub header: SnapshotHeader,
    pub stored_crc32: u32,
    pub computed_crc32: u32,
}

impl SnapshotInfo {
    pub fn checksum_ok(&self) -> bool {
        self.stored_crc32 == self.computed_crc32
    }
}

/// Serialize an index into snapshot bytes.
pub fn save<T: Serialize>(fuse: &Fuse<T>) -> Result<Vec<u8>> {
    let payload = PayloadRef {
        config: fuse.config(),
        next_ref: fuse.next_ref_index(),
        entries: fuse.entries(),
    };
    let json = serde_json::to_vec(&payload).map_err(SnapshotError::Payload)?;

    let mut compressed = Vec::new();
    {
        let mut encoder = brotli::CompressorWriter::new(
            &mut compressed,
            BROTLI_BUFFER,
            BROTLI_QUALITY,
            BROTLI_LG_WINDOW,
        );
        encoder.write_all(&json).map_err(SnapshotError::Encode)?;
    }

    let mut flags = FormatFlags::new();
    if !fuse.keys().is_empty() {
        flags = flags.with_keys();
    }
    if fuse.config().use_extended_search {
        flags = flags.with_extended_search();
    }

    let header = SnapshotHeader {
        version: VERSION,
        flags,
        payload_len: compressed.len() as u32,
        entry_count: fuse.len() as u32,
    };

    let mut bytes = Vec::with_capacity(header.total_size());
    header.write(&mut bytes).map_err(SnapshotError::Encode)?;
    bytes.extend_from_slice(&compressed);
    let crc32 = SnapshotFooter::compute_crc32(&bytes);
    SnapshotFooter { crc32 }
        .write(&mut bytes)
        .map_err(SnapshotError::Encode)?;

    debug!(
        entries = fuse.len(),
        json_bytes = json.len(),
        snapshot_bytes = bytes.len(),
        "saved snapshot"
    );
    Ok(bytes)
}

/// Check header, length and footer, returning what they say.
pub fn inspect(bytes: &[u8]) -> Result<SnapshotInfo> {
    let header = SnapshotHeader::read(bytes)?;
    let total = header.total_size();
    if bytes.len() < total {
        return Err(SnapshotError::Truncated {
            needed: total,
            actual: bytes.len(),
        }
        .into());
    }

    let bytes = &bytes[..total];
    let footer = SnapshotFooter::read(bytes)?;
    let computed_crc32 = SnapshotFooter::compute_crc32(&bytes[..total - SnapshotFooter::SIZE]);

    Ok(SnapshotInfo {
        header,
        stored_crc32: footer.crc32,
        computed_crc32,
    })
}

/// Decode snapshot bytes back into an index.
pub fn load<T: DeserializeOwned>(bytes: &[u8]) -> Result<Fuse<T>> {
    let info = inspect(bytes)?;
    if !info.checksum_ok() {
        warn!(
            stored = info.stored_crc32,
            computed = info.computed_crc32,
            "snapshot checksum mismatch"
        );
        return Err(SnapshotError::ChecksumMismatch {
            stored: info.stored_crc32,
            computed: info.computed_crc32,
        }
        .into());
    }

    let start = SnapshotHeader::SIZE;
    let compressed = &bytes[start..start + info.header.payload_len as usize];

    let mut json = Vec::new();
    brotli::Decompressor::new(compressed, BROTLI_BUFFER)
        .take(MAX_DECODED_SIZE)
        .read_to_end(&mut json)
        .map_err(SnapshotError::Decompress)?;

    let payload: Payload<T> = serde_json::from_slice(&json).map_err(SnapshotError::Payload)?;
    if payload.entries.len() != info.header.entry_count as usize {
        return Err(SnapshotError::EntryCount {
            claimed: info.header.entry_count,
            actual: payload.entries.len(),
        }
        .into());
    }

    let mut refs: Vec<usize> = payload.entries.iter().map(|entry| entry.ref_index).collect();
    refs.sort_unstable();
    if let Some(pair) = refs.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(SnapshotError::DuplicateRef(pair[0]).into());
    }

    let keys = payload.config.validate()?;
    for entry in &payload.entries {
        if let Record::Keyed(slots) = &entry.record {
            if slots.len() != keys.len() {
                return Err(SnapshotError::SlotCount {
                    ref_index: entry.ref_index,
                    expected: keys.len(),
                    actual: slots.len(),
                }
                .into());
            }
        }
    }

    debug!(entries = payload.entries.len(), "loaded snapshot");
    Ok(Fuse::from_parts(
        payload.config,
        keys,
        payload.entries,
        payload.next_ref,
    ))
}
