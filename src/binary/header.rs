// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Snapshot header and footer.
//!
//! The header is 16 bytes of fixed-size fields, parsed before anything else.
//! It says how long the payload is and how many entries to expect, so a
//! truncated file is caught before decompression starts.
//!
//! The footer is 8 bytes: a CRC32 over everything before it, plus a magic
//! number ("ESFB", the header magic reversed). If the footer is wrong,
//! something got corrupted or truncated. Don't trust the data.

use std::io::{self, Write};

use crc32fast::Hasher as Crc32Hasher;

use crate::error::SnapshotError;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "BFSE" in ASCII (header)
pub const MAGIC: [u8; 4] = *b"BFSE";

/// Footer magic: "ESFB" (reversed, marks valid file end)
pub const FOOTER_MAGIC: [u8; 4] = *b"ESFB";

/// Current format version
pub const VERSION: u8 = 1;

// ============================================================================
// FLAGS
// ============================================================================

/// Summary bits, readable without decoding the payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags(pub(crate) u8);

impl FormatFlags {
    pub const HAS_KEYS: u8 = 0b0000_0001;
    pub const EXTENDED_SEARCH: u8 = 0b0000_0010;

    pub fn new() -> Self {
        Self(0)
    }

    pub fn with_keys(mut self) -> Self {
        self.0 |= Self::HAS_KEYS;
        self
    }

    pub fn with_extended_search(mut self) -> Self {
        self.0 |= Self::EXTENDED_SEARCH;
        self
    }

    pub fn has_keys(self) -> bool {
        self.0 & Self::HAS_KEYS != 0
    }

    pub fn extended_search(self) -> bool {
        self.0 & Self::EXTENDED_SEARCH != 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

// ============================================================================
// HEADER (16 bytes)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub version: u8,
    pub flags: FormatFlags,
    /// Compressed payload length in bytes.
    pub payload_len: u32,
    pub entry_count: u32,
}

impl SnapshotHeader {
    // 4 (magic) + 1 (version) + 1 (flags) + 2 (reserved) + 2*4 (u32s) = 16
    pub const SIZE: usize = 16;

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&MAGIC)?;
        w.write_all(&[self.version])?;
        w.write_all(&[self.flags.0])?;
        w.write_all(&[0u8; 2])?; // reserved
        w.write_all(&self.payload_len.to_le_bytes())?;
        w.write_all(&self.entry_count.to_le_bytes())?;
        Ok(())
    }

    /// Parse the header at the start of `bytes`.
    pub fn read(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let buf = bytes.get(..Self::SIZE).ok_or(SnapshotError::Truncated {
            needed: Self::SIZE,
            actual: bytes.len(),
        })?;

        let magic = [buf[0], buf[1], buf[2], buf[3]];
        if magic != MAGIC {
            return Err(SnapshotError::BadMagic(magic));
        }

        let version = buf[4];
        if version != VERSION {
            return Err(SnapshotError::UnsupportedVersion(version));
        }

        Ok(Self {
            version,
            flags: FormatFlags(buf[5]),
            // buf[6..8] is reserved
            payload_len: u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
            entry_count: u32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]),
        })
    }

    /// Total snapshot size implied by this header.
    pub fn total_size(&self) -> usize {
        Self::SIZE + self.payload_len as usize + SnapshotFooter::SIZE
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotFooter {
    /// CRC32 checksum of header + payload (everything before footer)
    pub crc32: u32,
}

impl SnapshotFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.crc32.to_le_bytes())?;
        w.write_all(&FOOTER_MAGIC)?;
        Ok(())
    }

    /// Parse the footer at the end of `bytes`.
    pub fn read(bytes: &[u8]) -> Result<Self, SnapshotError> {
        if bytes.len() < Self::SIZE {
            return Err(SnapshotError::Truncated {
                needed: Self::SIZE,
                actual: bytes.len(),
            });
        }

        let start = bytes.len() - Self::SIZE;
        let footer = &bytes[start..];

        let magic = [footer[4], footer[5], footer[6], footer[7]];
        if magic != FOOTER_MAGIC {
            return Err(SnapshotError::BadMagic(magic));
        }

        Ok(Self {
            crc32: u32::from_le_bytes([footer[0], footer[1], footer[2], footer[3]]),
        })
    }

    /// Compute CRC32 over the given bytes
    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}
