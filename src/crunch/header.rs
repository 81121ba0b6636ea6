//! Stream-header parsing and signature detection.
//!
//! The 14-byte header is big-endian throughout: a 4-byte signature, a
//! reserved 16-bit word, the uncompressed size, and the payload size.
//! Two of the signature characters double as mode flags, so signatures are
//! compared exactly on all four bytes, never case-folded: a lowercase `m`
//! at byte 2 marks a sampled payload, a `2` at byte 3 selects LZH mode.

use crate::crunch::types::{
    Error, Result, HEADER_SIZE, MAX_PACKED_SIZE, MAX_RAW_SIZE, MIN_STREAM_SIZE, SIG_LZH,
    SIG_LZH_SAMPLED, SIG_STANDARD, SIG_STANDARD_SAMPLED, XPK_CRM2, XPK_CRMS,
};

// ─────────────────────────────────────────────────────────────────────────────
// Byte-order helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Reads a big-endian `u32` from `src` at byte `offset`.
#[inline]
pub(crate) fn read_be32(src: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        src[offset],
        src[offset + 1],
        src[offset + 2],
        src[offset + 3],
    ])
}

// ─────────────────────────────────────────────────────────────────────────────
// Signature detection
// ─────────────────────────────────────────────────────────────────────────────

/// Recognises the four native signatures: `CrM!`, `CrM2`, `Crm!`, `Crm2`.
pub fn detect_header(hdr: u32) -> bool {
    matches!(
        hdr,
        SIG_STANDARD | SIG_LZH | SIG_STANDARD_SAMPLED | SIG_LZH_SAMPLED
    )
}

/// Recognises the two XPK wrapper ids: `CRM2`, `CRMS`.
pub fn detect_header_xpk(hdr: u32) -> bool {
    matches!(hdr, XPK_CRM2 | XPK_CRMS)
}

// ─────────────────────────────────────────────────────────────────────────────
// Header parsing
// ─────────────────────────────────────────────────────────────────────────────

/// The validated contents of a stream header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamHeader {
    /// Uncompressed length in bytes.
    pub raw_size: u32,
    /// Compressed payload length, excluding the 14-byte header.
    pub packed_size: u32,
    /// Payload is differential PCM and wants the delta post-filter.
    pub sampled: bool,
    /// Payload uses per-block dynamic tables instead of the fixed ones.
    pub lzh: bool,
}

impl StreamHeader {
    /// Parses and validates the header at the front of `packed`.
    ///
    /// Fails with [`Error::InvalidFormat`] on an unrecognised signature, a
    /// zero or over-cap size field, or a buffer too short to hold the
    /// declared payload. Trailing bytes beyond the payload are tolerated.
    pub fn parse(packed: &[u8]) -> Result<Self> {
        if packed.len() < MIN_STREAM_SIZE {
            return Err(Error::InvalidFormat);
        }
        let hdr = read_be32(packed, 0);
        if !detect_header(hdr) {
            return Err(Error::InvalidFormat);
        }
        let raw_size = read_be32(packed, 6);
        let packed_size = read_be32(packed, 10);
        if raw_size == 0
            || packed_size == 0
            || raw_size > MAX_RAW_SIZE
            || packed_size > MAX_PACKED_SIZE
            || packed_size as usize + HEADER_SIZE > packed.len()
        {
            return Err(Error::InvalidFormat);
        }
        Ok(Self {
            raw_size,
            packed_size,
            sampled: (hdr >> 8) & 0xFF == u32::from(b'm'),
            lzh: hdr & 0xFF == u32::from(b'2'),
        })
    }
}
