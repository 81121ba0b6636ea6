//! Shared constants and the error taxonomy for Crunch-Mania decoding.
//!
//! Covers:
//! - the container geometry constants (`HEADER_SIZE`, `SEED_SIZE`, size caps)
//! - the six recognised signature words (four native, two XPK)
//! - [`Error`] / [`Result`], the uniform two-kind failure model shared by the
//!   bit reader, the Huffman tables, and both decode modes

use core::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Container geometry
// ─────────────────────────────────────────────────────────────────────────────

/// Size in bytes of the fixed stream header (signature, reserved word,
/// raw size, packed size).
pub const HEADER_SIZE: usize = 14;

/// Size in bytes of the trailing bit-reservoir seed: a 32-bit content word
/// followed by a 16-bit shift count, consumed before any payload byte.
pub const SEED_SIZE: usize = 6;

/// Smallest byte count a stream can legally occupy: the header plus the
/// seed area.
pub const MIN_STREAM_SIZE: usize = HEADER_SIZE + SEED_SIZE;

/// Ceiling on the declared uncompressed size (1 GiB).
pub const MAX_RAW_SIZE: u32 = 1 << 30;

/// Ceiling on the declared payload size (1 GiB).
pub const MAX_PACKED_SIZE: u32 = 1 << 30;

// ─────────────────────────────────────────────────────────────────────────────
// Signature words
// ─────────────────────────────────────────────────────────────────────────────

/// Packs a four-character code into the big-endian word the header carries.
pub const fn four_cc(id: [u8; 4]) -> u32 {
    u32::from_be_bytes(id)
}

/// `CrM!` - standard mode.
pub const SIG_STANDARD: u32 = four_cc(*b"CrM!");
/// `CrM2` - LZH mode.
pub const SIG_LZH: u32 = four_cc(*b"CrM2");
/// `Crm!` - standard mode, sampled payload.
pub const SIG_STANDARD_SAMPLED: u32 = four_cc(*b"Crm!");
/// `Crm2` - LZH mode, sampled payload.
pub const SIG_LZH_SAMPLED: u32 = four_cc(*b"Crm2");

/// `CRM2` - XPK wrapper id for an embedded LZH-mode stream.
pub const XPK_CRM2: u32 = four_cc(*b"CRM2");
/// `CRMS` - XPK wrapper id for an embedded LZH-mode stream with delta
/// post-processing declared at the wrapper level.
pub const XPK_CRMS: u32 = four_cc(*b"CRMS");

// ─────────────────────────────────────────────────────────────────────────────
// Error taxonomy
// ─────────────────────────────────────────────────────────────────────────────

/// Failures reported by the decoder.
///
/// The two kinds are mutually exclusive: [`Error::InvalidFormat`] can only
/// be produced while constructing a decompressor, [`Error::Decompression`]
/// only while decoding. Errors propagate unchanged to the caller; the raw
/// buffer contents after a failed decode are unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The input is not a Crunch-Mania container: unrecognised signature,
    /// a zero or over-cap size field, or a buffer too short to hold the
    /// declared payload.
    InvalidFormat,
    /// The packed payload is corrupt: the bit reservoir ran dry mid-symbol,
    /// a Huffman table is malformed, a back-reference or literal run
    /// escapes the output bounds, or the stream ended with output missing.
    Decompression,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidFormat => write!(f, "invalid Crunch-Mania stream header"),
            Error::Decompression => write!(f, "corrupt Crunch-Mania packed data"),
        }
    }
}

impl std::error::Error for Error {}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
