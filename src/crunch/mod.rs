//! Crunch-Mania stream decoding.
//!
//! A stream is a 14-byte big-endian header followed by a packed payload
//! whose bits are consumed from the tail toward the header. Two payload
//! layouts exist: standard mode (fixed class tables, literal-run escape)
//! and LZH mode (per-block dynamic tables, continuation-chained blocks).
//! Sampled variants run a delta post-filter over the decoded bytes.
//!
//! # Submodules
//!
//! * [`types`]  - error taxonomy, signature words, geometry constants.
//! * [`header`] - signature detection and header parsing.
//! * [`decompressor`] - the [`CrmDecompressor`] lifecycle and dispatch.
//! * `standard`, `lzh` - the two decode loops.

pub mod decompressor;
pub mod header;
pub mod types;

mod lzh;
mod standard;

pub use decompressor::CrmDecompressor;
pub use header::{detect_header, detect_header_xpk, StreamHeader};
pub use types::{Error, Result};

// ---------------------------------------------------------------------------
// One-shot convenience helper
// ---------------------------------------------------------------------------

/// Decodes a complete native stream into a freshly allocated buffer.
///
/// Validates `packed`, allocates the declared raw size, and decodes into
/// it. For finer control (caller-owned buffers, XPK construction), use
/// [`CrmDecompressor`] directly.
pub fn decompress_to_vec(packed: &[u8]) -> Result<Vec<u8>> {
    let decompressor = CrmDecompressor::new(packed, false)?;
    let mut raw = vec![0u8; decompressor.raw_size()];
    decompressor.decompress(&mut raw, false)?;
    Ok(raw)
}
