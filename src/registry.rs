//! Signature-keyed codec capability records.
//!
//! The decoder framework selects a codec by probing the first four bytes
//! of a stream against each registered entry. Registration is a compile-
//! time constant table of plain function pointers: no trait objects, no
//! runtime registration, no global mutable state. Native streams and XPK
//! chunk payloads are probed against separate tables because the same id
//! space means different things in the two contexts.

use crate::crunch::header::{detect_header, detect_header_xpk};
use crate::crunch::types::Result;
use crate::crunch::CrmDecompressor;

/// A decoder for natively stored streams.
pub struct Codec {
    /// Short family label.
    pub name: &'static str,
    /// Probes a big-endian signature word.
    pub detect: fn(u32) -> bool,
    /// Builds a decompressor over a packed buffer (`packed`, `verify`).
    pub create: for<'a> fn(&'a [u8], bool) -> Result<CrmDecompressor<'a>>,
}

/// A decoder for XPK chunk payloads.
pub struct XpkCodec {
    /// Short family label.
    pub name: &'static str,
    /// Probes an XPK wrapper id.
    pub detect: fn(u32) -> bool,
    /// Builds a decompressor (`hdr`, `recursion_level`, `packed`, `verify`).
    pub create: for<'a> fn(u32, u32, &'a [u8], bool) -> Result<CrmDecompressor<'a>>,
}

fn create_crm(packed: &[u8], verify: bool) -> Result<CrmDecompressor<'_>> {
    CrmDecompressor::new(packed, verify)
}

fn create_crm_xpk(
    hdr: u32,
    recursion_level: u32,
    packed: &[u8],
    verify: bool,
) -> Result<CrmDecompressor<'_>> {
    CrmDecompressor::new_xpk(hdr, recursion_level, packed, verify)
}

/// Native-stream codec table.
pub const CODECS: &[Codec] = &[Codec {
    name: "CrM",
    detect: detect_header,
    create: create_crm,
}];

/// XPK sub-codec table.
pub const XPK_CODECS: &[XpkCodec] = &[XpkCodec {
    name: "CRM",
    detect: detect_header_xpk,
    create: create_crm_xpk,
}];

/// Finds the native codec claiming `hdr`, if any.
pub fn identify(hdr: u32) -> Option<&'static Codec> {
    CODECS.iter().find(|codec| (codec.detect)(hdr))
}

/// Finds the XPK sub-codec claiming `hdr`, if any.
pub fn identify_xpk(hdr: u32) -> Option<&'static XpkCodec> {
    XPK_CODECS.iter().find(|codec| (codec.detect)(hdr))
}
