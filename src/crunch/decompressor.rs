//! Decompressor lifecycle: construction, identification, and decode dispatch.

use crate::bitstream::ReverseBitReader;
use crate::crunch::header::StreamHeader;
use crate::crunch::types::{Error, Result, HEADER_SIZE, XPK_CRMS};
use crate::crunch::{lzh, standard};
use crate::delta;
use log::debug;

/// A validated Crunch-Mania stream, ready to decode.
///
/// Borrows the packed buffer read-only for its whole lifetime; the sizes
/// and mode flags captured at construction are frozen. Decoding borrows
/// the caller's raw buffer mutably for the duration of one call and keeps
/// no state between calls.
#[derive(Debug)]
pub struct CrmDecompressor<'a> {
    packed: &'a [u8],
    header: StreamHeader,
    xpk_delta: bool,
}

impl<'a> CrmDecompressor<'a> {
    /// Validates `packed` as a native Crunch-Mania stream.
    ///
    /// `verify` is accepted for decoder-interface compatibility; this codec
    /// has nothing extra to check ahead of a full decode.
    pub fn new(packed: &'a [u8], verify: bool) -> Result<Self> {
        let _ = verify;
        let header = StreamHeader::parse(packed)?;
        debug!(
            "crm stream: raw {} packed {} lzh {} sampled {}",
            header.raw_size, header.packed_size, header.lzh, header.sampled
        );
        Ok(Self { packed, header, xpk_delta: false })
    }

    /// Validates `packed` as the payload of an XPK chunk with wrapper id
    /// `hdr`. The wrapper id `CRMS` only flips the reported sub-name: the
    /// real stream id sits inside the payload and alone drives decoding.
    ///
    /// `recursion_level` is the XPK nesting depth, owned by the enclosing
    /// framework; it does not affect this codec.
    pub fn new_xpk(hdr: u32, recursion_level: u32, packed: &'a [u8], verify: bool) -> Result<Self> {
        let _ = recursion_level;
        let mut decompressor = Self::new(packed, verify)?;
        decompressor.xpk_delta = hdr == XPK_CRMS;
        Ok(decompressor)
    }

    /// Human-readable format name, chosen by the stream's mode flags.
    pub fn name(&self) -> &'static str {
        match (self.header.lzh, self.header.sampled) {
            (false, false) => "CrM!: Crunch-Mania standard-mode",
            (false, true) => "Crm!: Crunch-Mania standard-mode, sampled",
            (true, false) => "CrM2: Crunch-Mania LZH-mode",
            (true, true) => "Crm2: Crunch-Mania LZH-mode, sampled",
        }
    }

    /// Sub-format name under the XPK wrapper, chosen by the wrapper id
    /// seen at construction.
    pub fn sub_name(&self) -> &'static str {
        if self.xpk_delta {
            "XPK-CRMS: Crunch-Mania LZH-mode, sampled"
        } else {
            "XPK-CRM2: Crunch-Mania LZH-mode"
        }
    }

    /// Total stream size in bytes: header plus payload.
    pub fn packed_size(&self) -> usize {
        self.header.packed_size as usize + HEADER_SIZE
    }

    /// Uncompressed size in bytes.
    pub fn raw_size(&self) -> usize {
        self.header.raw_size as usize
    }

    /// Decodes the stream into `raw`, which must hold at least
    /// [`raw_size`](Self::raw_size) bytes; exactly that many are written.
    /// When the stream is sampled, the delta post-filter is applied over
    /// the decoded bytes before returning.
    pub fn decompress(&self, raw: &mut [u8], verify: bool) -> Result<()> {
        let _ = verify;
        let raw_size = self.raw_size();
        if raw.len() < raw_size {
            return Err(Error::Decompression);
        }
        let dest = &mut raw[..raw_size];

        let mut reader = ReverseBitReader::new(self.packed, self.packed_size())?;
        if self.header.lzh {
            lzh::decompress(&mut reader, dest)?;
        } else {
            standard::decompress(&mut reader, dest)?;
        }
        if self.header.sampled {
            delta::decode(dest, 0, raw_size);
        }
        Ok(())
    }

    /// XPK-form decode: identical to [`decompress`](Self::decompress)
    /// except that `raw` must be exactly [`raw_size`](Self::raw_size)
    /// bytes, checked before any decoding begins. `previous` is the
    /// prior chunk's output, offered by the XPK framework to codecs with
    /// chained state; this codec has none and ignores it.
    pub fn decompress_xpk(&self, raw: &mut [u8], previous: &[u8], verify: bool) -> Result<()> {
        let _ = previous;
        if raw.len() != self.raw_size() {
            return Err(Error::Decompression);
        }
        self.decompress(raw, verify)
    }
}
