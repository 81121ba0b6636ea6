//! `crmr` - a pure-Rust decoder for the Crunch-Mania ("CrM") family of
//! compressed streams, including the XPK-wrapped CRM2/CRMS variants.
//!
//! Crunch-Mania is a late-1980s Amiga file cruncher. Its streams are read
//! backward: bits are consumed from the last byte of the packed region
//! toward the header, LSB-first within each byte, and output is written
//! from the end of the raw buffer toward the front. This crate is the
//! decode core only; compression, random access, and partial decode are
//! out of scope.
//!
//! # Crate layout
//!
//! | Module       | Contents |
//! |--------------|----------|
//! | `bitstream`  | Reverse-direction LSB-first bit reader. |
//! | `huffman`    | Fixed-depth and dynamic Huffman code tables. |
//! | `crunch`     | Header parsing, both decode modes, error taxonomy. |
//! | `delta`      | Post-filter for 8-bit differential PCM payloads. |
//! | `registry`   | Signature-keyed codec capability records. |
//!
//! # Example
//!
//! ```no_run
//! let packed = std::fs::read("music.crm").unwrap();
//! let raw = crm::decompress_to_vec(&packed).unwrap();
//! println!("{} bytes", raw.len());
//! ```

pub mod bitstream;
pub mod crunch;
pub mod delta;
pub mod huffman;
pub mod registry;

pub use crunch::header::{detect_header, detect_header_xpk, StreamHeader};
pub use crunch::types::{Error, Result};
pub use crunch::{decompress_to_vec, CrmDecompressor};
