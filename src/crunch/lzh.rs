//! LZH-mode entropy decoder.
//!
//! The payload is a chain of blocks, each carrying two serialised Huffman
//! tables followed by a 16-bit token count. The first table maps codes to
//! 9-bit symbols: values with bit 8 set are literals (low byte is the data),
//! the rest are match lengths. The second maps codes to 4-bit distance
//! widths. A single continuation bit after each block's tokens decides
//! whether another block follows.

use crate::bitstream::ReverseBitReader;
use crate::crunch::types::{Error, Result};
use crate::huffman::{HuffmanCode, TreeDecoder};
use log::debug;

/// Set on length-table symbols that carry a literal byte.
const LITERAL_FLAG: u32 = 0x100;
/// Leaf width of the length-or-literal table.
const LENGTH_CODE_BITS: u32 = 9;
/// Leaf width of the distance-width table.
const DISTANCE_CODE_BITS: u32 = 4;
/// Shortest match a length symbol can express.
const MIN_MATCH: u32 = 3;

/// Deserialises one Huffman table with `code_length`-bit leaf values.
///
/// The wire form is a 4-bit maximum depth, one code count per depth (the
/// count field width grows with the depth but never exceeds the leaf
/// width), then the leaf values in canonical order: codes of equal depth
/// are consecutive integers in MSB-aligned code space.
fn read_table(reader: &mut ReverseBitReader<'_>, code_length: u32) -> Result<TreeDecoder<u32>> {
    let max_depth = reader.read_bits(4)?;
    if max_depth == 0 {
        return Err(Error::Decompression);
    }
    let mut counts = [0u32; 15];
    for (i, count) in counts[..max_depth as usize].iter_mut().enumerate() {
        *count = reader.read_bits((i as u32 + 1).min(code_length))?;
    }

    let mut decoder = TreeDecoder::new();
    let mut code = 0u32;
    for depth in 1..=max_depth {
        for _ in 0..counts[(depth - 1) as usize] {
            let value = reader.read_bits(code_length)?;
            decoder.insert(&HuffmanCode {
                length: depth,
                code: code >> (max_depth - depth),
                value,
            })?;
            code += 1 << (max_depth - depth);
        }
    }
    Ok(decoder)
}

/// Decodes one LZH-mode stream into `dest`, filling it completely.
pub(crate) fn decompress(reader: &mut ReverseBitReader<'_>, dest: &mut [u8]) -> Result<()> {
    let mut dest_offset = dest.len();
    loop {
        let length_decoder = read_table(reader, LENGTH_CODE_BITS)?;
        let distance_decoder = read_table(reader, DISTANCE_CODE_BITS)?;

        let items = reader.read_bits(16)? + 1;
        debug!("lzh block: {items} items, {dest_offset} bytes left");
        for _ in 0..items {
            let symbol = length_decoder.decode(|| reader.read_bit())?;
            if symbol & LITERAL_FLAG != 0 {
                if dest_offset == 0 {
                    return Err(Error::Decompression);
                }
                dest_offset -= 1;
                dest[dest_offset] = symbol as u8;
                continue;
            }

            let count = (symbol + MIN_MATCH) as usize;
            let width = distance_decoder.decode(|| reader.read_bit())?;
            let distance = if width == 0 {
                (reader.read_bits(1)? + 1) as usize
            } else {
                ((reader.read_bits(width)? | (1 << width)) + 1) as usize
            };
            if dest_offset < count || dest_offset + distance > dest.len() {
                return Err(Error::Decompression);
            }
            let mut src = dest_offset + distance;
            for _ in 0..count {
                dest_offset -= 1;
                src -= 1;
                dest[dest_offset] = dest[src];
            }
        }
        if reader.read_bit()? == 0 {
            break;
        }
    }
    if dest_offset != 0 {
        return Err(Error::Decompression);
    }
    Ok(())
}
