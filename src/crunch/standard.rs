//! Standard-mode entropy decoder.
//!
//! Tokens are either single literals (flag bit 1 followed by eight data
//! bits) or matches (flag bit 0, a length class, then a distance class),
//! with one length value reserved as an escape introducing a verbatim run
//! of literals. Output is written from the top of the buffer downward;
//! back-references therefore point into the region above the write cursor,
//! which is always already decoded.

use crate::bitstream::ReverseBitReader;
use crate::crunch::types::{Error, Result};
use crate::huffman::{table_len, FixedDecoder, HuffmanCode};

/// Extra-bit widths per length class.
const LENGTH_BITS: [u32; 4] = [1, 2, 4, 8];
/// Base value per length class.
const LENGTH_ADDITIONS: [u32; 4] = [2, 4, 8, 24];
/// Extra-bit widths per distance class.
const DISTANCE_BITS: [u32; 3] = [9, 5, 14];
/// Base value per distance class.
const DISTANCE_ADDITIONS: [u32; 3] = [32, 0, 544];

/// Length value reused as the verbatim-run escape; lengths above it are
/// stored shifted up by one to keep the match alphabet contiguous.
const LITERAL_RUN_ESCAPE: u32 = 23;

fn length_table() -> Result<FixedDecoder<u8, { table_len(3) }>> {
    FixedDecoder::from_codes(&[
        HuffmanCode { length: 1, code: 0b000, value: 0 },
        HuffmanCode { length: 2, code: 0b010, value: 1 },
        HuffmanCode { length: 3, code: 0b110, value: 2 },
        HuffmanCode { length: 3, code: 0b111, value: 3 },
    ])
}

fn distance_table() -> Result<FixedDecoder<u8, { table_len(2) }>> {
    FixedDecoder::from_codes(&[
        HuffmanCode { length: 1, code: 0b00, value: 0 },
        HuffmanCode { length: 2, code: 0b10, value: 1 },
        HuffmanCode { length: 2, code: 0b11, value: 2 },
    ])
}

/// Decodes one standard-mode stream into `dest`, filling it completely.
pub(crate) fn decompress(reader: &mut ReverseBitReader<'_>, dest: &mut [u8]) -> Result<()> {
    let length_decoder = length_table()?;
    let distance_decoder = distance_table()?;

    let mut dest_offset = dest.len();
    while dest_offset > 0 {
        if reader.read_bit()? != 0 {
            dest_offset -= 1;
            dest[dest_offset] = reader.read_bits(8)? as u8;
            continue;
        }

        let length_index = usize::from(length_decoder.decode(|| reader.read_bit())?);
        let mut count =
            reader.read_bits(LENGTH_BITS[length_index])? + LENGTH_ADDITIONS[length_index];

        if count == LITERAL_RUN_ESCAPE {
            let run = if reader.read_bit()? != 0 {
                reader.read_bits(5)? + 15
            } else {
                reader.read_bits(14)? + 15
            };
            let count = run as usize;
            if count > dest_offset {
                return Err(Error::Decompression);
            }
            // The shortest expressible run is 15 bytes, so the bound above
            // also guarantees dest_offset stays positive inside the loop.
            debug_assert!(count >= 15);
            for _ in 0..count {
                dest_offset -= 1;
                dest[dest_offset] = reader.read_bits(8)? as u8;
            }
            continue;
        }

        if count > LITERAL_RUN_ESCAPE {
            count -= 1;
        }
        let count = count as usize;

        let distance_index = usize::from(distance_decoder.decode(|| reader.read_bit())?);
        let distance = (reader.read_bits(DISTANCE_BITS[distance_index])?
            + DISTANCE_ADDITIONS[distance_index]) as usize;

        if distance == 0 || dest_offset < count || dest_offset + distance > dest.len() {
            return Err(Error::Decompression);
        }
        let mut src = dest_offset + distance;
        for _ in 0..count {
            dest_offset -= 1;
            src -= 1;
            dest[dest_offset] = dest[src];
        }
    }
    Ok(())
}
