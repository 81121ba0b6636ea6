//! Shared test support: a bit-exact builder for Crunch-Mania containers.
//!
//! The decoder pulls bits from the trailing seed first, then from payload
//! bytes walking toward the header, LSB-first within each byte. The
//! builder accepts bits in decode order and lays them out to match: the
//! first 32 bits become the seed content word (shift 16), later bits fill
//! payload bytes placed back to front.

#![allow(dead_code)]

use std::collections::HashMap;

// ─────────────────────────────────────────────────────────────────────────────
// Bit sink and container assembly
// ─────────────────────────────────────────────────────────────────────────────

/// Collects bits in the order the decoder will consume them.
pub struct BitSink {
    bits: Vec<u8>,
}

impl BitSink {
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    pub fn push_bit(&mut self, bit: u32) {
        self.bits.push((bit & 1) as u8);
    }

    /// `count` bits of `value`, LSB first (the order `read_bits` returns).
    pub fn push_bits(&mut self, count: u32, value: u32) {
        assert!(count <= 24);
        assert_eq!(value >> count, 0);
        for i in 0..count {
            self.push_bit(value >> i);
        }
    }

    /// A Huffman code path: `length` bits of `code`, MSB first (the order
    /// a table walk consumes them).
    pub fn push_code(&mut self, length: u32, code: u32) {
        for i in (0..length).rev() {
            self.push_bit(code >> i);
        }
    }
}

/// Assembles a complete container: 14-byte header, payload bytes laid out
/// back to front, and a trailing seed with shift 16 carrying the first 32
/// bits of the stream.
pub fn build_stream(signature: &[u8; 4], raw_size: u32, sink: &BitSink) -> Vec<u8> {
    let bits = &sink.bits;
    let seed_bits = bits.len().min(32);
    let mut seed = 0u32;
    for (i, &bit) in bits[..seed_bits].iter().enumerate() {
        seed |= u32::from(bit) << i;
    }
    let rest = &bits[seed_bits..];
    let refill_len = rest.len().div_ceil(8);
    let mut refill = vec![0u8; refill_len];
    for (i, &bit) in rest.iter().enumerate() {
        refill[i / 8] |= bit << (i % 8);
    }

    let packed_size = (refill_len + 6) as u32;
    let mut out = Vec::with_capacity(14 + packed_size as usize);
    out.extend_from_slice(signature);
    out.extend_from_slice(&[0, 0]);
    out.extend_from_slice(&raw_size.to_be_bytes());
    out.extend_from_slice(&packed_size.to_be_bytes());
    out.extend(refill.iter().rev());
    out.extend_from_slice(&seed.to_be_bytes());
    out.extend_from_slice(&16u16.to_be_bytes());
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Standard-mode token emitters
// ─────────────────────────────────────────────────────────────────────────────

const LENGTH_CLASSES: [(u32, u32); 4] = [(1, 0b0), (2, 0b10), (3, 0b110), (3, 0b111)];
const LENGTH_BITS: [u32; 4] = [1, 2, 4, 8];
const LENGTH_ADDITIONS: [u32; 4] = [2, 4, 8, 24];
const DISTANCE_CLASSES: [(u32, u32); 3] = [(1, 0b0), (2, 0b10), (2, 0b11)];
const DISTANCE_BITS: [u32; 3] = [9, 5, 14];
const DISTANCE_ADDITIONS: [u32; 3] = [32, 0, 544];

pub fn std_literal(sink: &mut BitSink, byte: u8) {
    sink.push_bit(1);
    sink.push_bits(8, u32::from(byte));
}

/// Emits every byte of `raw` as a literal token, in the order the decoder
/// must see them: last output byte first.
pub fn std_literals(sink: &mut BitSink, raw: &[u8]) {
    for &byte in raw.iter().rev() {
        std_literal(sink, byte);
    }
}

fn std_stored_length(sink: &mut BitSink, index: usize, stored: u32) {
    let (length, code) = LENGTH_CLASSES[index];
    sink.push_code(length, code);
    sink.push_bits(LENGTH_BITS[index], stored - LENGTH_ADDITIONS[index]);
}

pub fn std_distance(sink: &mut BitSink, distance: u32) {
    let index = match distance {
        0..=31 => 1,
        32..=543 => 0,
        _ => 2,
    };
    let (length, code) = DISTANCE_CLASSES[index];
    sink.push_code(length, code);
    sink.push_bits(DISTANCE_BITS[index], distance - DISTANCE_ADDITIONS[index]);
}

/// Emits a match token for the effective `count` the decoder will act on
/// (lengths at or above the escape are stored shifted up by one).
pub fn std_match(sink: &mut BitSink, count: u32, distance: u32) {
    assert!((2..=278).contains(&count));
    sink.push_bit(0);
    let stored = if count >= 23 { count + 1 } else { count };
    let index = match stored {
        2..=3 => 0,
        4..=7 => 1,
        8..=23 => 2,
        _ => 3,
    };
    std_stored_length(sink, index, stored);
    std_distance(sink, distance);
}

/// Emits the count-23 escape followed by a verbatim run. `bytes` are
/// written downward from the current output position in the order given.
pub fn std_literal_run(sink: &mut BitSink, bytes: &[u8]) {
    let n = bytes.len() as u32;
    assert!(n >= 15);
    sink.push_bit(0);
    std_stored_length(sink, 2, 23);
    if n <= 46 {
        sink.push_bit(1);
        sink.push_bits(5, n - 15);
    } else {
        sink.push_bit(0);
        sink.push_bits(14, n - 15);
    }
    for &byte in bytes {
        sink.push_bits(8, u32::from(byte));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// LZH-mode table serialisation and token emitters
// ─────────────────────────────────────────────────────────────────────────────

/// Serialises one dynamic table; `levels[d]` lists the leaf values whose
/// codes are `d + 1` bits deep, in canonical order.
pub fn lzh_table(sink: &mut BitSink, levels: &[&[u32]], code_length: u32) {
    let max_depth = levels.len() as u32;
    sink.push_bits(4, max_depth);
    for (i, level) in levels.iter().enumerate() {
        sink.push_bits((i as u32 + 1).min(code_length), level.len() as u32);
    }
    for level in levels {
        for &value in *level {
            sink.push_bits(code_length, value);
        }
    }
}

fn canonical_codes(levels: &[&[u32]]) -> HashMap<u32, (u32, u32)> {
    let max_depth = levels.len() as u32;
    let mut codes = HashMap::new();
    let mut code = 0u32;
    for (i, level) in levels.iter().enumerate() {
        let depth = i as u32 + 1;
        for &value in *level {
            codes.insert(value, (depth, code >> (max_depth - depth)));
            code += 1 << (max_depth - depth);
        }
    }
    codes
}

/// Token emitter bound to the code assignment of one block's tables.
pub struct LzhBlock {
    length_codes: HashMap<u32, (u32, u32)>,
    distance_codes: HashMap<u32, (u32, u32)>,
}

/// Serialises both tables of a block and returns an emitter for its
/// tokens. Length-table leaves are 9 bits wide, distance-table leaves 4.
pub fn lzh_tables(
    sink: &mut BitSink,
    length_levels: &[&[u32]],
    distance_levels: &[&[u32]],
) -> LzhBlock {
    lzh_table(sink, length_levels, 9);
    lzh_table(sink, distance_levels, 4);
    LzhBlock {
        length_codes: canonical_codes(length_levels),
        distance_codes: canonical_codes(distance_levels),
    }
}

/// Token count field: the block carries `items - 1`.
pub fn lzh_items(sink: &mut BitSink, items: u32) {
    assert!((1..=0x10000).contains(&items));
    sink.push_bits(16, items - 1);
}

/// Continuation flag after a block's tokens.
pub fn lzh_continue(sink: &mut BitSink, more: bool) {
    sink.push_bit(more as u32);
}

impl LzhBlock {
    pub fn literal(&self, sink: &mut BitSink, byte: u8) {
        let (length, code) = self.length_codes[&(0x100 | u32::from(byte))];
        sink.push_code(length, code);
    }

    pub fn match_token(&self, sink: &mut BitSink, count: u32, distance: u32) {
        assert!(count >= 3);
        let (length, code) = self.length_codes[&(count - 3)];
        sink.push_code(length, code);
        let width = if distance <= 2 {
            0
        } else {
            31 - (distance - 1).leading_zeros()
        };
        let (dlength, dcode) = self.distance_codes[&width];
        sink.push_code(dlength, dcode);
        if width == 0 {
            sink.push_bits(1, distance - 1);
        } else {
            sink.push_bits(width, distance - 1 - (1 << width));
        }
    }
}
