//! Huffman prefix-code tables for the two Crunch-Mania decode modes.
//!
//! Two variants share one contract (`insert` / `decode` / `reset`):
//!
//! - [`FixedDecoder`] - a flat array sized at compile time for a small,
//!   known maximum code depth. Standard mode uses it for its two built-in
//!   class tables.
//! - [`TreeDecoder`] - a growable node arena for tables whose depth is only
//!   known at runtime. LZH mode rebuilds two of these per block.
//!
//! Both store symbols as `Option<T>`, so "no symbol at this node" needs no
//! reserved sentinel value. A well-formed table plus a well-formed stream
//! always reach a leaf; every other outcome is reported as corruption.

use crate::crunch::types::{Error, Result};

/// A single prefix-code binding: `code` holds the bit path in its low
/// `length` bits, most significant bit consumed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffmanCode<T> {
    pub length: u32,
    pub code: u32,
    pub value: T,
}

/// Backing-array length for a [`FixedDecoder`] covering codes up to
/// `depth` bits.
pub const fn table_len(depth: u32) -> usize {
    (2usize << depth) - 2
}

// ─────────────────────────────────────────────────────────────────────────────
// Fixed-depth flat variant
// ─────────────────────────────────────────────────────────────────────────────

/// Flat-array decoder for tables with a small, fixed maximum depth.
///
/// `N` must be [`table_len`]`(depth)` for the intended depth; both node
/// children of slot `i` live at `i * 2 + 2` and `i * 2 + 3`, so the whole
/// tree fits one array with no link storage.
pub struct FixedDecoder<T, const N: usize> {
    table: [Option<T>; N],
}

impl<T: Copy, const N: usize> FixedDecoder<T, N> {
    /// An empty table.
    pub fn new() -> Self {
        Self { table: [None; N] }
    }

    /// Builds a table from a fixed code list.
    pub fn from_codes(codes: &[HuffmanCode<T>]) -> Result<Self> {
        let mut decoder = Self::new();
        for code in codes {
            decoder.insert(code)?;
        }
        Ok(decoder)
    }

    /// Deepest code length the backing array can hold.
    const fn max_depth() -> u32 {
        (N + 2).trailing_zeros() - 1
    }

    /// Clears every binding.
    pub fn reset(&mut self) {
        self.table = [None; N];
    }

    /// Records a prefix-code binding.
    ///
    /// Fails when the code is empty or deeper than the table, when it
    /// duplicates a stored code, or when its path runs through an existing
    /// leaf.
    pub fn insert(&mut self, code: &HuffmanCode<T>) -> Result<()> {
        if code.length == 0 || code.length > Self::max_depth() {
            return Err(Error::Decompression);
        }
        let mut i = 0usize;
        for level in (0..code.length).rev() {
            if (code.code >> level) & 1 != 0 {
                i += 1;
            }
            if self.table[i].is_some() {
                return Err(Error::Decompression);
            }
            if level == 0 {
                self.table[i] = Some(code.value);
            } else {
                i = i * 2 + 2;
            }
        }
        Ok(())
    }

    /// Walks the tree one bit at a time until a leaf is reached.
    ///
    /// Fails when the walk falls off the table or when `read_bit` does.
    pub fn decode(&self, mut read_bit: impl FnMut() -> Result<u32>) -> Result<T> {
        let mut i = 0usize;
        loop {
            if read_bit()? != 0 {
                i += 1;
            }
            if let Some(value) = self.table[i] {
                return Ok(value);
            }
            i = i * 2 + 2;
            if i >= N {
                return Err(Error::Decompression);
            }
        }
    }
}

impl<T: Copy, const N: usize> Default for FixedDecoder<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic tree variant
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
struct Node<T> {
    // Arena indices; 0 marks an absent child, the root is never a target.
    children: [usize; 2],
    value: Option<T>,
}

impl<T> Node<T> {
    const fn empty() -> Self {
        Self { children: [0, 0], value: None }
    }
}

/// Node-arena decoder for tables whose depth is only known at runtime.
pub struct TreeDecoder<T> {
    nodes: Vec<Node<T>>,
}

impl<T: Copy> TreeDecoder<T> {
    /// An empty table holding just the root.
    pub fn new() -> Self {
        Self { nodes: vec![Node::empty()] }
    }

    /// Discards every binding, keeping the root.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.nodes.push(Node::empty());
    }

    /// Records a prefix-code binding, allocating interior nodes as needed.
    ///
    /// Fails when the code is empty, duplicates a stored code, is a prefix
    /// of one, or extends through an existing leaf.
    pub fn insert(&mut self, code: &HuffmanCode<T>) -> Result<()> {
        if code.length == 0 {
            return Err(Error::Decompression);
        }
        let mut i = 0usize;
        for level in (0..code.length).rev() {
            if self.nodes[i].value.is_some() {
                return Err(Error::Decompression);
            }
            let bit = ((code.code >> level) & 1) as usize;
            let next = self.nodes[i].children[bit];
            i = if next == 0 {
                let fresh = self.nodes.len();
                self.nodes.push(Node::empty());
                self.nodes[i].children[bit] = fresh;
                fresh
            } else {
                next
            };
        }
        if self.nodes[i].value.is_some() || self.nodes[i].children != [0, 0] {
            return Err(Error::Decompression);
        }
        self.nodes[i].value = Some(code.value);
        Ok(())
    }

    /// Walks child links one bit at a time until a leaf value is found.
    pub fn decode(&self, mut read_bit: impl FnMut() -> Result<u32>) -> Result<T> {
        let mut i = 0usize;
        loop {
            let bit = read_bit()? as usize;
            let next = self.nodes[i].children[bit & 1];
            if next == 0 {
                return Err(Error::Decompression);
            }
            if let Some(value) = self.nodes[next].value {
                return Ok(value);
            }
            i = next;
        }
    }
}

impl<T: Copy> Default for TreeDecoder<T> {
    fn default() -> Self {
        Self::new()
    }
}
