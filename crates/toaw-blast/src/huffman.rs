//! Canonical Huffman tables of the DCL format.

use crate::{Error, Result};

/// Longest code length used by any DCL table.
pub const MAX_BITS: usize = 13;

/// Code lengths for literal bytes, run-length packed: the low nibble is a code
/// length, the high nibble plus one is how many symbols in a row use it.
pub const LITERAL_LENGTHS: [u8; 98] = [
    11, 124, 8, 7, 28, 7, 188, 13, 76, 4, 10, 8, 12, 10, 12, 10, 8, 23, 8, 9, 7, 6, 7, 8, 7, 6,
    55, 8, 23, 24, 12, 11, 7, 9, 11, 12, 6, 7, 22, 5, 7, 24, 6, 11, 9, 6, 7, 22, 7, 11, 38, 7, 9,
    8, 25, 11, 8, 11, 9, 12, 8, 12, 5, 38, 5, 38, 5, 11, 7, 5, 6, 21, 6, 10, 53, 8, 7, 24, 10, 27,
    44, 253, 253, 253, 252, 252, 252, 13, 12, 45, 12, 45, 12, 61, 12, 45, 44, 173,
];

/// Code lengths for the 16 length symbols.
pub const LENGTH_LENGTHS: [u8; 6] = [2, 35, 36, 53, 38, 23];

/// Code lengths for the 64 distance symbols.
pub const DISTANCE_LENGTHS: [u8; 7] = [2, 20, 53, 230, 247, 151, 248];

/// LSB-first bit source over the compressed bytes.
#[derive(Debug)]
pub struct BitReader<'a> {
    input: &'a [u8],
    position: usize,
    buffer: u32,
    count: u32,
}

impl<'a> BitReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            position: 0,
            buffer: 0,
            count: 0,
        }
    }

    /// Take `need` bits (at most 16), least significant first.
    pub fn bits(&mut self, need: u32) -> Result<u32> {
        debug_assert!(need <= 16);
        let mut value = self.buffer;
        while self.count < need {
            let byte = *self
                .input
                .get(self.position)
                .ok_or(Error::UnexpectedEof {
                    consumed: self.position,
                })?;
            self.position += 1;
            value |= u32::from(byte) << self.count;
            self.count += 8;
        }
        self.buffer = value >> need;
        self.count -= need;
        Ok(value & ((1 << need) - 1))
    }
}

/// A decoding table: number of codes per length and symbols in code order.
#[derive(Debug)]
pub struct Huffman {
    counts: [u16; MAX_BITS + 1],
    symbols: Vec<u16>,
}

impl Huffman {
    /// Build a table from run-length packed code lengths.
    pub fn from_packed(packed: &[u8]) -> Self {
        let lengths: Vec<usize> = packed
            .iter()
            .flat_map(|&b| std::iter::repeat(usize::from(b & 15)).take(usize::from(b >> 4) + 1))
            .collect();

        let mut counts = [0u16; MAX_BITS + 1];
        for &len in &lengths {
            counts[len] += 1;
        }

        let mut offsets = [0usize; MAX_BITS + 2];
        for len in 1..=MAX_BITS {
            offsets[len + 1] = offsets[len] + usize::from(counts[len]);
        }

        let mut symbols = vec![0u16; lengths.len()];
        for (symbol, &len) in lengths.iter().enumerate() {
            if len != 0 {
                symbols[offsets[len]] = symbol as u16;
                offsets[len] += 1;
            }
        }

        Self { counts, symbols }
    }

    /// Decode one symbol. DCL stores codes bit-inverted.
    pub fn decode(&self, bits: &mut BitReader<'_>) -> Result<usize> {
        let mut code: i32 = 0;
        let mut first: i32 = 0;
        let mut index: i32 = 0;

        for len in 1..=MAX_BITS {
            code |= (bits.bits(1)? ^ 1) as i32;
            let count = i32::from(self.counts[len]);
            if code < first + count {
                return Ok(usize::from(self.symbols[(index + code - first) as usize]));
            }
            index += count;
            first = (first + count) << 1;
            code <<= 1;
        }

        Err(Error::InvalidCode)
    }
}
