//! DCL stream decoding.

use std::sync::OnceLock;

use tracing::trace;

use crate::huffman::{BitReader, Huffman, DISTANCE_LENGTHS, LENGTH_LENGTHS, LITERAL_LENGTHS};
use crate::{Error, Result};

/// Base copy length for each length symbol.
const LENGTH_BASE: [u16; 16] = [3, 2, 4, 5, 6, 7, 8, 9, 10, 12, 16, 24, 40, 72, 136, 264];

/// Extra bits following each length symbol.
const LENGTH_EXTRA: [u8; 16] = [0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8];

/// Copy length that marks the end of the stream.
const END_OF_STREAM: usize = 519;

struct Tables {
    literal: Huffman,
    length: Huffman,
    distance: Huffman,
}

fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(|| Tables {
        literal: Huffman::from_packed(&LITERAL_LENGTHS),
        length: Huffman::from_packed(&LENGTH_LENGTHS),
        distance: Huffman::from_packed(&DISTANCE_LENGTHS),
    })
}

/// Stateless DCL decompressor.
///
/// Exists so callers can hold the capability as a value; all the work happens
/// in [`decompress`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Blast;

impl Blast {
    /// Create a new decompressor.
    pub const fn new() -> Self {
        Self
    }

    /// Decompress one DCL stream.
    pub fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        decompress(input)
    }
}

/// Decompress a complete DCL stream.
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    let tables = tables();
    let mut bits = BitReader::new(input);

    let literal_flag = bits.bits(8)? as u8;
    if literal_flag > 1 {
        return Err(Error::InvalidLiteralFlag(literal_flag));
    }
    let coded_literals = literal_flag == 1;

    let dictionary = bits.bits(8)? as u8;
    if !(4..=6).contains(&dictionary) {
        return Err(Error::InvalidDictionarySize(dictionary));
    }

    let mut output = Vec::with_capacity(input.len() * 4);

    loop {
        if bits.bits(1)? == 1 {
            let symbol = tables.length.decode(&mut bits)?;
            let length = usize::from(LENGTH_BASE[symbol])
                + bits.bits(u32::from(LENGTH_EXTRA[symbol]))? as usize;
            if length == END_OF_STREAM {
                break;
            }

            // Two-byte copies use a fixed two-bit low distance part.
            let low_bits = if length == 2 { 2 } else { u32::from(dictionary) };
            let distance = (tables.distance.decode(&mut bits)? << low_bits)
                + bits.bits(low_bits)? as usize
                + 1;

            if distance > output.len() {
                return Err(Error::DistanceTooFar {
                    distance,
                    available: output.len(),
                });
            }

            // Copies may overlap their own output.
            let start = output.len() - distance;
            for i in 0..length {
                let byte = output[start + i];
                output.push(byte);
            }
        } else {
            let byte = if coded_literals {
                tables.literal.decode(&mut bits)? as u8
            } else {
                bits.bits(8)? as u8
            };
            output.push(byte);
        }
    }

    trace!(
        compressed = input.len(),
        decompressed = output.len(),
        "decompressed DCL stream"
    );
    Ok(output)
}
