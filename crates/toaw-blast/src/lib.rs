//! PKWare Data Compression Library decompressor.
//!
//! Scenario files of the first three TOAW generations store each data block
//! compressed with the PKWare DCL "implode" scheme. This crate decodes that
//! format.
//!
//! # Format
//!
//! - 1 byte: literal coding (0 = raw bytes, 1 = Huffman coded)
//! - 1 byte: dictionary size exponent (4, 5 or 6 for a 1K, 2K or 4K window)
//! - LSB-first bit stream of literals and (length, distance) copies, coded with
//!   the fixed Huffman tables of the format. Length 519 ends the stream.
//!
//! # Example
//!
//! ```
//! let compressed = [0x00, 0x04, 0x82, 0x24, 0x25, 0x8f, 0x80, 0x7f];
//! let data = toaw_blast::decompress(&compressed)?;
//! assert_eq!(data, b"AIAIAIAIAIAIA");
//! # Ok::<(), toaw_blast::Error>(())
//! ```

mod error;
mod huffman;
mod inflate;

pub use error::{Error, Result};
pub use inflate::{decompress, Blast};
