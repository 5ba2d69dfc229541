//! Error types for DCL decompression.

use thiserror::Error;

/// Errors that can occur while decompressing a DCL stream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The compressed input ended before the end-of-stream code.
    #[error("compressed stream ended after {consumed} bytes without an end code")]
    UnexpectedEof { consumed: usize },

    /// The literal coding flag was neither 0 nor 1.
    #[error("invalid literal coding flag {0}")]
    InvalidLiteralFlag(u8),

    /// The dictionary size exponent was outside 4..=6.
    #[error("invalid dictionary size exponent {0}")]
    InvalidDictionarySize(u8),

    /// A copy reached back before the start of the output.
    #[error("copy distance {distance} exceeds {available} bytes of output")]
    DistanceTooFar { distance: usize, available: usize },

    /// The bit stream held a code not present in the table.
    #[error("invalid Huffman code")]
    InvalidCode,
}

/// Result type for DCL decompression.
pub type Result<T> = std::result::Result<T, Error>;
