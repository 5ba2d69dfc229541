//! Error types for toaw-common.

use thiserror::Error;

/// Common error type for TOAW operations.
#[derive(Debug, Error)]
pub enum Error {
    /// End of buffer reached while reading.
    #[error("unexpected end of buffer at offset {offset}: needed {needed} bytes but only {available} available")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A seek or slice went past the end of the buffer.
    #[error("range {start}..{end} out of bounds (buffer length {len})")]
    OutOfBounds { start: usize, end: usize, len: usize },
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
