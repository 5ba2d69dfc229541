//! Error types for the scenario decoder.

use std::fmt;

use thiserror::Error;

/// Boxed error returned by a [`BlockDecompressor`](crate::BlockDecompressor).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Part of the file being decoded when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Header,
    /// A length-prefixed compressed block, by index.
    Block(usize),
    /// Uncompressed region after the blocks holding the grid size.
    Trailer,
    /// The last length-prefixed block, read and discarded.
    FinalBlock,
    /// Whole-file decompression of the stream layout.
    Stream,
    /// Region after the header in the stream layout holding the grid size.
    Metadata,
    Reserved,
    TileGrid,
    LocationTable,
    TeamTable,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Header => f.write_str("header"),
            Stage::Block(index) => write!(f, "block {index}"),
            Stage::Trailer => f.write_str("trailer"),
            Stage::FinalBlock => f.write_str("final block"),
            Stage::Stream => f.write_str("stream"),
            Stage::Metadata => f.write_str("metadata region"),
            Stage::Reserved => f.write_str("reserved region"),
            Stage::TileGrid => f.write_str("tile grid"),
            Stage::LocationTable => f.write_str("location table"),
            Stage::TeamTable => f.write_str("team table"),
        }
    }
}

/// Coarse classification of decode failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The file could not be opened or read.
    Io,
    /// The bytes do not describe a scenario this decoder understands.
    Format,
    /// A compressed block or stream is corrupt.
    Decompression,
}

/// Errors that can occur while decoding a scenario.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] toaw_common::Error),

    /// The input ended inside a stage.
    #[error("truncated {stage} at offset {offset}: expected {expected} bytes")]
    Truncated {
        stage: Stage,
        offset: u64,
        expected: usize,
    },

    /// A decompressed region is shorter than its fixed layout.
    ///
    /// `offset` is where the region starts: a file offset for segmented
    /// blocks, an offset into the decompressed payload for stream regions.
    #[error("{stage} at offset {offset} too short: expected {expected} bytes, got {actual}")]
    RegionTooShort {
        stage: Stage,
        offset: u64,
        expected: usize,
        actual: usize,
    },

    /// The tile block length matches none of the known grid geometries.
    #[error("unrecognized tile block length: {0}")]
    UnrecognizedTileBlock(usize),

    /// The declared grid is larger than the tile region at `offset` can hold.
    #[error("grid {width}x{height} at offset {offset} exceeds the maximum of {max}x{max}")]
    GridOutOfBounds {
        offset: u64,
        width: usize,
        height: usize,
        max: usize,
    },

    /// A stored grid holds a different number of tiles than its size.
    #[error("grid {width}x{height} holds {tiles} tiles")]
    GridShape {
        width: usize,
        height: usize,
        tiles: usize,
    },

    /// A stored grid mixes tile record sizes.
    #[error("tile {index} is {actual} bytes, expected {expected}")]
    TileSize {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// A block the layout requires was not read.
    #[error("block {index} missing (file has {count} blocks)")]
    MissingBlock { index: usize, count: usize },

    /// A compressed block or stream failed to decompress.
    #[error("decompression of {stage} failed: {source}")]
    Decompression {
        stage: Stage,
        #[source]
        source: BoxError,
    },

    /// JSON (de)serialization error.
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Io(_) => ErrorCategory::Io,
            Error::Decompression { .. } => ErrorCategory::Decompression,
            _ => ErrorCategory::Format,
        }
    }

    /// The stage that failed, when known.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Truncated { stage, .. }
            | Error::RegionTooShort { stage, .. }
            | Error::Decompression { stage, .. } => Some(*stage),
            Error::UnrecognizedTileBlock(_)
            | Error::GridOutOfBounds { .. }
            | Error::GridShape { .. }
            | Error::TileSize { .. } => Some(Stage::TileGrid),
            Error::MissingBlock { index, .. } => Some(Stage::Block(*index)),
            _ => None,
        }
    }
}

/// Result type for scenario operations.
pub type Result<T> = std::result::Result<T, Error>;
