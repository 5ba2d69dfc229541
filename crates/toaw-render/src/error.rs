//! Error types for the renderer.

use thiserror::Error;

/// Errors that can occur while rendering a map.
#[derive(Debug, Error)]
pub enum Error {
    /// The grid and radius give an empty or oversized canvas.
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },

    /// Image encoding or file error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// The label font could not be parsed.
    #[error("invalid font: {0}")]
    Font(#[from] ab_glyph::InvalidFont),

    /// The label font could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, Error>;
