//! Common utilities for the TOAW scenario tools.
//!
//! This crate provides the foundational pieces shared by the decoder, the
//! renderer and the CLI:
//!
//! - [`BinaryReader`] - Bounds-checked little-endian reading from byte slices
//! - [`text`] - Fixed-width, NUL-padded text fields
//! - [`base64_bytes`] / [`fixed_array`] - serde helpers for byte spans and
//!   fixed-length arrays (feature `serde`)

mod error;
mod reader;

pub mod text;

#[cfg(feature = "serde")]
pub mod base64_bytes;
#[cfg(feature = "serde")]
pub mod fixed_array;

pub use error::{Error, Result};
pub use reader::BinaryReader;
