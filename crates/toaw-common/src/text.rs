//! Fixed-width text fields.
//!
//! TOAW stores every string in a fixed-width, NUL-padded byte array. Names are
//! read up to the first NUL; long messages keep any embedded NULs and only lose
//! the trailing padding. Text is decoded lossily since the game writes the
//! Windows ANSI code page rather than UTF-8.

use std::borrow::Cow;

/// Text up to (not including) the first NUL byte.
pub fn until_nul(bytes: &[u8]) -> Cow<'_, str> {
    let end = memchr::memchr(0, bytes).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end])
}

/// The span with its trailing NUL padding removed.
pub fn trim_padding(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &bytes[..end]
}

/// Text with trailing NUL padding removed.
pub fn padded_text(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(trim_padding(bytes))
}
