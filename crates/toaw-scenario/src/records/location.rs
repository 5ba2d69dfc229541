//! Named map location record.

use std::borrow::Cow;

use toaw_common::{text, BinaryReader, Result};

use super::unit::{placed, OFF_MAP};

/// One entry of the location table (36 bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub x: i32,
    pub y: i32,
    #[cfg_attr(feature = "serde", serde(with = "toaw_common::base64_bytes"))]
    pub name: [u8; 28],
}

impl Location {
    /// Encoded size of a location record in bytes.
    pub const SIZE: usize = 36;

    /// Decode a location from a span of at least [`Location::SIZE`] bytes.
    pub fn decode(span: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(span);

        Ok(Self {
            x: reader.read_i32()?,
            y: reader.read_i32()?,
            name: reader.read_array()?,
        })
    }

    pub fn name(&self) -> Cow<'_, str> {
        text::until_nul(&self.name)
    }

    /// Whether the slot is unused. Only X carries the sentinel.
    pub fn is_unused(&self) -> bool {
        self.x == OFF_MAP
    }

    /// Map position as `(x, y)`, or `None` for an unused slot.
    pub fn position(&self) -> Option<(usize, usize)> {
        if self.is_unused() {
            return None;
        }
        placed(self.x, self.y)
    }
}
