//! Unit record.

use std::borrow::Cow;

use toaw_common::{text, BinaryReader, Result};

/// Coordinate value marking a unit that is not on the map.
pub const OFF_MAP: i32 = 999;

/// One entry of the unit table (392 bytes).
///
/// Unknown regions are kept at their exact widths so every named field stays
/// at its file offset.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    #[cfg_attr(feature = "serde", serde(with = "toaw_common::base64_bytes"))]
    pub name: [u8; 20],
    #[cfg_attr(feature = "serde", serde(with = "toaw_common::fixed_array"))]
    pub unknown_014: [u32; 60],
    #[cfg_attr(feature = "serde", serde(with = "toaw_common::base64_bytes"))]
    pub unknown_104: [u8; 48],
    pub unknown_134: [u8; 4],
    /// Packed team id and unit type; see [`Unit::team`] and [`Unit::type_code`].
    pub color_and_type: u32,
    pub unknown_13c: u32,
    pub unknown_140: u32,
    pub proficiency: u32,
    pub readiness: u32,
    pub supply: u32,
    pub unknown_150: u32,
    /// Index of the next unit stacked on the same tile. Values at or past the
    /// unit table size (1000 or 4000) mean none.
    pub next_on_tile: u32,
    pub x: i32,
    pub y: i32,
    pub unknown_160: [u32; 6],
    pub index: u32,
    pub unknown_17c: [u8; 12],
}

impl Unit {
    /// Encoded size of a unit record in bytes.
    pub const SIZE: usize = 392;

    /// Decode a unit from a span of at least [`Unit::SIZE`] bytes.
    pub fn decode(span: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(span);

        Ok(Self {
            name: reader.read_array()?,
            unknown_014: reader.read_u32_array()?,
            unknown_104: reader.read_array()?,
            unknown_134: reader.read_array()?,
            color_and_type: reader.read_u32()?,
            unknown_13c: reader.read_u32()?,
            unknown_140: reader.read_u32()?,
            proficiency: reader.read_u32()?,
            readiness: reader.read_u32()?,
            supply: reader.read_u32()?,
            unknown_150: reader.read_u32()?,
            next_on_tile: reader.read_u32()?,
            x: reader.read_i32()?,
            y: reader.read_i32()?,
            unknown_160: reader.read_u32_array()?,
            index: reader.read_u32()?,
            unknown_17c: reader.read_array()?,
        })
    }

    pub fn name(&self) -> Cow<'_, str> {
        text::until_nul(&self.name)
    }

    /// Team (colour group) id.
    pub fn team(&self) -> u32 {
        unpack_team(self.color_and_type)
    }

    /// Unit type code, including bit 31 of the packed field.
    pub fn type_code(&self) -> u32 {
        unpack_type(self.color_and_type)
    }

    /// Unit type index (low seven bits of the type code).
    pub fn type_index(&self) -> u8 {
        (self.type_code() & 0x7f) as u8
    }

    /// Map position as `(x, y)`, or `None` if the unit is off the map.
    pub fn position(&self) -> Option<(usize, usize)> {
        placed(self.x, self.y)
    }
}

/// Team id from the packed colour/type field.
///
/// This is the game's signed divide-by-128 idiom carried out on the unsigned
/// value: bit 31 adds a bias of one before the shift.
pub const fn unpack_team(raw: u32) -> u32 {
    raw.wrapping_add((raw >> 31) & 0x7f) >> 7
}

/// Unit type from the packed colour/type field. Bit 31 is part of the mask.
pub const fn unpack_type(raw: u32) -> u32 {
    raw & 0x8000_007f
}

/// Grid position for a coordinate pair, rejecting the off-map sentinel and
/// negative values.
pub(crate) fn placed(x: i32, y: i32) -> Option<(usize, usize)> {
    if x == OFF_MAP || y == OFF_MAP {
        return None;
    }
    Some((usize::try_from(x).ok()?, usize::try_from(y).ok()?))
}
