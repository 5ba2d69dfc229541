//! Team (side) record.

use std::borrow::Cow;

use toaw_common::{text, BinaryReader, Result};

/// Number of sides in a scenario. TOAW is strictly two-player.
pub const TEAM_COUNT: usize = 2;

/// One entry of the team table (64 bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    #[cfg_attr(feature = "serde", serde(with = "toaw_common::base64_bytes"))]
    pub country: [u8; 17],
    #[cfg_attr(feature = "serde", serde(with = "toaw_common::base64_bytes"))]
    pub force: [u8; 35],
    pub proficiency: u32,
    pub supply: u32,
    pub flag_id: u32,
}

impl Team {
    /// Encoded size of a team record in bytes.
    pub const SIZE: usize = 64;

    /// Decode a team from a span of at least [`Team::SIZE`] bytes.
    pub fn decode(span: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(span);

        Ok(Self {
            country: reader.read_array()?,
            force: reader.read_array()?,
            proficiency: reader.read_u32()?,
            supply: reader.read_u32()?,
            flag_id: reader.read_u32()?,
        })
    }

    pub fn country(&self) -> Cow<'_, str> {
        text::until_nul(&self.country)
    }

    pub fn force(&self) -> Cow<'_, str> {
        text::until_nul(&self.force)
    }
}
