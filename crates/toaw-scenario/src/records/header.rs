//! Scenario header record.

use std::borrow::Cow;

use toaw_common::{text, BinaryReader, Result};

/// Width of each free-text message field.
pub const MESSAGE_LEN: usize = 8192;

/// Width of the map title field.
pub const TITLE_LEN: usize = 264;

/// The fixed-size record at the start of every scenario.
///
/// The layout is shared by all file generations. Text fields are NUL-padded
/// and kept as raw bytes; the accessor methods return them with the padding
/// removed. The eight messages are boxed so the record stays small when
/// moved.
///
/// | offset  | size | field |
/// |---------|------|-------|
/// | 0x0000  | 16   | signature |
/// | 0x0010  | 4    | unknown |
/// | 0x0014  | 264  | map title |
/// | 0x011C  | 4    | format version |
/// | 0x0120  | 4    | unknown |
/// | 0x0124  | 8 x 8192 | messages |
/// | 0x10124 | 4    | team that moves first |
/// | 0x10128 | 36   | unknown |
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    #[cfg_attr(feature = "serde", serde(with = "toaw_common::base64_bytes"))]
    pub magic: [u8; 16],
    pub unknown_0010: u32,
    #[cfg_attr(feature = "serde", serde(with = "toaw_common::base64_bytes"))]
    pub title: [u8; TITLE_LEN],
    pub version: u32,
    pub unknown_0120: u32,
    #[cfg_attr(feature = "serde", serde(with = "toaw_common::base64_bytes::boxed"))]
    pub description: Box<[u8; MESSAGE_LEN]>,
    #[cfg_attr(feature = "serde", serde(with = "toaw_common::base64_bytes::boxed"))]
    pub team1_victory: Box<[u8; MESSAGE_LEN]>,
    #[cfg_attr(feature = "serde", serde(with = "toaw_common::base64_bytes::boxed"))]
    pub team1_victory_alt: Box<[u8; MESSAGE_LEN]>,
    #[cfg_attr(feature = "serde", serde(with = "toaw_common::base64_bytes::boxed"))]
    pub draw: Box<[u8; MESSAGE_LEN]>,
    #[cfg_attr(feature = "serde", serde(with = "toaw_common::base64_bytes::boxed"))]
    pub team2_victory: Box<[u8; MESSAGE_LEN]>,
    #[cfg_attr(feature = "serde", serde(with = "toaw_common::base64_bytes::boxed"))]
    pub unknown_message: Box<[u8; MESSAGE_LEN]>,
    #[cfg_attr(feature = "serde", serde(with = "toaw_common::base64_bytes::boxed"))]
    pub draw_alt: Box<[u8; MESSAGE_LEN]>,
    #[cfg_attr(feature = "serde", serde(with = "toaw_common::base64_bytes::boxed"))]
    pub unknown_message_alt: Box<[u8; MESSAGE_LEN]>,
    pub team_goes_first: u32,
    #[cfg_attr(feature = "serde", serde(with = "toaw_common::base64_bytes"))]
    pub unknown_10128: [u8; 36],
}

impl Header {
    /// Encoded size of the header in bytes.
    pub const SIZE: usize = 16 + 4 + TITLE_LEN + 4 + 4 + 8 * MESSAGE_LEN + 4 + 36;

    /// Decode a header from a span of at least [`Header::SIZE`] bytes.
    pub fn decode(span: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(span);

        Ok(Self {
            magic: reader.read_array()?,
            unknown_0010: reader.read_u32()?,
            title: reader.read_array()?,
            version: reader.read_u32()?,
            unknown_0120: reader.read_u32()?,
            description: reader.read_boxed_array()?,
            team1_victory: reader.read_boxed_array()?,
            team1_victory_alt: reader.read_boxed_array()?,
            draw: reader.read_boxed_array()?,
            team2_victory: reader.read_boxed_array()?,
            unknown_message: reader.read_boxed_array()?,
            draw_alt: reader.read_boxed_array()?,
            unknown_message_alt: reader.read_boxed_array()?,
            team_goes_first: reader.read_u32()?,
            unknown_10128: reader.read_array()?,
        })
    }

    /// The file signature, e.g. `TOAC` for the older games.
    pub fn magic_text(&self) -> Cow<'_, str> {
        text::until_nul(&self.magic)
    }

    pub fn title(&self) -> Cow<'_, str> {
        text::until_nul(&self.title)
    }

    pub fn description(&self) -> Cow<'_, str> {
        text::padded_text(self.description.as_slice())
    }

    pub fn team1_victory(&self) -> Cow<'_, str> {
        text::padded_text(self.team1_victory.as_slice())
    }

    pub fn team1_victory_alt(&self) -> Cow<'_, str> {
        text::padded_text(self.team1_victory_alt.as_slice())
    }

    pub fn draw(&self) -> Cow<'_, str> {
        text::padded_text(self.draw.as_slice())
    }

    pub fn team2_victory(&self) -> Cow<'_, str> {
        text::padded_text(self.team2_victory.as_slice())
    }

    pub fn draw_alt(&self) -> Cow<'_, str> {
        text::padded_text(self.draw_alt.as_slice())
    }
}
