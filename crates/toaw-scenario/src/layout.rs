//! File layout detection and the fixed layout descriptors.
//!
//! Both readers are driven by the tables here rather than by inline version
//! checks, so the version matrix can be read (and tested) in one place.

use std::ops::RangeInclusive;

/// Leading bytes of a gzip member using deflate.
pub const STREAM_MAGIC: [u8; 3] = [0x1f, 0x8b, 0x08];

/// Block holding the column-major tile grid.
pub const TILE_BLOCK: usize = 1;

/// Block holding the unit table.
pub const UNIT_BLOCK: usize = 2;

/// Block holding the two team records.
pub const TEAM_BLOCK: usize = 4;

/// Physical structure of a scenario file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutKind {
    /// Header followed by independently compressed, length-prefixed blocks.
    Segmented,
    /// The whole file is one gzip stream with regions at fixed offsets.
    Stream,
}

impl LayoutKind {
    /// Choose the layout from the first bytes of a file.
    ///
    /// Anything that does not start with [`STREAM_MAGIC`] is treated as
    /// segmented; the legacy files have no distinct signature.
    pub fn detect(prefix: &[u8]) -> Self {
        if prefix.starts_with(&STREAM_MAGIC) {
            LayoutKind::Stream
        } else {
            LayoutKind::Segmented
        }
    }
}

/// Version-dependent shape of a segmented file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentedProfile {
    /// Number of length-prefixed blocks after the header.
    pub block_count: usize,
    /// Block holding the location table.
    pub location_block: usize,
    /// Size of the uncompressed region after the blocks.
    pub trailer_len: usize,
}

/// Offset of the zero-based grid width in the trailer.
pub const TRAILER_WIDTH_OFFSET: usize = 0;

/// Offset of the zero-based grid height in the trailer.
pub const TRAILER_HEIGHT_OFFSET: usize = 4;

/// Header version of the first-generation game.
pub const VERSION_TOAW1: u32 = 0x42;

/// First header version with the extra block.
pub const VERSION_EXTRA_BLOCK: u32 = 0x79;

static PROFILES: [(RangeInclusive<u32>, SegmentedProfile); 4] = [
    (
        0..=VERSION_TOAW1 - 1,
        SegmentedProfile {
            block_count: 12,
            location_block: 10,
            trailer_len: 256,
        },
    ),
    (
        VERSION_TOAW1..=VERSION_TOAW1,
        SegmentedProfile {
            block_count: 12,
            location_block: 10,
            trailer_len: 232,
        },
    ),
    (
        VERSION_TOAW1 + 1..=VERSION_EXTRA_BLOCK - 1,
        SegmentedProfile {
            block_count: 12,
            location_block: 10,
            trailer_len: 256,
        },
    ),
    (
        VERSION_EXTRA_BLOCK..=u32::MAX,
        SegmentedProfile {
            block_count: 13,
            location_block: 11,
            trailer_len: 256,
        },
    ),
];

impl SegmentedProfile {
    /// Look up the profile for a header version.
    pub fn for_version(version: u32) -> Self {
        PROFILES
            .iter()
            .find(|(range, _)| range.contains(&version))
            .map(|(_, profile)| *profile)
            .unwrap_or(PROFILES[PROFILES.len() - 1].1)
    }
}

/// Shape of a column-major tile region.
///
/// Every column is sized for the largest map the engine supports; rows past
/// the real height and columns past the real width are unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGeometry {
    /// Bytes per tile record.
    pub tile_size: usize,
    /// Maximum width and height of the grid.
    pub max_dim: usize,
}

impl TileGeometry {
    /// TOAW I and II.
    pub const SMALL: Self = Self::new(47, 100);
    /// TOAW III.
    pub const MEDIUM: Self = Self::new(47, 300);
    /// TOAW IV.
    pub const LARGE: Self = Self::new(48, 700);

    pub const fn new(tile_size: usize, max_dim: usize) -> Self {
        Self { tile_size, max_dim }
    }

    /// Bytes between the starts of two columns.
    pub const fn column_stride(&self) -> usize {
        self.tile_size * self.max_dim
    }

    /// Total size of the tile region.
    pub const fn region_len(&self) -> usize {
        self.column_stride() * self.max_dim
    }

    /// Recognize the geometry of a segmented tile block from its length.
    pub fn from_block_len(len: usize) -> Option<Self> {
        [Self::SMALL, Self::MEDIUM, Self::LARGE]
            .into_iter()
            .find(|geometry| geometry.region_len() == len)
    }
}

/// Fixed offsets of the decompressed stream layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamLayout {
    /// Region after the header.
    pub metadata_len: usize,
    /// Offset of the zero-based grid width within the metadata region.
    pub width_offset: usize,
    /// Offset of the zero-based grid height within the metadata region.
    pub height_offset: usize,
    /// Region skipped between the metadata and the tiles.
    pub reserved_len: usize,
    pub tiles: TileGeometry,
    /// Absolute offset of the location table in the decompressed payload.
    pub locations_offset: usize,
    /// Number of location slots in the table.
    pub location_slots: usize,
}

impl StreamLayout {
    /// TOAW IV.
    ///
    /// The location table sits at the same absolute offset in every sample
    /// seen so far, whatever the declared grid size.
    pub const TOAW4: Self = Self {
        metadata_len: 448,
        width_offset: 132,
        height_offset: 136,
        reserved_len: 696,
        tiles: TileGeometry::LARGE,
        locations_offset: 64_859_168,
        location_slots: 4000,
    };
}

impl Default for StreamLayout {
    fn default() -> Self {
        Self::TOAW4
    }
}

/// Convert a stored zero-based dimension to a size.
#[inline]
pub(crate) fn dimension(stored: u32) -> usize {
    (stored as usize).saturating_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(LayoutKind::detect(&[0x1f, 0x8b, 0x08, 0x00]), LayoutKind::Stream);
        assert_eq!(LayoutKind::detect(&[0x1f, 0x8b, 0x09]), LayoutKind::Segmented);
        assert_eq!(LayoutKind::detect(b"TOAC"), LayoutKind::Segmented);
        assert_eq!(LayoutKind::detect(&[0x1f, 0x8b]), LayoutKind::Segmented);
        assert_eq!(LayoutKind::detect(&[]), LayoutKind::Segmented);
    }

    #[test]
    fn test_version_threshold() {
        for version in [0x43, 0x50, 0x78] {
            let profile = SegmentedProfile::for_version(version);
            assert_eq!(profile.block_count, 12);
            assert_eq!(profile.location_block, 10);
            assert_eq!(profile.trailer_len, 256);
        }
        for version in [0x79, 0x80, u32::MAX] {
            let profile = SegmentedProfile::for_version(version);
            assert_eq!(profile.block_count, 13);
            assert_eq!(profile.location_block, 11);
        }
    }

    #[test]
    fn test_first_generation_trailer() {
        assert_eq!(SegmentedProfile::for_version(0x42).trailer_len, 232);
        assert_eq!(SegmentedProfile::for_version(0x41).trailer_len, 256);
        assert_eq!(SegmentedProfile::for_version(0).block_count, 12);
    }

    #[test]
    fn test_profiles_cover_every_version_once() {
        let mut next = 0u64;
        for (range, _) in &PROFILES {
            assert_eq!(u64::from(*range.start()), next);
            next = u64::from(*range.end()) + 1;
        }
        assert_eq!(next, u64::from(u32::MAX) + 1);
    }

    #[test]
    fn test_tile_geometry_from_block_len() {
        assert_eq!(TileGeometry::from_block_len(470_000), Some(TileGeometry::SMALL));
        assert_eq!(TileGeometry::from_block_len(4_230_000), Some(TileGeometry::MEDIUM));
        assert_eq!(TileGeometry::from_block_len(23_520_000), Some(TileGeometry::LARGE));
        assert_eq!(TileGeometry::from_block_len(470_001), None);
        assert_eq!(TileGeometry::from_block_len(0), None);
    }

    #[test]
    fn test_dimension() {
        assert_eq!(dimension(0), 1);
        assert_eq!(dimension(99), 100);
    }
}
