//! Tile record and its flag bytes.
//!
//! A tile is a raw byte span (47 bytes up to TOAW III, 48 in TOAW IV) in which
//! most bytes are independent flags. Decoding is flag extraction: several
//! terrain flags may be set at once and no classification is applied here.

use bitflags::bitflags;

/// Byte holding the "no terrain" bit.
pub const EMPTY_BYTE: usize = 38;

/// Bit of [`EMPTY_BYTE`] marking a tile outside the playable map.
pub const EMPTY_MASK: u8 = 0x10;

/// Terrain and feature flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Arid, sandy, rough sandy or badlands.
    Sand,
    Hills,
    Mountains,
    Impassable,
    Marsh,
    FloodedMarsh,
    ShallowWater,
    DeepWater,
    /// Any of the four urban densities.
    Urban,
    /// Any of the four forest kinds.
    Forest,
}

impl Feature {
    /// Flag bytes that indicate this feature when any is non-zero.
    pub const fn bytes(self) -> &'static [usize] {
        match self {
            Feature::Sand => &[1, 2, 3, 4],
            Feature::Hills => &[5],
            Feature::Mountains => &[6],
            Feature::Impassable => &[7],
            Feature::Marsh => &[8],
            Feature::FloodedMarsh => &[9],
            Feature::ShallowWater => &[10],
            Feature::DeepWater => &[11],
            Feature::Urban => &[14, 15, 16, 17],
            Feature::Forest => &[26, 27, 28, 29],
        }
    }
}

/// Linear features drawn across hex edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    River,
    MajorRiver,
    Road,
    Railroad,
}

impl Route {
    /// All routes in drawing order.
    pub const ALL: [Route; 4] = [Route::River, Route::MajorRiver, Route::Road, Route::Railroad];

    /// The byte holding this route's direction bitmask.
    pub const fn byte(self) -> usize {
        match self {
            Route::River => 22,
            Route::MajorRiver => 23,
            Route::Road => 31,
            Route::Railroad => 33,
        }
    }
}

bitflags! {
    /// Hex directions a route leaves the tile through, one bit each.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Directions: u8 {
        const NORTH = 1;
        const NORTH_EAST = 2;
        const SOUTH_EAST = 4;
        const SOUTH = 8;
        const SOUTH_WEST = 16;
        const NORTH_WEST = 32;
    }
}

impl Directions {
    /// Clockwise index of a single direction, starting at north.
    pub fn index(self) -> Option<u32> {
        (self.bits().count_ones() == 1).then(|| self.bits().trailing_zeros())
    }
}

/// One grid cell as stored in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TileRecord {
    #[cfg_attr(feature = "serde", serde(with = "toaw_common::base64_bytes"))]
    bytes: Vec<u8>,
}

impl TileRecord {
    /// Copy a tile out of its span.
    pub fn decode(span: &[u8]) -> Self {
        Self {
            bytes: span.to_vec(),
        }
    }

    /// The raw tile bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// A single byte, zero past the end of the record.
    #[inline]
    pub fn byte(&self, index: usize) -> u8 {
        self.bytes.get(index).copied().unwrap_or(0)
    }

    /// Whether the tile lies outside the playable map.
    ///
    /// An empty tile reports no features and no routes whatever its other
    /// bytes hold.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.byte(EMPTY_BYTE) & EMPTY_MASK != 0
    }

    /// Whether the tile carries a terrain feature.
    pub fn has(&self, feature: Feature) -> bool {
        !self.is_empty() && feature.bytes().iter().any(|&i| self.byte(i) != 0)
    }

    /// Directions a route leaves this tile through.
    pub fn route(&self, route: Route) -> Directions {
        if self.is_empty() {
            return Directions::empty();
        }
        Directions::from_bits_truncate(self.byte(route.byte()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(flags: &[(usize, u8)]) -> TileRecord {
        let mut bytes = vec![0u8; 47];
        for &(index, value) in flags {
            bytes[index] = value;
        }
        TileRecord::decode(&bytes)
    }

    #[test]
    fn test_empty_bit_masks_everything() {
        let mut flags: Vec<(usize, u8)> = (0..47).map(|i| (i, 0xff)).collect();
        flags[EMPTY_BYTE] = (EMPTY_BYTE, EMPTY_MASK);
        let tile = tile(&flags);

        assert!(tile.is_empty());
        assert!(!tile.has(Feature::DeepWater));
        assert!(!tile.has(Feature::Forest));
        assert_eq!(tile.route(Route::Road), Directions::empty());
    }

    #[test]
    fn test_other_bits_of_empty_byte_are_ignored() {
        let tile = tile(&[(EMPTY_BYTE, 0xef), (6, 1)]);
        assert!(!tile.is_empty());
        assert!(tile.has(Feature::Mountains));
    }

    #[test]
    fn test_group_features() {
        assert!(tile(&[(3, 1)]).has(Feature::Sand));
        assert!(tile(&[(17, 2)]).has(Feature::Urban));
        assert!(tile(&[(26, 1)]).has(Feature::Forest));
        assert!(!tile(&[(25, 1), (30, 1)]).has(Feature::Forest));
    }

    #[test]
    fn test_flags_are_independent() {
        let tile = tile(&[(5, 1), (11, 1)]);
        assert!(tile.has(Feature::Hills));
        assert!(tile.has(Feature::DeepWater));
        assert!(!tile.has(Feature::ShallowWater));
    }

    #[test]
    fn test_route_bitmask() {
        let tile = tile(&[(31, 0b0100_1001), (33, 0b10_0000)]);
        assert_eq!(tile.route(Route::Road), Directions::NORTH | Directions::SOUTH);
        assert_eq!(tile.route(Route::Railroad), Directions::NORTH_WEST);
        assert_eq!(tile.route(Route::River), Directions::empty());
        assert_eq!(Directions::SOUTH_EAST.index(), Some(2));
        assert_eq!((Directions::NORTH | Directions::SOUTH).index(), None);
    }

    #[test]
    fn test_byte_past_end_is_zero() {
        assert_eq!(tile(&[]).byte(100), 0);
    }
}
