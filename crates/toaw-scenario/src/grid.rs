//! Row-major tile grid.

use crate::layout::TileGeometry;
use crate::records::TileRecord;
use crate::{Error, Result, Stage};

/// The decoded map, indexed by `(x, y)`.
///
/// Tiles are stored row-major: row `y` holds the tiles for `x` in
/// `0..width`. The file stores them column-major with padding, see
/// [`TileGrid::from_column_major`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "StoredGrid"))]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<TileRecord>,
}

impl TileGrid {
    /// Slice a padded column-major tile region.
    ///
    /// Tile `(x, y)` starts at `x * column_stride + y * tile_size`. Only the
    /// real `width` and `height` are visited. `offset` locates the region in
    /// the input and is only used for errors.
    pub fn from_column_major(
        region: &[u8],
        offset: u64,
        geometry: TileGeometry,
        width: usize,
        height: usize,
    ) -> Result<Self> {
        if width > geometry.max_dim || height > geometry.max_dim {
            return Err(Error::GridOutOfBounds {
                offset,
                width,
                height,
                max: geometry.max_dim,
            });
        }
        if region.len() < geometry.region_len() {
            return Err(Error::RegionTooShort {
                stage: Stage::TileGrid,
                offset,
                expected: geometry.region_len(),
                actual: region.len(),
            });
        }

        let stride = geometry.column_stride();
        let mut tiles = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let start = x * stride + y * geometry.tile_size;
                tiles.push(TileRecord::decode(
                    &region[start..start + geometry.tile_size],
                ));
            }
        }

        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `(x, y)` lies on the grid.
    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Get the tile at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<&TileRecord> {
        if !self.contains(x, y) {
            return None;
        }
        self.tiles.get(y * self.width + x)
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[TileRecord]> {
        // chunks panics on zero
        self.tiles.chunks(self.width.max(1))
    }

    /// Iterate over all tiles with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &TileRecord)> {
        self.rows()
            .enumerate()
            .flat_map(|(y, row)| row.iter().enumerate().map(move |(x, tile)| (x, y, tile)))
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// A grid as stored in a document, checked before use.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct StoredGrid {
    width: usize,
    height: usize,
    tiles: Vec<TileRecord>,
}

#[cfg(feature = "serde")]
impl TryFrom<StoredGrid> for TileGrid {
    type Error = Error;

    fn try_from(stored: StoredGrid) -> Result<Self> {
        let StoredGrid {
            width,
            height,
            tiles,
        } = stored;

        if width.checked_mul(height) != Some(tiles.len()) {
            return Err(Error::GridShape {
                width,
                height,
                tiles: tiles.len(),
            });
        }
        if let Some(first) = tiles.first() {
            let expected = first.as_bytes().len();
            if let Some((index, tile)) = tiles
                .iter()
                .enumerate()
                .find(|(_, tile)| tile.as_bytes().len() != expected)
            {
                return Err(Error::TileSize {
                    index,
                    expected,
                    actual: tile.as_bytes().len(),
                });
            }
        }

        Ok(Self {
            width,
            height,
            tiles,
        })
    }
}
