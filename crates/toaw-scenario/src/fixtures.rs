//! Synthetic scenario files for tests.

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::BoxError;
use crate::layout::{SegmentedProfile, StreamLayout, TileGeometry, TEAM_BLOCK, TILE_BLOCK, UNIT_BLOCK};
use crate::records::{Header, Location, Team, Unit};
use crate::BlockDecompressor;

/// Decompressor that returns blocks unchanged.
pub(crate) struct Passthrough;

impl BlockDecompressor for Passthrough {
    fn decompress_block(&self, block: &[u8]) -> Result<Vec<u8>, BoxError> {
        Ok(block.to_vec())
    }
}

/// Decompressor that rejects every block.
pub(crate) struct Corrupt;

impl BlockDecompressor for Corrupt {
    fn decompress_block(&self, _block: &[u8]) -> Result<Vec<u8>, BoxError> {
        Err("corrupt block".into())
    }
}

/// Encode bytes as an uncoded-literal DCL stream with a 1K window.
pub(crate) fn blast_literals(data: &[u8]) -> Vec<u8> {
    let mut out = vec![0x00, 0x04];
    let mut acc = 0u32;
    let mut count = 0u32;
    let mut put = |value: u32, bits: u32, out: &mut Vec<u8>| {
        acc |= value << count;
        count += bits;
        while count >= 8 {
            out.push(acc as u8);
            acc >>= 8;
            count -= 8;
        }
    };
    for &byte in data {
        put(u32::from(byte) << 1, 9, &mut out);
    }
    // length symbol 15 (code 0000000) with eight extra one bits: 519
    put(1, 1, &mut out);
    put(0, 7, &mut out);
    put(0xff, 8, &mut out);
    put(0, 7, &mut out);
    out
}

pub(crate) fn header_bytes(version: u32, title: &str) -> Vec<u8> {
    let mut bytes = vec![0u8; Header::SIZE];
    bytes[..8].copy_from_slice(b"TOAC1.00");
    bytes[0x14..0x14 + title.len()].copy_from_slice(title.as_bytes());
    bytes[0x11c..0x120].copy_from_slice(&version.to_le_bytes());
    bytes[0x124..0x124 + 7].copy_from_slice(b"Briefed");
    bytes[0x10124..0x10128].copy_from_slice(&1u32.to_le_bytes());
    bytes
}

pub(crate) fn unit_bytes(name: &str, packed: u32, x: i32, y: i32) -> Vec<u8> {
    let mut bytes = vec![0u8; Unit::SIZE];
    bytes[..name.len()].copy_from_slice(name.as_bytes());
    bytes[0x138..0x13c].copy_from_slice(&packed.to_le_bytes());
    bytes[0x158..0x15c].copy_from_slice(&x.to_le_bytes());
    bytes[0x15c..0x160].copy_from_slice(&y.to_le_bytes());
    bytes
}

pub(crate) fn location_bytes(x: i32, y: i32, name: &str) -> Vec<u8> {
    let mut bytes = vec![0u8; Location::SIZE];
    bytes[..4].copy_from_slice(&x.to_le_bytes());
    bytes[4..8].copy_from_slice(&y.to_le_bytes());
    bytes[8..8 + name.len()].copy_from_slice(name.as_bytes());
    bytes
}

pub(crate) fn team_bytes(country: &str, force: &str, flag_id: u32) -> Vec<u8> {
    let mut bytes = vec![0u8; Team::SIZE];
    bytes[..country.len()].copy_from_slice(country.as_bytes());
    bytes[17..17 + force.len()].copy_from_slice(force.as_bytes());
    bytes[60..64].copy_from_slice(&flag_id.to_le_bytes());
    bytes
}

/// Builder for a segmented scenario file.
pub(crate) struct SegmentedFile {
    pub version: u32,
    pub width: usize,
    pub height: usize,
    pub geometry: TileGeometry,
    pub tile_flags: Vec<(usize, usize, usize, u8)>,
    pub units: Vec<u8>,
    pub locations: Vec<u8>,
    pub teams: Vec<u8>,
}

impl SegmentedFile {
    pub fn new(version: u32, width: usize, height: usize) -> Self {
        let mut teams = team_bytes("Germany", "Heeresgruppe Mitte", 3);
        teams.extend(team_bytes("USSR", "Central Front", 7));
        Self {
            version,
            width,
            height,
            geometry: TileGeometry::SMALL,
            tile_flags: Vec::new(),
            units: Vec::new(),
            locations: Vec::new(),
            teams,
        }
    }

    /// Set tile byte `index` of `(x, y)`.
    pub fn tile(mut self, x: usize, y: usize, index: usize, value: u8) -> Self {
        self.tile_flags.push((x, y, index, value));
        self
    }

    pub fn unit(mut self, name: &str, packed: u32, x: i32, y: i32) -> Self {
        self.units.extend(unit_bytes(name, packed, x, y));
        self
    }

    pub fn location(mut self, x: i32, y: i32, name: &str) -> Self {
        self.locations.extend(location_bytes(x, y, name));
        self
    }

    /// Uncompressed block contents. Unused blocks carry their index.
    pub fn blocks(&self) -> Vec<Vec<u8>> {
        let profile = SegmentedProfile::for_version(self.version);
        let mut blocks: Vec<Vec<u8>> = (0..profile.block_count).map(|i| vec![i as u8; 4]).collect();

        let mut tiles = vec![0u8; self.geometry.region_len()];
        for &(x, y, index, value) in &self.tile_flags {
            tiles[x * self.geometry.column_stride() + y * self.geometry.tile_size + index] = value;
        }
        blocks[TILE_BLOCK] = tiles;
        blocks[UNIT_BLOCK] = self.units.clone();
        blocks[TEAM_BLOCK] = self.teams.clone();
        blocks[profile.location_block] = self.locations.clone();
        blocks
    }

    pub fn build(&self, encode: impl Fn(&[u8]) -> Vec<u8>) -> Vec<u8> {
        let profile = SegmentedProfile::for_version(self.version);
        let mut file = header_bytes(self.version, "Fixture");

        let push_block = |file: &mut Vec<u8>, block: &[u8]| {
            let encoded = encode(block);
            file.extend_from_slice(&(encoded.len() as u32).to_le_bytes());
            file.extend_from_slice(&encoded);
        };
        for block in self.blocks() {
            push_block(&mut file, &block);
        }

        let mut trailer = vec![0u8; profile.trailer_len];
        trailer[..4].copy_from_slice(&(self.width as u32 - 1).to_le_bytes());
        trailer[4..8].copy_from_slice(&(self.height as u32 - 1).to_le_bytes());
        file.extend_from_slice(&trailer);

        push_block(&mut file, &[]);
        file
    }

    pub fn build_uncompressed(&self) -> Vec<u8> {
        self.build(|block| block.to_vec())
    }
}

/// A stream layout small enough to build in tests.
pub(crate) fn small_stream_layout() -> StreamLayout {
    let tiles = TileGeometry::new(48, 4);
    StreamLayout {
        tiles,
        locations_offset: Header::SIZE + 448 + 696 + tiles.region_len() + 64,
        location_slots: 3,
        ..StreamLayout::TOAW4
    }
}

/// Builder for a gzip stream scenario using [`small_stream_layout`].
pub(crate) struct StreamFile {
    pub version: u32,
    pub width: usize,
    pub height: usize,
    pub tile_flags: Vec<(usize, usize, usize, u8)>,
    pub locations: Vec<u8>,
}

impl StreamFile {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            version: 0x96,
            width,
            height,
            tile_flags: Vec::new(),
            locations: Vec::new(),
        }
    }

    pub fn payload(&self) -> Vec<u8> {
        let layout = small_stream_layout();
        let mut payload = header_bytes(self.version, "Stream fixture");

        let mut metadata = vec![0u8; layout.metadata_len];
        metadata[layout.width_offset..layout.width_offset + 4]
            .copy_from_slice(&(self.width as u32 - 1).to_le_bytes());
        metadata[layout.height_offset..layout.height_offset + 4]
            .copy_from_slice(&(self.height as u32 - 1).to_le_bytes());
        payload.extend(metadata);
        payload.extend(vec![0xee; layout.reserved_len]);

        let mut tiles = vec![0u8; layout.tiles.region_len()];
        for &(x, y, index, value) in &self.tile_flags {
            tiles[x * layout.tiles.column_stride() + y * layout.tiles.tile_size + index] = value;
        }
        payload.extend(tiles);

        payload.resize(layout.locations_offset, 0);
        let mut table = self.locations.clone();
        while table.len() < layout.location_slots * Location::SIZE {
            table.extend(location_bytes(999, 999, ""));
        }
        payload.extend(table);
        payload
    }

    pub fn build(&self) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
        encoder.write_all(&self.payload()).unwrap();
        encoder.finish().unwrap()
    }
}
