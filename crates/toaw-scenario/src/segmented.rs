//! Reader for the segmented layout.
//!
//! ```text
//! header                       65868 bytes
//! block 0..N                   u32 length + compressed bytes, N from the version
//! trailer                      232 or 256 bytes, grid size at 0 and 4
//! final block                  u32 length + compressed bytes, discarded
//! ```

use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use toaw_common::BinaryReader;
use tracing::debug;

use crate::layout::{
    dimension, LayoutKind, SegmentedProfile, TileGeometry, TEAM_BLOCK, TILE_BLOCK,
    TRAILER_HEIGHT_OFFSET, TRAILER_WIDTH_OFFSET, UNIT_BLOCK,
};
use crate::records::Header;
use crate::scenario::{RawBlock, Scenario};
use crate::{tables, BlockDecompressor, Error, Result, Stage, TileGrid};

/// Byte source that tracks its offset and reports short reads per stage.
struct Source<R> {
    inner: R,
    offset: u64,
}

impl<R: Read> Source<R> {
    fn new(inner: R) -> Self {
        Self { inner, offset: 0 }
    }

    fn read_len(&mut self, stage: Stage) -> Result<usize> {
        match self.inner.read_u32::<LittleEndian>() {
            Ok(len) => {
                self.offset += 4;
                Ok(len as usize)
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(Error::Truncated {
                stage,
                offset: self.offset,
                expected: 4,
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn read_vec(&mut self, stage: Stage, len: usize) -> Result<Vec<u8>> {
        let start = self.offset;
        // take() keeps a corrupt length from allocating up front
        let mut bytes = Vec::new();
        (&mut self.inner).take(len as u64).read_to_end(&mut bytes)?;
        self.offset += bytes.len() as u64;
        if bytes.len() < len {
            return Err(Error::Truncated {
                stage,
                offset: start,
                expected: len,
            });
        }
        Ok(bytes)
    }
}

/// Decode a segmented file from its first byte.
pub(crate) fn read<R, D>(reader: R, decompressor: &D) -> Result<Scenario>
where
    R: Read,
    D: BlockDecompressor + ?Sized,
{
    let mut source = Source::new(reader);

    let header = Header::decode(&source.read_vec(Stage::Header, Header::SIZE)?)?;
    let profile = SegmentedProfile::for_version(header.version);
    debug!(
        version = header.version,
        blocks = profile.block_count,
        "segmented layout"
    );

    let mut blocks = Vec::with_capacity(profile.block_count);
    let mut offsets = Vec::with_capacity(profile.block_count);
    for index in 0..profile.block_count {
        let stage = Stage::Block(index);
        offsets.push(source.offset);
        let len = source.read_len(stage)?;
        let compressed = source.read_vec(stage, len)?;
        let block = decompressor
            .decompress_block(&compressed)
            .map_err(|err| Error::Decompression { stage, source: err })?;
        debug!(index, compressed = len, decompressed = block.len(), "block");
        blocks.push(block);
    }

    let trailer = source.read_vec(Stage::Trailer, profile.trailer_len)?;
    let trailer = BinaryReader::new(&trailer);
    let width = dimension(trailer.u32_at(TRAILER_WIDTH_OFFSET)?);
    let height = dimension(trailer.u32_at(TRAILER_HEIGHT_OFFSET)?);

    let final_len = source.read_len(Stage::FinalBlock)?;
    source.read_vec(Stage::FinalBlock, final_len)?;
    debug!(width, height, final_len, end = source.offset, "trailer");

    assemble(header, profile, width, height, blocks, &offsets)
}

/// A decompressed block and the file offset of its length prefix.
fn block<'a>(blocks: &'a [Vec<u8>], offsets: &[u64], index: usize) -> Result<(&'a [u8], u64)> {
    match (blocks.get(index), offsets.get(index)) {
        (Some(block), Some(&offset)) => Ok((block, offset)),
        _ => Err(Error::MissingBlock {
            index,
            count: blocks.len(),
        }),
    }
}

fn assemble(
    header: Header,
    profile: SegmentedProfile,
    width: usize,
    height: usize,
    blocks: Vec<Vec<u8>>,
    offsets: &[u64],
) -> Result<Scenario> {
    let (tile_block, tile_offset) = block(&blocks, offsets, TILE_BLOCK)?;
    let geometry = TileGeometry::from_block_len(tile_block.len())
        .ok_or(Error::UnrecognizedTileBlock(tile_block.len()))?;
    let tiles = TileGrid::from_column_major(tile_block, tile_offset, geometry, width, height)?;

    let units = tables::units(block(&blocks, offsets, UNIT_BLOCK)?.0)?;
    let (team_block, team_offset) = block(&blocks, offsets, TEAM_BLOCK)?;
    let teams = tables::teams(team_block, team_offset)?;
    let locations = tables::locations(block(&blocks, offsets, profile.location_block)?.0)?;

    Ok(Scenario {
        version: header.version,
        layout: LayoutKind::Segmented,
        header,
        tiles,
        units,
        locations,
        teams: Some(teams),
        raw_blocks: blocks.into_iter().map(RawBlock).collect(),
    })
}
