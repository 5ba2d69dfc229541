//! Reader for the stream layout.
//!
//! The whole file is gzip compressed. After decompression the regions are
//! read in order (header, metadata, reserved, tiles) and the location table
//! is taken from an absolute offset. Units and teams are not decoded.

use toaw_common::BinaryReader;
use tracing::debug;

use crate::layout::{dimension, LayoutKind, StreamLayout};
use crate::records::{Header, Location};
use crate::scenario::Scenario;
use crate::{tables, BlockDecompressor, Error, Result, Stage, TileGrid};

fn region<'a>(reader: &mut BinaryReader<'a>, stage: Stage, len: usize) -> Result<&'a [u8]> {
    let offset = reader.position() as u64;
    let available = reader.remaining();
    reader.read_bytes(len).map_err(|_| Error::RegionTooShort {
        stage,
        offset,
        expected: len,
        actual: available,
    })
}

/// Decode a stream file from its raw (still compressed) bytes.
pub(crate) fn read<D>(data: &[u8], decompressor: &D, layout: &StreamLayout) -> Result<Scenario>
where
    D: BlockDecompressor + ?Sized,
{
    let payload = decompressor
        .decompress_stream(data)
        .map_err(|source| Error::Decompression {
            stage: Stage::Stream,
            source,
        })?;
    debug!(compressed = data.len(), decompressed = payload.len(), "stream layout");

    let mut reader = BinaryReader::new(&payload);
    let header = Header::decode(region(&mut reader, Stage::Header, Header::SIZE)?)?;

    let metadata = BinaryReader::new(region(&mut reader, Stage::Metadata, layout.metadata_len)?);
    let width = dimension(metadata.u32_at(layout.width_offset)?);
    let height = dimension(metadata.u32_at(layout.height_offset)?);
    debug!(version = header.version, width, height, "stream metadata");

    region(&mut reader, Stage::Reserved, layout.reserved_len)?;
    let tile_offset = reader.position() as u64;
    let tile_region = region(&mut reader, Stage::TileGrid, layout.tiles.region_len())?;
    let tiles = TileGrid::from_column_major(tile_region, tile_offset, layout.tiles, width, height)?;

    let table_len = layout.location_slots * Location::SIZE;
    let table_end = layout.locations_offset + table_len;
    let table = payload
        .get(layout.locations_offset..table_end)
        .ok_or(Error::RegionTooShort {
            stage: Stage::LocationTable,
            offset: layout.locations_offset as u64,
            expected: table_end,
            actual: payload.len(),
        })?;
    let locations = tables::locations(table)?;

    Ok(Scenario {
        version: header.version,
        layout: LayoutKind::Stream,
        header,
        tiles,
        units: Vec::new(),
        locations,
        teams: None,
        raw_blocks: Vec::new(),
    })
}
