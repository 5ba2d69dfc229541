//! Slicing decompressed blocks into record tables.

use tracing::warn;

use crate::records::{Location, Team, Unit, TEAM_COUNT};
use crate::{Error, Result, Stage};

/// Decode every whole record in `block`.
fn decode_all<T>(
    block: &[u8],
    size: usize,
    decode: fn(&[u8]) -> toaw_common::Result<T>,
) -> Result<Vec<T>> {
    block
        .chunks_exact(size)
        .map(|span| decode(span).map_err(Error::from))
        .collect()
}

/// The unit table. The record count follows from the block length.
pub(crate) fn units(block: &[u8]) -> Result<Vec<Unit>> {
    let trailing = block.len() % Unit::SIZE;
    if trailing != 0 {
        warn!(
            len = block.len(),
            trailing, "unit block is not a whole number of records"
        );
    }
    decode_all(block, Unit::SIZE, Unit::decode)
}

/// The location table, unused slots included.
pub(crate) fn locations(block: &[u8]) -> Result<Vec<Location>> {
    decode_all(block, Location::SIZE, Location::decode)
}

/// The two team records at the start of the team block read at `offset`.
pub(crate) fn teams(block: &[u8], offset: u64) -> Result<[Team; TEAM_COUNT]> {
    let expected = Team::SIZE * TEAM_COUNT;
    if block.len() < expected {
        return Err(Error::RegionTooShort {
            stage: Stage::TeamTable,
            offset,
            expected,
            actual: block.len(),
        });
    }
    Ok([
        Team::decode(&block[..Team::SIZE])?,
        Team::decode(&block[Team::SIZE..expected])?,
    ])
}
