//! The decoded scenario model and the top-level reader.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use toaw_blast::Blast;
use tracing::{debug, warn};

use crate::layout::{LayoutKind, StreamLayout, STREAM_MAGIC};
use crate::records::{Header, Location, Team, TileRecord, Unit, TEAM_COUNT};
use crate::{segmented, stream, BlockDecompressor, Result, TileGrid};

/// One decompressed block of a segmented file, kept for inspection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RawBlock(
    #[cfg_attr(feature = "serde", serde(with = "toaw_common::base64_bytes"))] pub Vec<u8>,
);

impl AsRef<[u8]> for RawBlock {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A fully decoded scenario.
///
/// Produced whole by [`ScenarioReader`]; nothing is decoded lazily and no
/// partial model is returned on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub version: u32,
    pub layout: LayoutKind,
    pub header: Header,
    pub tiles: TileGrid,
    /// Every record of the unit table, placed or not.
    pub units: Vec<Unit>,
    /// Every slot of the location table, unused ones included.
    pub locations: Vec<Location>,
    /// Absent in the stream layout.
    pub teams: Option<[Team; TEAM_COUNT]>,
    /// Decompressed blocks in file order. Empty for the stream layout.
    pub raw_blocks: Vec<RawBlock>,
}

impl Scenario {
    /// Decode a scenario file with the default decompressor.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        ScenarioReader::new().open(path)
    }

    /// Decode a scenario held in memory with the default decompressor.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        ScenarioReader::new().from_bytes(data)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.tiles.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.tiles.height()
    }

    pub fn tile(&self, x: usize, y: usize) -> Option<&TileRecord> {
        self.tiles.get(x, y)
    }

    /// Units on the map with their grid position.
    ///
    /// Skips units with a 999 coordinate on either axis and units whose
    /// position lies outside the grid.
    pub fn placed_units(&self) -> impl Iterator<Item = ((usize, usize), &Unit)> {
        self.units.iter().filter_map(move |unit| {
            let (x, y) = unit.position()?;
            self.tiles.contains(x, y).then_some(((x, y), unit))
        })
    }

    /// Used location slots that lie on the grid.
    pub fn placed_locations(&self) -> impl Iterator<Item = ((usize, usize), &Location)> {
        self.locations.iter().filter_map(move |location| {
            let (x, y) = location.position()?;
            self.tiles.contains(x, y).then_some(((x, y), location))
        })
    }

    /// Placed units grouped by team id, in ascending id order.
    pub fn units_by_team(&self) -> BTreeMap<u32, Vec<&Unit>> {
        let mut teams: BTreeMap<u32, Vec<&Unit>> = BTreeMap::new();
        for (_, unit) in self.placed_units() {
            teams.entry(unit.team()).or_default().push(unit);
        }
        teams
    }
}

/// Reads scenarios of either layout.
///
/// The decompressor is injected so tests and tools can substitute their own;
/// [`ScenarioReader::new`] uses [`Blast`] for blocks and gzip for streams.
///
/// # Example
///
/// ```no_run
/// use toaw_scenario::ScenarioReader;
///
/// let scenario = ScenarioReader::new().open("Kursk.sce")?;
/// println!("{} ({}x{})", scenario.header.title(), scenario.width(), scenario.height());
/// # Ok::<(), toaw_scenario::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioReader<D = Blast> {
    decompressor: D,
    stream_layout: StreamLayout,
}

impl ScenarioReader {
    pub fn new() -> Self {
        Self::with_decompressor(Blast::new())
    }
}

impl Default for ScenarioReader {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: BlockDecompressor> ScenarioReader<D> {
    pub fn with_decompressor(decompressor: D) -> Self {
        Self {
            decompressor,
            stream_layout: StreamLayout::default(),
        }
    }

    /// Use different fixed offsets for the stream layout.
    pub fn with_stream_layout(mut self, layout: StreamLayout) -> Self {
        self.stream_layout = layout;
        self
    }

    /// Decode the file at `path`.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<Scenario> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening scenario");
        let file = File::open(path)?;
        self.read(BufReader::new(file))
    }

    /// Decode a scenario held in memory.
    pub fn from_bytes(&self, data: &[u8]) -> Result<Scenario> {
        let scenario = match LayoutKind::detect(data) {
            LayoutKind::Stream => stream::read(data, &self.decompressor, &self.stream_layout)?,
            LayoutKind::Segmented => segmented::read(data, &self.decompressor)?,
        };
        report(&scenario);
        Ok(scenario)
    }

    /// Decode a scenario from a byte source positioned at its start.
    ///
    /// The detection prefix is replayed in front of the rest of the source,
    /// so no seeking is needed.
    pub fn read<R: Read>(&self, mut reader: R) -> Result<Scenario> {
        let mut prefix = Vec::with_capacity(STREAM_MAGIC.len());
        (&mut reader)
            .take(STREAM_MAGIC.len() as u64)
            .read_to_end(&mut prefix)?;

        let scenario = match LayoutKind::detect(&prefix) {
            LayoutKind::Stream => {
                let mut data = prefix;
                reader.read_to_end(&mut data)?;
                stream::read(&data, &self.decompressor, &self.stream_layout)?
            }
            LayoutKind::Segmented => {
                segmented::read(prefix.as_slice().chain(reader), &self.decompressor)?
            }
        };
        report(&scenario);
        Ok(scenario)
    }
}

fn report(scenario: &Scenario) {
    debug!(
        layout = ?scenario.layout,
        version = scenario.version,
        width = scenario.width(),
        height = scenario.height(),
        units = scenario.units.len(),
        locations = scenario.locations.len(),
        "decoded scenario"
    );

    let stray_units = scenario
        .units
        .iter()
        .filter_map(Unit::position)
        .filter(|&(x, y)| !scenario.tiles.contains(x, y))
        .count();
    if stray_units > 0 {
        warn!(count = stray_units, "units placed outside the grid");
    }

    let stray_locations = scenario
        .locations
        .iter()
        .filter_map(Location::position)
        .filter(|&(x, y)| !scenario.tiles.contains(x, y))
        .count();
    if stray_locations > 0 {
        warn!(count = stray_locations, "locations placed outside the grid");
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::fixtures::{
        blast_literals, small_stream_layout, Corrupt, Passthrough, SegmentedFile, StreamFile,
    };
    use crate::layout::TileGeometry;
    use crate::records::{Directions, Feature, Route};
    use crate::{Error, ErrorCategory, Stage};

    fn reader() -> ScenarioReader<Passthrough> {
        ScenarioReader::with_decompressor(Passthrough).with_stream_layout(small_stream_layout())
    }

    fn kursk() -> SegmentedFile {
        SegmentedFile::new(0x79, 12, 9)
            .tile(3, 2, 11, 1)
            .tile(11, 8, 31, 0b1001)
            .tile(0, 0, 38, 0x10)
            .unit("1st Panzer", (1 << 7) | 5, 3, 2)
            .unit("Reserve", 1 << 7, 999, 4)
            .unit("2nd Guards", (2 << 7) | 9, 11, 8)
            .unit("Stray", 2 << 7, 40, 40)
            .location(5, 5, "Kursk")
            .location(999, 0, "")
            .location(2, 7, "Orel")
    }

    #[test]
    fn test_segmented_model() {
        let scenario = reader().from_bytes(&kursk().build_uncompressed()).unwrap();

        assert_eq!(scenario.layout, LayoutKind::Segmented);
        assert_eq!(scenario.version, 0x79);
        assert_eq!(scenario.header.title(), "Fixture");
        assert_eq!(scenario.header.description(), "Briefed");
        assert_eq!(scenario.header.team_goes_first, 1);
        assert_eq!((scenario.width(), scenario.height()), (12, 9));
        assert_eq!(scenario.tiles.len(), 12 * 9);
        assert_eq!(scenario.raw_blocks.len(), 13);

        assert!(scenario.tile(3, 2).unwrap().has(Feature::DeepWater));
        assert_eq!(
            scenario.tile(11, 8).unwrap().route(Route::Road),
            Directions::NORTH | Directions::SOUTH
        );
        assert!(scenario.tile(0, 0).unwrap().is_empty());
        assert!(scenario.tile(12, 0).is_none());

        assert_eq!(scenario.units.len(), 4);
        assert_eq!(scenario.units[0].name(), "1st Panzer");
        assert_eq!(scenario.locations.len(), 3);
        assert_eq!(scenario.locations[0].name(), "Kursk");

        let teams = scenario.teams.as_ref().unwrap();
        assert_eq!(teams[0].country(), "Germany");
        assert_eq!(teams[1].force(), "Central Front");
        assert_eq!(teams[1].flag_id, 7);
    }

    #[test]
    fn test_location_block_follows_version() {
        let newer = reader().from_bytes(&kursk().build_uncompressed()).unwrap();
        assert_eq!(newer.raw_blocks[11].0, kursk().locations);
        assert_eq!(newer.raw_blocks[10].0, vec![10; 4]);

        let mut older = kursk();
        older.version = 0x78;
        let older = reader().from_bytes(&older.build_uncompressed()).unwrap();
        assert_eq!(older.raw_blocks.len(), 12);
        assert_eq!(older.raw_blocks[10].0, kursk().locations);
        assert_eq!(older.locations.len(), 3);
        assert_eq!(older.locations[2].name(), "Orel");
    }

    #[test]
    fn test_first_generation_trailer() {
        let mut file = kursk();
        file.version = 0x42;
        let scenario = reader().from_bytes(&file.build_uncompressed()).unwrap();
        assert_eq!((scenario.width(), scenario.height()), (12, 9));
        assert_eq!(scenario.locations.len(), 3);
    }

    #[test]
    fn test_placement_queries_skip_sentinels() {
        let scenario = reader().from_bytes(&kursk().build_uncompressed()).unwrap();

        let units: Vec<_> = scenario
            .placed_units()
            .map(|(pos, unit)| (pos, unit.name().into_owned()))
            .collect();
        assert_eq!(
            units,
            vec![((3, 2), "1st Panzer".to_string()), ((11, 8), "2nd Guards".to_string())]
        );

        let locations: Vec<_> = scenario.placed_locations().map(|(pos, _)| pos).collect();
        assert_eq!(locations, vec![(5, 5), (2, 7)]);

        let by_team = scenario.units_by_team();
        assert_eq!(by_team.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(by_team[&1][0].type_index(), 5);
        assert_eq!(by_team[&2][0].name(), "2nd Guards");
    }

    #[test]
    fn test_blast_blocks_end_to_end() {
        let file = SegmentedFile::new(0x50, 5, 4)
            .tile(4, 3, 6, 1)
            .unit("Recon", 3 << 7, 1, 1)
            .location(0, 3, "Bastogne");
        let bytes = file.build(blast_literals);

        let scenario = ScenarioReader::new().from_bytes(&bytes).unwrap();
        assert_eq!(scenario.raw_blocks.len(), 12);
        assert_eq!(scenario.raw_blocks[1].0.len(), TileGeometry::SMALL.region_len());
        assert!(scenario.tile(4, 3).unwrap().has(Feature::Mountains));
        assert_eq!(scenario.units[0].team(), 3);
        assert_eq!(scenario.locations[0].name(), "Bastogne");
    }

    #[test]
    fn test_read_matches_from_bytes() {
        let bytes = kursk().build_uncompressed();
        let from_reader = reader().read(bytes.as_slice()).unwrap();
        assert_eq!(from_reader, reader().from_bytes(&bytes).unwrap());
    }

    #[test]
    fn test_truncated_block_reports_stage() {
        let bytes = kursk().build_uncompressed();
        let header_and_two_blocks = Header::SIZE + 4 + 4 + 4 + TileGeometry::SMALL.region_len();

        let err = reader()
            .from_bytes(&bytes[..header_and_two_blocks + 100])
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Format);
        match err {
            Error::Truncated { stage, offset, expected } => {
                assert_eq!(stage, Stage::Block(2));
                assert_eq!(offset, header_and_two_blocks as u64 + 4);
                assert_eq!(expected, 4 * 392);
            }
            other => panic!("expected truncation, got {other:?}"),
        }

        let err = reader().from_bytes(&bytes[..1000]).unwrap_err();
        assert!(matches!(err, Error::Truncated { stage: Stage::Header, offset: 0, .. }));
    }

    #[test]
    fn test_missing_final_block_is_an_error() {
        let bytes = kursk().build_uncompressed();
        let err = reader().from_bytes(&bytes[..bytes.len() - 2]).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::FinalBlock));
    }

    #[test]
    fn test_unrecognized_tile_block() {
        let mut file = SegmentedFile::new(0x79, 5, 5);
        file.geometry = TileGeometry::new(47, 10);
        let err = reader().from_bytes(&file.build_uncompressed()).unwrap_err();
        assert!(matches!(err, Error::UnrecognizedTileBlock(4700)));
    }

    #[test]
    fn test_grid_larger_than_tile_block() {
        let file = SegmentedFile::new(0x50, 101, 4);
        let err = reader().from_bytes(&file.build_uncompressed()).unwrap_err();
        // block 0 is a 4-byte filler, so block 1 starts 8 bytes past the header
        let tile_block_at = (Header::SIZE + 8) as u64;
        match err {
            Error::GridOutOfBounds { offset, width, max, .. } => {
                assert_eq!(offset, tile_block_at);
                assert_eq!((width, max), (101, 100));
            }
            other => panic!("expected oversized grid, got {other:?}"),
        }
    }

    #[test]
    fn test_short_team_block() {
        let mut file = kursk();
        file.teams.truncate(64);
        let units_len = file.units.len();
        let err = reader().from_bytes(&file.build_uncompressed()).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::TeamTable));

        let team_block_at =
            Header::SIZE + 8 + 4 + TileGeometry::SMALL.region_len() + 4 + units_len + 8;
        assert!(matches!(
            err,
            Error::RegionTooShort { offset, actual: 64, .. } if offset == team_block_at as u64
        ));
    }

    #[test]
    fn test_decompression_failure() {
        let bytes = kursk().build_uncompressed();
        let err = ScenarioReader::with_decompressor(Corrupt)
            .from_bytes(&bytes)
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Decompression);
        assert_eq!(err.stage(), Some(Stage::Block(0)));
    }

    #[test]
    fn test_stream_layout() {
        let mut file = StreamFile::new(4, 3);
        file.tile_flags.push((2, 1, 26, 1));
        file.tile_flags.push((3, 2, 33, 0b10_0100));
        file.locations.extend(crate::fixtures::location_bytes(1, 2, "Arnhem"));
        file.locations.extend(crate::fixtures::location_bytes(999, 999, ""));
        let bytes = file.build();

        let scenario = reader().from_bytes(&bytes).unwrap();
        assert_eq!(scenario.layout, LayoutKind::Stream);
        assert_eq!(scenario.version, 0x96);
        assert_eq!(scenario.header.title(), "Stream fixture");
        assert_eq!((scenario.width(), scenario.height()), (4, 3));
        assert!(scenario.tile(2, 1).unwrap().has(Feature::Forest));
        assert_eq!(
            scenario.tile(3, 2).unwrap().route(Route::Railroad),
            Directions::SOUTH_EAST | Directions::NORTH_WEST
        );
        assert!(scenario.units.is_empty());
        assert!(scenario.teams.is_none());
        assert!(scenario.raw_blocks.is_empty());
        assert_eq!(scenario.locations.len(), 3);
        assert_eq!(
            scenario.placed_locations().map(|(pos, _)| pos).collect::<Vec<_>>(),
            vec![(1, 2)]
        );

        assert_eq!(reader().read(bytes.as_slice()).unwrap(), scenario);
    }

    #[test]
    fn test_stream_location_table_out_of_range() {
        let payload = StreamFile::new(2, 2).payload();
        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::fast());
        encoder.write_all(&payload[..payload.len() - 1]).unwrap();
        let bytes = encoder.finish().unwrap();

        let err = reader().from_bytes(&bytes).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::LocationTable));
        let table_at = crate::fixtures::small_stream_layout().locations_offset as u64;
        assert!(matches!(err, Error::RegionTooShort { offset, .. } if offset == table_at));
    }

    #[test]
    fn test_corrupt_stream() {
        let mut bytes = StreamFile::new(2, 2).build();
        bytes.truncate(bytes.len() / 2);
        let err = reader().from_bytes(&bytes).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Decompression);
        assert_eq!(err.stage(), Some(Stage::Stream));
    }

    #[test]
    fn test_open_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&kursk().build_uncompressed()).unwrap();

        let scenario = reader().open(file.path()).unwrap();
        assert_eq!(scenario.units.len(), 4);

        let err = reader().open(file.path().with_extension("missing")).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Io);
    }
}
