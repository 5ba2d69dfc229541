//! Decoder for TOAW (The Operational Art of War) scenario files.
//!
//! Two physical layouts exist:
//!
//! - **Segmented** (TOAW I to III): a fixed header followed by a
//!   version-dependent number of length-prefixed blocks, each compressed with
//!   the PKWare DCL scheme, then a small uncompressed trailer holding the
//!   grid size.
//! - **Stream** (TOAW IV): the whole file is gzip compressed and the
//!   decompressed payload has every region at a fixed offset.
//!
//! [`LayoutKind::detect`] picks the layout from the first three bytes and
//! [`ScenarioReader`] decodes either into a [`Scenario`].
//!
//! # Example
//!
//! ```no_run
//! use toaw_scenario::{Feature, Scenario};
//!
//! let scenario = Scenario::open("Bulge.sce")?;
//! println!("{} v{:#x}", scenario.header.title(), scenario.version);
//!
//! let water = scenario
//!     .tiles
//!     .iter()
//!     .filter(|(_, _, tile)| tile.has(Feature::DeepWater))
//!     .count();
//! println!("{water} deep water tiles");
//!
//! for ((x, y), unit) in scenario.placed_units() {
//!     println!("{} at {x},{y} (team {})", unit.name(), unit.team());
//! }
//! # Ok::<(), toaw_scenario::Error>(())
//! ```

mod decompress;
mod error;
mod grid;
mod scenario;
mod segmented;
mod stream;
mod tables;

pub mod layout;
pub mod records;

#[cfg(feature = "json")]
pub mod json;

#[cfg(test)]
mod fixtures;

pub use decompress::BlockDecompressor;
pub use error::{BoxError, Error, ErrorCategory, Result, Stage};
pub use grid::TileGrid;
pub use layout::{LayoutKind, StreamLayout};
pub use records::{
    Directions, Feature, Header, Location, Route, Team, TileRecord, Unit, OFF_MAP, TEAM_COUNT,
};
pub use scenario::{RawBlock, Scenario, ScenarioReader};
