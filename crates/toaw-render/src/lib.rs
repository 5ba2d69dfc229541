//! Hex map rendering for decoded TOAW scenarios.
//!
//! Draws the terrain grid, rivers and roads, unit markers coloured by team
//! and location names onto an RGBA image. Names need a [`LabelFont`];
//! without one each location gets a marker instead:
//!
//! ```no_run
//! use toaw_render::{render_to_file, RenderOptions};
//! use toaw_scenario::Scenario;
//!
//! let scenario = Scenario::open("Kursk.sce")?;
//! render_to_file(&scenario, &RenderOptions::default(), "kursk.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod draw;
mod error;
mod label;
mod raster;

pub mod hex;
pub mod palette;
pub mod terrain;

pub use draw::{render, render_to_file, RenderOptions, MAX_PIXELS};
pub use error::{Error, Result};
pub use hex::HexLayout;
pub use label::{LabelFont, LABEL_SIZE};
pub use palette::GroupColor;
pub use terrain::Terrain;
