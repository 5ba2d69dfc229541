//! TOAW - scenario file decoding and map rendering for The Operational Art
//! of War.
//!
//! This crate provides a unified interface to the TOAW library crates.
//!
//! # Crates
//!
//! - [`toaw_common`] - Common utilities (binary reading, fixed-width text)
//! - [`toaw_blast`] - PKWare DCL block decompression
//! - [`toaw_scenario`] - Scenario decoding for every file generation, JSON
//!   documents
//! - [`toaw_render`] - Hex map rendering to PNG
//!
//! # Example
//!
//! ```no_run
//! use toaw::prelude::*;
//!
//! let scenario = Scenario::open("Kursk.sce")?;
//! println!("{} ({}x{})", scenario.header.title(), scenario.width(), scenario.height());
//!
//! for (team, units) in scenario.units_by_team() {
//!     println!("group {team}: {} units", units.len());
//! }
//!
//! render_to_file(&scenario, &RenderOptions::default(), "kursk.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use toaw_blast as blast;
pub use toaw_common as common;
pub use toaw_render as render;
pub use toaw_scenario as scenario;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use toaw_blast::Blast;
    pub use toaw_common::BinaryReader;
    pub use toaw_render::{
        render, render_to_file, HexLayout, LabelFont, RenderOptions, Terrain,
    };
    #[cfg(feature = "json")]
    pub use toaw_scenario::json::{export_json, import_json};
    pub use toaw_scenario::{
        BlockDecompressor, Feature, LayoutKind, Route, Scenario, ScenarioReader, TileRecord,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
