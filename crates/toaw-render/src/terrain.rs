//! Terrain classification of tile flags.

use image::Rgba;
use toaw_scenario::{Feature, Route, TileRecord};

/// Fill colour of the urban marker.
pub const URBAN_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// The single terrain a tile is drawn as.
///
/// Tiles often carry several terrain flags; [`Terrain::classify`] resolves
/// them in a fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terrain {
    Empty,
    Impassable,
    DeepWater,
    ShallowWater,
    Forest,
    Mountains,
    Hills,
    Sand,
    FloodedMarsh,
    Marsh,
    Grass,
}

/// Classification order after the empty check. Grass is the fallback.
const PRECEDENCE: [(Feature, Terrain); 9] = [
    (Feature::Impassable, Terrain::Impassable),
    (Feature::DeepWater, Terrain::DeepWater),
    (Feature::ShallowWater, Terrain::ShallowWater),
    (Feature::Forest, Terrain::Forest),
    (Feature::Mountains, Terrain::Mountains),
    (Feature::Hills, Terrain::Hills),
    (Feature::Sand, Terrain::Sand),
    (Feature::FloodedMarsh, Terrain::FloodedMarsh),
    (Feature::Marsh, Terrain::Marsh),
];

impl Terrain {
    pub fn classify(tile: &TileRecord) -> Self {
        if tile.is_empty() {
            return Terrain::Empty;
        }
        PRECEDENCE
            .iter()
            .find(|(feature, _)| tile.has(*feature))
            .map_or(Terrain::Grass, |&(_, terrain)| terrain)
    }

    pub const fn color(self) -> Rgba<u8> {
        let [r, g, b] = match self {
            Terrain::Empty => [0, 0, 0],
            Terrain::Impassable => [67, 65, 68],
            Terrain::DeepWater => [21, 43, 116],
            Terrain::ShallowWater => [64, 93, 166],
            Terrain::Forest => [78, 116, 53],
            Terrain::Mountains => [169, 154, 133],
            Terrain::Hills => [149, 132, 58],
            Terrain::Sand => [189, 159, 86],
            Terrain::FloodedMarsh => [137, 172, 139],
            Terrain::Marsh => [122, 148, 71],
            Terrain::Grass => [146, 155, 59],
        };
        Rgba([r, g, b, 255])
    }
}

/// Whether routes on this tile are hidden by open water.
pub fn covers_routes(tile: &TileRecord) -> bool {
    tile.has(Feature::DeepWater) || tile.has(Feature::ShallowWater)
}

pub const fn route_color(route: Route) -> Rgba<u8> {
    match route {
        Route::River => Rgba([91, 130, 150, 255]),
        Route::MajorRiver => Rgba([57, 82, 148, 255]),
        Route::Road => Rgba([195, 167, 87, 255]),
        Route::Railroad => Rgba([102, 91, 72, 255]),
    }
}
