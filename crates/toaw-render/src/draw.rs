//! Rendering a scenario to an image.

use std::collections::BTreeSet;
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use toaw_scenario::{Feature, Route, Scenario};
use tracing::{debug, warn};

use crate::hex::{HexLayout, DEFAULT_RADIUS};
use crate::label::{label_origin, LabelFont};
use crate::palette::{self, GroupColor};
use crate::raster::Canvas;
use crate::terrain::{self, Terrain, URBAN_COLOR};
use crate::{Error, Result};

/// Largest canvas, in pixels, [`render`] will allocate.
pub const MAX_PIXELS: f64 = (1u64 << 28) as f64;

/// What to draw and at which scale.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Hex radius in pixels.
    pub radius: f64,
    /// Draw rivers, roads and railroads.
    pub routes: bool,
    pub units: bool,
    /// Draw each named location.
    pub locations: bool,
    /// Face for location names. Without one, locations get a marker.
    pub font: Option<LabelFont>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            routes: true,
            units: true,
            locations: true,
            font: None,
        }
    }
}

/// Draw the map as an RGBA image.
///
/// Layers are painted in order: terrain, routes, units, locations. Pixels
/// outside every hex stay transparent.
pub fn render(scenario: &Scenario, options: &RenderOptions) -> Result<RgbaImage> {
    let layout = HexLayout::new(options.radius);
    let (width, height) = layout.canvas_size(scenario.width(), scenario.height());
    if !(width >= 1.0 && height >= 1.0 && width * height <= MAX_PIXELS) {
        return Err(Error::InvalidCanvas { width, height });
    }
    debug!(
        tiles_x = scenario.width(),
        tiles_y = scenario.height(),
        width,
        height,
        "rendering map"
    );

    let mut canvas = Canvas::new(width as u32, height as u32);
    draw_tiles(&mut canvas, &layout, scenario);
    if options.routes {
        draw_routes(&mut canvas, &layout, scenario);
    }
    if options.units {
        draw_units(&mut canvas, &layout, scenario);
    }
    if options.locations {
        draw_locations(&mut canvas, &layout, scenario, options.font.as_ref());
    }
    Ok(canvas.into_image())
}

/// Render and save as PNG.
pub fn render_to_file(
    scenario: &Scenario,
    options: &RenderOptions,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let image = render(scenario, options)?;
    image.save_with_format(path, ImageFormat::Png)?;
    debug!(path = %path.display(), "saved map image");
    Ok(())
}

fn draw_tiles(canvas: &mut Canvas, layout: &HexLayout, scenario: &Scenario) {
    let r = layout.radius;
    for (x, y, tile) in scenario.tiles.iter() {
        let center = layout.center(y, x);
        canvas.fill_hex(layout, center, Terrain::classify(tile).color());

        if tile.has(Feature::Urban) {
            canvas.fill_rect(center.0 - r / 5.0, center.1 - r / 5.0, r / 2.0, r / 2.0, URBAN_COLOR);
        }
    }
}

fn draw_routes(canvas: &mut Canvas, layout: &HexLayout, scenario: &Scenario) {
    for (x, y, tile) in scenario.tiles.iter() {
        if terrain::covers_routes(tile) {
            continue;
        }
        let center = layout.center(y, x);
        for route in Route::ALL {
            let color = terrain::route_color(route);
            for direction in tile.route(route).iter() {
                if let Some(index) = direction.index() {
                    canvas.line(center, layout.edge_point(center, index), color);
                }
            }
        }
    }
}

fn draw_units(canvas: &mut Canvas, layout: &HexLayout, scenario: &Scenario) {
    let r = layout.radius;
    let mut unknown = BTreeSet::new();

    for ((x, y), unit) in scenario.placed_units() {
        let team = unit.team();
        let colors = palette::lookup(team).unwrap_or_else(|| {
            if unknown.insert(team) {
                warn!(team, "no colour for group, using fallback");
            }
            GroupColor::FALLBACK
        });

        let (cx, cy) = layout.center(y, x);
        let outer = r * 2.0 / 3.0;
        canvas.fill_rect(cx - outer, cy - outer, outer * 2.0, outer * 2.0, colors.outer);
        let inner = r / 3.0;
        canvas.fill_rect(cx - inner, cy - inner, inner * 2.0, inner * 2.0, colors.inner);
    }
}

fn draw_locations(
    canvas: &mut Canvas,
    layout: &HexLayout,
    scenario: &Scenario,
    font: Option<&LabelFont>,
) {
    let r = layout.radius;
    let size = r * 0.3;
    for ((x, y), location) in scenario.placed_locations() {
        let center = layout.center(y, x);
        match font {
            Some(font) => {
                let name = location.name();
                canvas.text(font, &name, label_origin(center, r, &name), URBAN_COLOR);
            }
            None => canvas.fill_rect(
                center.0 - size / 2.0,
                center.1 - r * 1.25 - size / 2.0,
                size,
                size,
                URBAN_COLOR,
            ),
        }
    }
}
