//! Flat-topped hex grid geometry.
//!
//! Columns are offset: odd columns sit half a hex higher than even ones.

/// Default hex radius in pixels.
pub const DEFAULT_RADIUS: f64 = 10.0;

/// cos(30°), the ratio of a hex's inner radius to its outer radius.
const COS_30: f64 = 0.866_025_403_784_438_6;

/// Pixel placement of grid cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexLayout {
    /// Centre to vertex distance.
    pub radius: f64,
}

impl Default for HexLayout {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS)
    }
}

impl HexLayout {
    pub const fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Pixel centre of the hex at `row`, `col`.
    pub fn center(&self, row: usize, col: usize) -> (f64, f64) {
        let r = self.radius;
        let x = r + col as f64 * r * 1.5;
        let mut y = r * 1.5 + row as f64 * 2.0 * r * COS_30;
        if col % 2 == 1 {
            y -= r * COS_30;
        }
        (x, y)
    }

    /// Canvas size for a `width` x `height` grid: the centre one past the
    /// last row and column, truncated to whole pixels.
    pub fn canvas_size(&self, width: usize, height: usize) -> (f64, f64) {
        let (x, y) = self.center(height, width);
        (x.trunc(), y.trunc())
    }

    /// Midpoint of the hex edge crossed when leaving towards `direction`
    /// (0 = north, clockwise in steps of 60°).
    pub fn edge_point(&self, center: (f64, f64), direction: u32) -> (f64, f64) {
        let angle = std::f64::consts::FRAC_PI_2 - f64::from(direction) * std::f64::consts::FRAC_PI_3;
        (
            center.0 + self.radius * angle.cos(),
            center.1 - self.radius * angle.sin(),
        )
    }

    /// Whether `point` lies inside the hex centred at `center`.
    pub fn contains(&self, center: (f64, f64), point: (f64, f64)) -> bool {
        let dx = (point.0 - center.0).abs();
        let dy = (point.1 - center.1).abs();
        let sqrt3 = 2.0 * COS_30;
        dy <= self.radius * COS_30 && sqrt3 * dx + dy <= sqrt3 * self.radius
    }
}
