//! Filling shapes on an RGBA canvas.
//!
//! A pixel is covered when its centre lies inside the shape.

use image::{Rgba, RgbaImage};

use crate::hex::HexLayout;
use crate::label::LabelFont;

pub(crate) struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn put(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x < self.image.width() && y < self.image.height() {
            self.image.put_pixel(x, y, color);
        }
    }

    /// Pixel index range whose centres fall in `[start, end)`.
    fn span(start: f64, end: f64) -> std::ops::Range<i64> {
        (start - 0.5).ceil() as i64..(end - 0.5).ceil() as i64
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba<u8>) {
        for py in Self::span(y, y + height) {
            for px in Self::span(x, x + width) {
                self.put(px, py, color);
            }
        }
    }

    pub fn fill_hex(&mut self, layout: &HexLayout, center: (f64, f64), color: Rgba<u8>) {
        let r = layout.radius;
        for py in Self::span(center.1 - r, center.1 + r + 1.0) {
            for px in Self::span(center.0 - r, center.0 + r + 1.0) {
                if layout.contains(center, (px as f64 + 0.5, py as f64 + 0.5)) {
                    self.put(px, py, color);
                }
            }
        }
    }

    /// Mix `color` over the pixel by `coverage` in `0.0..=1.0`.
    fn blend(&mut self, x: i64, y: i64, color: Rgba<u8>, coverage: f32) {
        let alpha = coverage.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let (Ok(ux), Ok(uy)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        let Some(&Rgba(under)) = self.image.get_pixel_checked(ux, uy) else {
            return;
        };

        let mix = |top: u8, bottom: u8| {
            (f32::from(top) * alpha + f32::from(bottom) * (1.0 - alpha)).round() as u8
        };
        let blended = Rgba([
            mix(color[0], under[0]),
            mix(color[1], under[1]),
            mix(color[2], under[2]),
            under[3].max((f32::from(color[3]) * alpha).round() as u8),
        ]);
        self.put(x, y, blended);
    }

    /// Draw `text` with its baseline starting at `origin`, anti-aliased.
    pub fn text(&mut self, font: &LabelFont, text: &str, origin: (f64, f64), color: Rgba<u8>) {
        for glyph in font.layout(text, origin) {
            let bounds = glyph.px_bounds();
            let (left, top) = (bounds.min.x.floor() as i64, bounds.min.y.floor() as i64);
            glyph.draw(|x, y, coverage| {
                self.blend(left + i64::from(x), top + i64::from(y), color, coverage);
            });
        }
    }

    /// One pixel wide line, sampled every half pixel.
    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba<u8>) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = (dx.abs().max(dy.abs()) * 2.0).ceil().max(1.0) as i64;
        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            let x = from.0 + dx * t;
            let y = from.1 + dy * t;
            self.put(x.floor() as i64, y.floor() as i64, color);
        }
    }
}
