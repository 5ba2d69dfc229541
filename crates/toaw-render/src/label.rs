//! Location labels.

use std::fmt;
use std::path::Path;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};

use crate::Result;

/// Pixel height of label text.
pub const LABEL_SIZE: f32 = 13.0;

/// Horizontal space reserved per character when centring a label.
const CHAR_ADVANCE: f64 = 5.0;

/// A TrueType or OpenType face used to draw location names.
#[derive(Clone)]
pub struct LabelFont {
    font: FontArc,
    scale: PxScale,
}

impl LabelFont {
    /// Parse a font file held in memory.
    pub fn from_vec(data: Vec<u8>) -> Result<Self> {
        Ok(Self {
            font: FontArc::try_from_vec(data)?,
            scale: PxScale::from(LABEL_SIZE),
        })
    }

    /// Load a font file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_vec(std::fs::read(path)?)
    }

    /// Glyph outlines for `text` with the baseline starting at `origin`,
    /// kerned and advanced along the line.
    pub(crate) fn layout(&self, text: &str, origin: (f64, f64)) -> Vec<ab_glyph::OutlinedGlyph> {
        let scaled = self.font.as_scaled(self.scale);
        let mut caret = ab_glyph::point(origin.0 as f32, origin.1 as f32);
        let mut previous = None;
        let mut outlines = Vec::new();

        for ch in text.chars() {
            let mut glyph = scaled.scaled_glyph(ch);
            if let Some(previous) = previous {
                caret.x += scaled.kern(previous, glyph.id);
            }
            glyph.position = caret;
            caret.x += scaled.h_advance(glyph.id);
            previous = Some(glyph.id);

            if let Some(outline) = self.font.outline_glyph(glyph) {
                outlines.push(outline);
            }
        }
        outlines
    }
}

impl fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelFont")
            .field("size", &self.scale.y)
            .finish_non_exhaustive()
    }
}

/// Baseline origin of a label above the hex at `center`.
pub(crate) fn label_origin(center: (f64, f64), radius: f64, name: &str) -> (f64, f64) {
    let len = name.chars().count() as f64;
    (center.0 - CHAR_ADVANCE * len / 2.0, center.1 - radius * 1.25)
}
