//! Global font and per-glyph metrics.

use ttf_types::BoundingBox;

/// Metrics that apply to all glyphs in a font, in font units.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontMetrics {
    /// Number of font design units per em.
    pub units_per_em: u16,
    /// Distance from the baseline to the top of the alignment box.
    pub ascender: i16,
    /// Distance from the baseline to the bottom of the alignment box.
    pub descender: i16,
    /// Recommended additional spacing between lines.
    pub line_gap: i16,
    /// Union of all glyph bounding boxes, as recorded in `head`.
    pub bounds: BoundingBox<i16>,
    /// Number of glyphs in the font.
    pub glyph_count: u16,
}

impl FontMetrics {
    /// Factor converting font units to pixels for a font `size` in points
    /// rendered at `dpi` pixels per inch.
    pub fn scale(&self, size: f32, dpi: f32) -> f32 {
        size * dpi / (72.0 * self.units_per_em as f32)
    }
}

/// Metrics for a single glyph, in font units.
#[derive(Copy, Clone, PartialEq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphMetrics {
    /// Horizontal distance to the origin of the next glyph.
    pub advance_width: u16,
    /// Left side bearing, as stored in `hmtx`.
    pub left_side_bearing: i16,
    /// Extents of the outline, including off-curve points.
    pub bounds: BoundingBox<f32>,
}
