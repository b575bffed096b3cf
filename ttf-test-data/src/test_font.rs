//! A builder for complete, minimal TrueType fonts.

use ttf_types::{BoundingBox, Tag};

use crate::font_builder::FontBuilder;
use crate::tables::{self, Component, ComponentScale, Head, Hhea, SimpleGlyph};

/// Builds a font with the `head`, `maxp`, `hhea`, `hmtx`, `cmap`, `loca` and
/// `glyf` tables, deriving the redundant fields from the glyphs.
#[derive(Clone, Debug)]
pub struct TestFont {
    glyphs: Vec<(Vec<u8>, u16)>,
    mappings: Vec<(u16, u16)>,
    cmap: Option<Vec<u8>>,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
    line_gap: i16,
    long_loca: bool,
    loca_format: Option<u16>,
    number_of_h_metrics: Option<u16>,
    omit: Vec<Tag>,
}

impl Default for TestFont {
    fn default() -> Self {
        TestFont {
            glyphs: Vec::new(),
            mappings: Vec::new(),
            cmap: None,
            units_per_em: 1000,
            ascender: 800,
            descender: -200,
            line_gap: 0,
            long_loca: false,
            loca_format: None,
            number_of_h_metrics: None,
            omit: Vec::new(),
        }
    }
}

impl TestFont {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a glyph record (possibly empty) with its advance width.
    pub fn glyph(mut self, data: impl Into<Vec<u8>>, advance: u16) -> Self {
        self.glyphs.push((data.into(), advance));
        self
    }

    /// Map a BMP codepoint through a generated format 4 subtable.
    pub fn map(mut self, codepoint: u16, glyph: u16) -> Self {
        self.mappings.push((codepoint, glyph));
        self
    }

    /// Use these bytes as the `cmap` table instead of generating one.
    pub fn cmap_table(mut self, data: Vec<u8>) -> Self {
        self.cmap = Some(data);
        self
    }

    pub fn units_per_em(mut self, upem: u16) -> Self {
        self.units_per_em = upem;
        self
    }

    pub fn vertical_metrics(mut self, ascender: i16, descender: i16, line_gap: i16) -> Self {
        self.ascender = ascender;
        self.descender = descender;
        self.line_gap = line_gap;
        self
    }

    /// Write `loca` with 32-bit offsets.
    pub fn long_loca(mut self) -> Self {
        self.long_loca = true;
        self
    }

    /// Override the `indexToLocFormat` written to `head`.
    pub fn loca_format(mut self, format: u16) -> Self {
        self.loca_format = Some(format);
        self
    }

    /// Store only the first `count` advances in `hmtx`.
    pub fn number_of_h_metrics(mut self, count: u16) -> Self {
        self.number_of_h_metrics = Some(count);
        self
    }

    /// Leave a table out of the font.
    pub fn without(mut self, tag: Tag) -> Self {
        self.omit.push(tag);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let glyph_data: Vec<_> = self.glyphs.iter().map(|(data, _)| data.clone()).collect();
        let (glyf, loca) = tables::glyf_and_loca(&glyph_data, self.long_loca);

        let num_long = self
            .number_of_h_metrics
            .unwrap_or(self.glyphs.len() as u16) as usize;
        let lsbs: Vec<i16> = self.glyphs.iter().map(|(data, _)| x_min(data)).collect();
        let long_metrics: Vec<_> = self
            .glyphs
            .iter()
            .zip(&lsbs)
            .take(num_long)
            .map(|((_, advance), lsb)| (*advance, *lsb))
            .collect();
        let hmtx = tables::hmtx(&long_metrics, lsbs.get(num_long..).unwrap_or_default());

        let head = Head {
            units_per_em: self.units_per_em,
            bounds: font_bounds(&glyph_data),
            index_to_loc_format: self.loca_format.unwrap_or(self.long_loca as u16),
            glyph_data_format: 0,
        };
        let hhea = Hhea {
            ascender: self.ascender,
            descender: self.descender,
            line_gap: self.line_gap,
            advance_width_max: self.glyphs.iter().map(|(_, adv)| *adv).max().unwrap_or(0),
            number_of_h_metrics: num_long as u16,
        };
        let cmap = self.cmap.clone().unwrap_or_else(|| {
            let subtable = tables::cmap4_from_pairs(&self.mappings);
            tables::cmap(&[(3, 1, &subtable)])
        });

        let mut builder = FontBuilder::new();
        builder
            .add_raw(Tag::new(b"head"), head.to_bytes())
            .add_raw(Tag::new(b"maxp"), tables::maxp(self.glyphs.len() as u16))
            .add_raw(Tag::new(b"hhea"), hhea.to_bytes())
            .add_raw(Tag::new(b"hmtx"), hmtx)
            .add_raw(Tag::new(b"cmap"), cmap)
            .add_raw(Tag::new(b"loca"), loca)
            .add_raw(Tag::new(b"glyf"), glyf);
        for tag in &self.omit {
            builder.remove(*tag);
        }
        builder.build()
    }
}

fn x_min(glyph: &[u8]) -> i16 {
    match glyph.get(2..4) {
        Some(bytes) => i16::from_be_bytes([bytes[0], bytes[1]]),
        None => 0,
    }
}

fn font_bounds(glyphs: &[Vec<u8>]) -> BoundingBox<i16> {
    let read = |data: &[u8], pos: usize| i16::from_be_bytes([data[pos], data[pos + 1]]);
    glyphs
        .iter()
        .filter(|data| data.len() >= 10)
        .map(|data| BoundingBox {
            x_min: read(data, 2),
            y_min: read(data, 4),
            x_max: read(data, 6),
            y_max: read(data, 8),
        })
        .reduce(|a, b| BoundingBox {
            x_min: a.x_min.min(b.x_min),
            y_min: a.y_min.min(b.y_min),
            x_max: a.x_max.max(b.x_max),
            y_max: a.y_max.max(b.y_max),
        })
        .unwrap_or_default()
}

/// Glyph ids in [`sample_font`].
pub mod sample {
    pub const NOTDEF: u16 = 0;
    /// A square with one quadratic corner, mapped from `A`.
    pub const QUAD: u16 = 1;
    /// An empty glyph, mapped from space.
    pub const SPACE: u16 = 2;
    /// Two copies of [`QUAD`], one offset and one scaled, mapped from `B`.
    pub const COMPOSITE: u16 = 3;
}

/// A square with one curved corner:
/// `[(0,0) on, (100,0) on, (100,100) off, (0,100) on]`.
pub fn quad_glyph() -> SimpleGlyph {
    SimpleGlyph::new().contour(&[(0, 0, true), (100, 0, true), (100, 100, false), (0, 100, true)])
}

/// A small font exercising simple, empty and composite glyphs.
///
/// Units per em is 1000, ascender 800, descender -200, line gap 90.
pub fn sample_font() -> Vec<u8> {
    let notdef =
        SimpleGlyph::new().contour(&[(50, 0, true), (450, 0, true), (450, 700, true), (50, 700, true)]);
    let composite = tables::CompositeGlyph::new()
        .component(Component::offset(sample::QUAD, 200, 50))
        .component(Component::offset(sample::QUAD, 0, 0).with_scale(ComponentScale::Uniform(0.5)));
    TestFont::new()
        .vertical_metrics(800, -200, 90)
        .glyph(notdef.to_bytes(), 500)
        .glyph(quad_glyph().to_bytes(), 120)
        .glyph(Vec::new(), 250)
        .glyph(composite.to_bytes(), 300)
        .map(0x20, sample::SPACE)
        .map(0x41, sample::QUAD)
        .map(0x42, sample::COMPOSITE)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_font_has_seven_tables() {
        let font = sample_font();
        assert_eq!(u16::from_be_bytes([font[4], font[5]]), 7);
    }

    #[test]
    fn omitted_tables_are_dropped() {
        let font = TestFont::new()
            .glyph(quad_glyph().to_bytes(), 100)
            .without(Tag::new(b"glyf"))
            .build();
        assert_eq!(u16::from_be_bytes([font[4], font[5]]), 6);
        assert!(!font.windows(4).any(|w| w == b"glyf"));
    }
}
