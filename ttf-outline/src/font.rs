//! A loaded font with cached global state.

use ttf_read::{
    tables::{head::Head, hhea::Hhea, hmtx::Hmtx, maxp::Maxp},
    types::{BoundingBox, GlyphId},
    FontRef, ReadError, TableProvider,
};

use crate::{
    charmap::Charmap,
    metrics::{FontMetrics, GlyphMetrics},
    outline::{glyf::GlyfLoader, DrawError, DrawSettings, GlyphOutline},
};

/// A TrueType font, loaded from borrowed bytes.
///
/// Loading reads the `head`, `maxp` and `hhea` tables, which must be present,
/// and selects a character map. Other tables are read when they are needed,
/// so a font without `glyf`, `loca` or `hmtx` loads but reports
/// [`ReadError::TableIsMissing`] from the operations that use them.
#[derive(Clone)]
pub struct FontFile<'a> {
    font: FontRef<'a>,
    head: Head,
    maxp: Maxp,
    hhea: Hhea,
    charmap: Charmap<'a>,
    settings: DrawSettings,
}

impl<'a> FontFile<'a> {
    /// Loads a font from the given data.
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        Self::from_font_ref(FontRef::new(data)?)
    }

    /// Loads a font from an already parsed table directory.
    pub fn from_font_ref(font: FontRef<'a>) -> Result<Self, ReadError> {
        let head = font.head()?;
        let maxp = font.maxp()?;
        let hhea = font.hhea()?;
        let charmap = Charmap::new(&font);
        Ok(Self {
            font,
            head,
            maxp,
            hhea,
            charmap,
            settings: DrawSettings::default(),
        })
    }

    /// Replaces the settings used when drawing glyphs.
    pub fn with_settings(mut self, settings: DrawSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> DrawSettings {
        self.settings
    }

    /// The underlying table provider.
    pub fn font_ref(&self) -> &FontRef<'a> {
        &self.font
    }

    /// The selected character map.
    pub fn charmap(&self) -> &Charmap<'a> {
        &self.charmap
    }

    pub fn units_per_em(&self) -> u16 {
        self.head.units_per_em()
    }

    pub fn ascender(&self) -> i16 {
        self.hhea.ascender()
    }

    pub fn descender(&self) -> i16 {
        self.hhea.descender()
    }

    pub fn num_glyphs(&self) -> u16 {
        self.maxp.num_glyphs()
    }

    pub fn index_to_loc_format(&self) -> u16 {
        self.head.index_to_loc_format()
    }

    pub fn glyph_data_format(&self) -> u16 {
        self.head.glyph_data_format()
    }

    /// The font-wide bounding box from `head`.
    pub fn bounds(&self) -> BoundingBox<i16> {
        self.head.bounds()
    }

    /// Metrics that apply to every glyph.
    pub fn metrics(&self) -> FontMetrics {
        FontMetrics {
            units_per_em: self.units_per_em(),
            ascender: self.ascender(),
            descender: self.descender(),
            line_gap: self.hhea.line_gap(),
            bounds: self.bounds(),
            glyph_count: self.num_glyphs(),
        }
    }

    /// Maps a character to its nominal glyph, or [`GlyphId::NOTDEF`] if the
    /// font has none.
    pub fn glyph_index(&self, ch: impl Into<u32>) -> GlyphId {
        self.charmap.map(ch).unwrap_or(GlyphId::NOTDEF)
    }

    /// The advance width of a glyph, in font units.
    pub fn advance_width(&self, glyph_id: GlyphId) -> Result<u16, DrawError> {
        Ok(self.hmtx_for(glyph_id)?.advance(glyph_id)?)
    }

    /// The left side bearing of a glyph, in font units.
    pub fn left_side_bearing(&self, glyph_id: GlyphId) -> Result<i16, DrawError> {
        Ok(self.hmtx_for(glyph_id)?.side_bearing(glyph_id)?)
    }

    /// The extents of the glyph's outline, including off-curve points.
    ///
    /// Glyphs without an outline have an all-zero bounding box.
    pub fn bounding_box(&self, glyph_id: GlyphId) -> Result<BoundingBox<f32>, DrawError> {
        Ok(self.outline(glyph_id)?.bounding_box())
    }

    /// Advance, side bearing and bounding box of a glyph.
    pub fn glyph_metrics(&self, glyph_id: GlyphId) -> Result<GlyphMetrics, DrawError> {
        Ok(GlyphMetrics {
            advance_width: self.advance_width(glyph_id)?,
            left_side_bearing: self.left_side_bearing(glyph_id)?,
            bounds: self.bounding_box(glyph_id)?,
        })
    }

    /// Appends the outline of a glyph to `outline`.
    ///
    /// If drawing fails, `outline` is left as it was.
    pub fn draw(&self, glyph_id: GlyphId, outline: &mut GlyphOutline) -> Result<(), DrawError> {
        self.check_glyph_id(glyph_id)?;
        let loader = self.glyf_loader()?;
        let mark = outline.mark();
        let result = loader.load(glyph_id, outline);
        if result.is_err() {
            outline.truncate(mark);
        }
        result
    }

    /// Draws a glyph into a new outline.
    pub fn outline(&self, glyph_id: GlyphId) -> Result<GlyphOutline, DrawError> {
        let mut outline = GlyphOutline::new();
        self.draw(glyph_id, &mut outline)?;
        Ok(outline)
    }

    fn check_glyph_id(&self, glyph_id: GlyphId) -> Result<(), DrawError> {
        if glyph_id.to_u32() >= self.num_glyphs() as u32 {
            return Err(DrawError::IndexOutOfRange(glyph_id));
        }
        Ok(())
    }

    fn hmtx_for(&self, glyph_id: GlyphId) -> Result<Hmtx<'a>, DrawError> {
        self.check_glyph_id(glyph_id)?;
        Ok(self.font.hmtx()?)
    }

    fn glyf_loader(&self) -> Result<GlyfLoader<'a>, DrawError> {
        let is_long = match self.index_to_loc_format() {
            0 => false,
            1 => true,
            format => return Err(DrawError::UnsupportedLocaFormat(format)),
        };
        Ok(GlyfLoader::new(
            self.font.loca(is_long)?,
            self.font.glyf()?,
            self.num_glyphs(),
            self.settings,
        ))
    }
}
