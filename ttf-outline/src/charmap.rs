//! Mapping of characters (codepoints, not graphemes) to nominal glyph identifiers.
//!
//! This is a 1-to-1 mapping from Unicode scalar values to the "default"
//! glyph for each. It is enough to draw simple text in scripts that need no
//! shaping; anything more requires a shaping engine.

use ttf_read::{
    tables::cmap::{Cmap, CmapIter, CmapSubtable},
    types::GlyphId,
    ReadError, TableProvider,
};

/// Mapping of characters to nominal glyph identifiers.
///
/// The mappings are derived from the [cmap](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap)
/// table.
///
/// ## Selection strategy
///
/// The last encoding record for a Unicode encoding is selected: Windows
/// Unicode BMP (3, 1), Windows Unicode full repertoire (3, 10), or any
/// record on the Unicode platform (0). Subtable formats 0, 4, 6 and 12 are
/// supported. If no record matches, or the selected subtable has another
/// format, every character maps to nothing.
#[derive(Clone, Default)]
pub struct Charmap<'a> {
    subtable: Option<CmapSubtable<'a>>,
}

impl<'a> Charmap<'a> {
    /// Creates a new character map from the given font.
    ///
    /// A missing or unreadable `cmap` table produces an empty map.
    pub fn new(font: &impl TableProvider<'a>) -> Self {
        match font.cmap() {
            Ok(cmap) => Self::from_cmap(&cmap),
            Err(e) => {
                log::warn!("cmap unavailable ({e}), all characters map to glyph 0");
                Self::default()
            }
        }
    }

    /// Selects a subtable from an already parsed `cmap` table.
    pub fn from_cmap(cmap: &Cmap<'a>) -> Self {
        let Some(record) = cmap
            .encoding_records()
            .filter(|record| record.is_unicode())
            .last()
        else {
            log::debug!("cmap has no Unicode encoding record");
            return Self::default();
        };
        match cmap.subtable(&record) {
            Ok(subtable) => {
                log::debug!(
                    "selected cmap format {} subtable for platform {} encoding {}",
                    subtable.format(),
                    record.platform_id,
                    record.encoding_id
                );
                Self {
                    subtable: Some(subtable),
                }
            }
            Err(ReadError::InvalidFormat(format)) => {
                log::debug!("cmap subtable format {format} is not supported");
                Self::default()
            }
            Err(e) => {
                log::warn!("failed to read the selected cmap subtable: {e}");
                Self::default()
            }
        }
    }

    /// Returns true if a supported Unicode character mapping is available.
    pub fn has_map(&self) -> bool {
        self.subtable.is_some()
    }

    /// The format of the selected subtable.
    pub fn format(&self) -> Option<u16> {
        self.subtable.as_ref().map(CmapSubtable::format)
    }

    /// Offset of the selected subtable from the start of the font data.
    pub fn index_map_offset(&self) -> Option<u32> {
        self.subtable
            .as_ref()
            .map(|subtable| subtable.offset_data().total_pos())
    }

    /// Maps a character to a nominal glyph identifier.
    ///
    /// Returns `None` if a mapping does not exist or leads to glyph 0.
    pub fn map(&self, ch: impl Into<u32>) -> Option<GlyphId> {
        self.subtable
            .as_ref()?
            .map_codepoint(ch.into())
            .filter(|gid| *gid != GlyphId::NOTDEF)
    }

    /// Returns an iterator over all mappings of codepoint to nominal glyph
    /// identifier, in increasing codepoint order.
    pub fn mappings(&self) -> Mappings<'a> {
        Mappings(self.subtable.as_ref().map(CmapSubtable::iter))
    }
}

/// Iterator over all mappings of character to nominal glyph identifier
/// in a character map.
///
/// This is created with the [`Charmap::mappings`] method.
#[derive(Clone)]
pub struct Mappings<'a>(Option<CmapIter<'a>>);

impl Iterator for Mappings<'_> {
    type Item = (u32, GlyphId);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.as_mut()?.next()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ttf_read::{types::Tag, FontRef};
    use ttf_test_data::{
        tables::{cmap, cmap0, cmap12, cmap2, cmap4_from_pairs, cmap6},
        TestFont,
    };

    use super::*;

    fn font_with_cmap(cmap: Vec<u8>) -> Vec<u8> {
        TestFont::new()
            .glyph(Vec::new(), 0)
            .cmap_table(cmap)
            .build()
    }

    fn charmap_for(font_data: &[u8]) -> Charmap<'_> {
        Charmap::new(&FontRef::new(font_data).unwrap())
    }

    #[test]
    fn selects_last_unicode_record() {
        let symbol = cmap6(0x41, &[1]);
        let bmp = cmap6(0x41, &[2]);
        let full = cmap6(0x41, &[3]);
        let mac = cmap6(0x41, &[4]);
        let data = font_with_cmap(cmap(&[
            (3, 0, &symbol),
            (3, 1, &bmp),
            (0, 4, &full),
            (1, 0, &mac),
        ]));
        let charmap = charmap_for(&data);
        assert_eq!(charmap.map('A'), Some(GlyphId::new(3)));
        let data = font_with_cmap(cmap(&[(0, 3, &full), (3, 10, &bmp)]));
        assert_eq!(charmap_for(&data).map('A'), Some(GlyphId::new(2)));
    }

    #[test]
    fn index_map_offset_is_absolute() {
        let data = TestFont::new().glyph(Vec::new(), 0).map(0x41, 0).build();
        let font = FontRef::new(&data).unwrap();
        let cmap_offset = font.table_directory().find(Tag::new(b"cmap")).unwrap().offset;
        let charmap = Charmap::new(&font);
        assert_eq!(charmap.format(), Some(4));
        // one encoding record after the 4 byte header
        assert_eq!(charmap.index_map_offset(), Some(cmap_offset + 12));
    }

    #[test]
    fn no_unicode_record() {
        let mac = cmap0(&[(0x41, 1)]);
        let data = font_with_cmap(cmap(&[(1, 0, &mac)]));
        let charmap = charmap_for(&data);
        assert!(!charmap.has_map());
        assert_eq!(charmap.map('A'), None);
        assert_eq!(charmap.mappings().count(), 0);
    }

    #[test]
    fn missing_cmap() {
        let _ = env_logger::builder().is_test(true).try_init();
        let data = TestFont::new()
            .glyph(Vec::new(), 0)
            .without(Tag::new(b"cmap"))
            .build();
        let charmap = charmap_for(&data);
        assert!(!charmap.has_map());
        assert_eq!(charmap.map('A'), None);
    }

    #[test]
    fn format_2_maps_nothing() {
        let data = font_with_cmap(cmap(&[(3, 1, &cmap2())]));
        let charmap = charmap_for(&data);
        assert!(!charmap.has_map());
        assert_eq!(charmap.map(0x41u32), None);
    }

    #[test]
    fn glyph_zero_is_no_mapping() {
        let data = font_with_cmap(cmap(&[(3, 1, &cmap0(&[(0x41, 5)]))]));
        let charmap = charmap_for(&data);
        assert_eq!(charmap.format(), Some(0));
        assert_eq!(charmap.map('A'), Some(GlyphId::new(5)));
        assert_eq!(charmap.map('B'), None);
    }

    #[test]
    fn mappings_in_order() {
        let subtable = cmap4_from_pairs(&[(0x43, 7), (0x20, 3), (0x41, 5)]);
        let data = font_with_cmap(cmap(&[(3, 1, &subtable)]));
        let mappings: Vec<_> = charmap_for(&data)
            .mappings()
            .map(|(cp, gid)| (cp, gid.to_u32()))
            .collect();
        assert_eq!(mappings, vec![(0x20, 3), (0x41, 5), (0x43, 7)]);
    }

    #[test]
    fn format_12_beyond_bmp() {
        let subtable = cmap12(&[(0x1F600, 0x1F601, 9)]);
        let data = font_with_cmap(cmap(&[(3, 10, &subtable)]));
        let charmap = charmap_for(&data);
        assert_eq!(charmap.map('😁'), Some(GlyphId::new(10)));
        assert_eq!(charmap.map('😀'), Some(GlyphId::new(9)));
        assert_eq!(charmap.map('A'), None);
    }
}
