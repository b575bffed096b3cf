//! Reading TrueType tables
//!
//! This crate provides memory safe zero-allocation parsing of the parts of a
//! font file needed to extract glyph outlines. It is unopinionated, and
//! attempts to provide raw access to the underlying font data as it is
//! described in the [OpenType specification][spec].
//!
//! In addition to raw data access, this crate provides reference
//! implementations of algorithms for interpreting that data, where such an
//! implementation is required for the data to be useful. For instance, we
//! provide functions for [mapping codepoints to glyph identifiers][cmap-impl]
//! and for [decoding the points of a simple glyph][points].
//!
//! For higher level access to outlines and metrics, see `ttf-outline`.
//!
//! # Example
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! use ttf_read::{FontRef, TableProvider};
//! let font_bytes = std::fs::read(path_to_my_font_file).unwrap();
//! let font = FontRef::new(&font_bytes).expect("failed to read font data");
//! let head = font.head().expect("missing 'head' table");
//! let maxp = font.maxp().expect("missing 'maxp' table");
//!
//! println!("{} units per em, {} glyphs", head.units_per_em(), maxp.num_glyphs());
//! ```
//!
//! [spec]: https://learn.microsoft.com/en-us/typography/opentype/spec/
//! [cmap-impl]: tables::cmap::CmapSubtable::map_codepoint
//! [points]: tables::glyf::SimpleGlyph::read_points

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod array;
mod font_data;
mod read;
mod table_directory;
mod table_provider;
pub mod tables;

pub use font_data::FontData;
pub use read::{FontRead, FontReadWithArgs, ReadArgs, ReadError};
pub use table_directory::{TableDirectory, TableRecord};
pub use table_provider::TableProvider;

/// Public re-export of the ttf-types crate.
pub extern crate ttf_types as types;

use types::Tag;

/// The 'true' sfnt version used by some Apple fonts.
const APPLE_TRUE_TYPE: u32 = u32::from_be_bytes(*b"true");

/// Reference to an in-memory font.
///
/// This is a simple implementation of the [`TableProvider`] trait backed
/// by a borrowed slice containing font data.
#[derive(Clone)]
pub struct FontRef<'a> {
    data: FontData<'a>,
    pub table_directory: TableDirectory<'a>,
}

impl<'a> FontRef<'a> {
    /// Creates a new reference to an in-memory font backed by the given data.
    ///
    /// The data must begin with a [table directory] to be considered valid.
    /// The sfnt version is not checked.
    ///
    /// [table directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        let data = FontData::new(data);
        let table_directory = TableDirectory::read(data)?;
        let version = table_directory.sfnt_version();
        if version != types::TT_SFNT_VERSION && version != APPLE_TRUE_TYPE {
            log::debug!("unexpected sfnt version {version:#010x}, reading anyway");
        }
        Ok(FontRef {
            data,
            table_directory,
        })
    }

    /// Returns the underlying font data.
    pub fn data(&self) -> FontData<'a> {
        self.data
    }

    /// Returns the associated table directory.
    pub fn table_directory(&self) -> &TableDirectory<'a> {
        &self.table_directory
    }

    /// Returns the data for the table with the specified tag, if present.
    ///
    /// If a tag appears more than once, the last record wins. A record with a
    /// zero offset is treated as absent.
    ///
    /// Table lengths are not trusted: the returned data extends from the
    /// start of the table to the end of the font. An offset past the end of
    /// the font yields empty data, so that every read from it fails with
    /// [`ReadError::OutOfBounds`].
    pub fn table_data(&self, tag: Tag) -> Option<FontData<'a>> {
        let record = self.table_directory.find(tag)?;
        if record.offset == 0 {
            return None;
        }
        Some(
            self.data
                .split_off(record.offset as usize)
                .unwrap_or_default(),
        )
    }
}

impl<'a> TableProvider<'a> for FontRef<'a> {
    fn data_for_tag(&self, tag: Tag) -> Option<FontData<'a>> {
        self.table_data(tag)
    }
}

#[cfg(test)]
mod tests {
    use ttf_test_data::{be_buffer, FontBuilder};

    use super::*;

    #[test]
    fn table_data_spans_to_end_of_font() {
        let bytes = FontBuilder::new()
            .add_raw(Tag::new(b"aaaa"), vec![1, 2])
            .add_raw(Tag::new(b"bbbb"), vec![3, 4, 5, 6])
            .build();
        let font = FontRef::new(&bytes).unwrap();
        let a = font.table_data(Tag::new(b"aaaa")).unwrap();
        // 2 bytes of data, 2 bytes of padding, then the next table
        assert_eq!(a.as_bytes(), &[1, 2, 0, 0, 3, 4, 5, 6]);
        assert!(font.table_data(Tag::new(b"cccc")).is_none());
    }

    #[test]
    fn last_duplicate_wins_and_zero_offset_is_absent() {
        let bytes = be_buffer! {
            0x00010000u32, 3u16, 0u16, 0u16, 0u16,
            Tag::new(b"dupe"), 0u32, 60u32, 2u32,
            Tag::new(b"dupe"), 0u32, 62u32, 2u32,
            Tag::new(b"null"), 0u32, 0u32, 2u32,
            0xAAAAu16, 0xBBBBu16
        };
        let font = FontRef::new(&bytes).unwrap();
        let dupe = font.table_data(Tag::new(b"dupe")).unwrap();
        assert_eq!(dupe.read_at::<u16>(0).unwrap(), 0xBBBB);
        assert!(font.table_data(Tag::new(b"null")).is_none());
    }

    #[test]
    fn offset_past_end_reads_out_of_bounds() {
        let bytes = be_buffer! {
            0x00010000u32, 1u16, 0u16, 0u16, 0u16,
            Tag::new(b"head"), 0u32, 9000u32, 54u32
        };
        let font = FontRef::new(&bytes).unwrap();
        assert!(matches!(font.head(), Err(ReadError::OutOfBounds)));
        assert!(matches!(
            font.maxp(),
            Err(ReadError::TableIsMissing(tag)) if tag == Tag::new(b"maxp")
        ));
    }

    #[test]
    fn truncated_directory() {
        let bytes = be_buffer! { 0x00010000u32, 2u16, 0u16, 0u16, 0u16, Tag::new(b"head") };
        assert!(matches!(FontRef::new(&bytes), Err(ReadError::OutOfBounds)));
        assert!(matches!(FontRef::new(&[0, 1]), Err(ReadError::OutOfBounds)));
    }
}
