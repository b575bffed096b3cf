//! a trait for things that can serve font tables

use types::Tag;

use crate::{tables, FontData, FontRead, FontReadWithArgs, ReadError};

/// An interface for accessing tables from a font (or font-like object)
pub trait TableProvider<'a> {
    fn data_for_tag(&self, tag: Tag) -> Option<FontData<'a>>;

    fn expect_data_for_tag(&self, tag: Tag) -> Result<FontData<'a>, ReadError> {
        self.data_for_tag(tag).ok_or(ReadError::TableIsMissing(tag))
    }

    fn head(&self) -> Result<tables::head::Head, ReadError> {
        self.expect_data_for_tag(tables::head::TAG)
            .and_then(FontRead::read)
    }

    fn maxp(&self) -> Result<tables::maxp::Maxp, ReadError> {
        self.expect_data_for_tag(tables::maxp::TAG)
            .and_then(FontRead::read)
    }

    fn hhea(&self) -> Result<tables::hhea::Hhea, ReadError> {
        self.expect_data_for_tag(tables::hhea::TAG)
            .and_then(FontRead::read)
    }

    fn hmtx(&self) -> Result<tables::hmtx::Hmtx<'a>, ReadError> {
        let number_of_h_metrics = self.hhea()?.number_of_h_metrics();
        self.expect_data_for_tag(tables::hmtx::TAG)
            .and_then(|data| FontReadWithArgs::read_with_args(data, &number_of_h_metrics))
    }

    /// is_long can be optionally provided, if known, otherwise we look it up in head.
    fn loca(&self, is_long: impl Into<Option<bool>>) -> Result<tables::loca::Loca<'a>, ReadError> {
        let is_long = match is_long.into() {
            Some(val) => val,
            None => self.head()?.index_to_loc_format() == 1,
        };
        self.expect_data_for_tag(tables::loca::TAG)
            .and_then(|data| FontReadWithArgs::read_with_args(data, &is_long))
    }

    fn glyf(&self) -> Result<tables::glyf::Glyf<'a>, ReadError> {
        self.expect_data_for_tag(tables::glyf::TAG)
            .and_then(FontRead::read)
    }

    fn cmap(&self) -> Result<tables::cmap::Cmap<'a>, ReadError> {
        self.expect_data_for_tag(tables::cmap::TAG)
            .and_then(FontRead::read)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    /// A provider that serves `head` and nothing else, like a font that has
    /// been stripped down to its header.
    struct HeadOnly(Vec<u8>);

    impl<'a> TableProvider<'a> for &'a HeadOnly {
        fn data_for_tag(&self, tag: Tag) -> Option<FontData<'a>> {
            let this: &'a HeadOnly = *self;
            (tag == tables::head::TAG).then(|| FontData::new(&this.0))
        }
    }

    #[test]
    fn loca_format_comes_from_head() {
        let head = ttf_test_data::tables::Head {
            index_to_loc_format: 1,
            ..Default::default()
        };
        let provider = HeadOnly(head.to_bytes());
        let provider = &provider;
        assert_eq!(provider.head().unwrap().index_to_loc_format(), 1);
        assert!(matches!(
            provider.loca(None),
            Err(ReadError::TableIsMissing(tag)) if tag == tables::loca::TAG
        ));
    }

    #[test]
    fn hmtx_needs_hhea() {
        let provider = HeadOnly(Vec::new());
        let provider = &provider;
        assert!(matches!(
            provider.hmtx(),
            Err(ReadError::TableIsMissing(tag)) if tag == tables::hhea::TAG
        ));
    }
}
