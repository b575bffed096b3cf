//! The [loca (Index to Location)][loca] table
//!
//! [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca

use types::{GlyphId, Tag};

use crate::{
    array::ScalarArray,
    tables::glyf::{Glyf, Glyph},
    FontData, FontRead, FontReadWithArgs, ReadArgs, ReadError,
};

/// 'loca'
pub const TAG: Tag = Tag::new(b"loca");

/// The [loca] table.
///
/// The table length is not trusted, so the array covers everything from the
/// start of the table to the end of the font.
///
/// [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca
#[derive(Clone, Copy)]
pub enum Loca<'a> {
    /// Offsets divided by two.
    Short(ScalarArray<'a, u16>),
    Long(ScalarArray<'a, u32>),
}

impl ReadArgs for Loca<'_> {
    type Args = bool;
}

impl<'a> FontReadWithArgs<'a> for Loca<'a> {
    fn read_with_args(data: FontData<'a>, args: &Self::Args) -> Result<Self, ReadError> {
        let is_long = *args;
        if is_long {
            data.read_array(0, data.len() / 4).map(Loca::Long)
        } else {
            data.read_array(0, data.len() / 2).map(Loca::Short)
        }
    }
}

impl<'a> Loca<'a> {
    /// The number of offsets available.
    pub fn len(&self) -> usize {
        match self {
            Loca::Short(data) => data.len(),
            Loca::Long(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this table stores 32-bit offsets.
    pub fn is_long(&self) -> bool {
        matches!(self, Loca::Long(_))
    }

    /// Attempt to return the offset for a given glyph id, in bytes.
    pub fn get_raw(&self, idx: usize) -> Option<u32> {
        match self {
            Loca::Short(data) => data.get(idx).map(|x| x as u32 * 2),
            Loca::Long(data) => data.get(idx),
        }
    }

    /// The glyph record for `gid`, or `None` if the glyph has no outline.
    ///
    /// A glyph has no outline when its offset equals the next one.
    pub fn get_glyf(&self, gid: GlyphId, glyf: &Glyf<'a>) -> Result<Option<Glyph<'a>>, ReadError> {
        let idx = gid.to_u32() as usize;
        let start = self.get_raw(idx).ok_or(ReadError::OutOfBounds)?;
        let end = self
            .get_raw(idx.checked_add(1).ok_or(ReadError::OutOfBounds)?)
            .ok_or(ReadError::OutOfBounds)?;
        if start == end {
            return Ok(None);
        }
        let data = glyf
            .offset_data()
            .slice(start as usize..end as usize)
            .ok_or(ReadError::OutOfBounds)?;
        Glyph::read(data).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use ttf_test_data::tables::{glyf_and_loca, SimpleGlyph};

    use super::*;

    fn glyphs() -> Vec<Vec<u8>> {
        let square = SimpleGlyph::new()
            .contour(&[(0, 0, true), (10, 0, true), (10, 10, true)])
            .to_bytes();
        vec![square.clone(), Vec::new(), square]
    }

    #[test]
    fn short_and_long_agree() {
        for is_long in [false, true] {
            let (glyf, loca) = glyf_and_loca(&glyphs(), is_long);
            let loca = Loca::read_with_args(FontData::new(&loca), &is_long).unwrap();
            let glyf = Glyf::read(FontData::new(&glyf)).unwrap();
            assert_eq!(loca.is_long(), is_long);
            assert_eq!(loca.len(), 4);
            assert!(loca.get_glyf(GlyphId::new(0), &glyf).unwrap().is_some());
            assert!(loca.get_glyf(GlyphId::new(1), &glyf).unwrap().is_none());
            assert!(loca.get_glyf(GlyphId::new(2), &glyf).unwrap().is_some());
            assert!(matches!(
                loca.get_glyf(GlyphId::new(3), &glyf),
                Err(ReadError::OutOfBounds)
            ));
        }
    }

    #[test]
    fn offsets_past_glyf_are_out_of_bounds() {
        let (glyf, _) = glyf_and_loca(&glyphs(), false);
        let loca = ttf_test_data::be_buffer! { 0u16, 0x7FFFu16 };
        let loca = Loca::read_with_args(FontData::new(&loca), &false).unwrap();
        let glyf = Glyf::read(FontData::new(&glyf)).unwrap();
        assert!(matches!(
            loca.get_glyf(GlyphId::new(0), &glyf),
            Err(ReadError::OutOfBounds)
        ));
    }
}
