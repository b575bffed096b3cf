//! The [maxp](https://docs.microsoft.com/en-us/typography/opentype/spec/maxp) table

use types::Tag;

use crate::{FontData, FontRead, ReadError};

/// 'maxp'
pub const TAG: Tag = Tag::new(b"maxp");

/// The glyph count from the [maxp] table.
///
/// [maxp]: https://docs.microsoft.com/en-us/typography/opentype/spec/maxp
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Maxp {
    version: u32,
    num_glyphs: u16,
}

impl FontRead<'_> for Maxp {
    fn read(data: FontData) -> Result<Self, ReadError> {
        Ok(Maxp {
            version: data.read_at(0)?,
            num_glyphs: data.read_at(4)?,
        })
    }
}

impl Maxp {
    /// 0x00005000 or 0x00010000; only the glyph count is read.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// The number of glyphs in the font.
    pub fn num_glyphs(&self) -> u16 {
        self.num_glyphs
    }
}
