//! The [hmtx](https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx) table

use types::{GlyphId, Tag};

use crate::{FontData, FontReadWithArgs, ReadArgs, ReadError};

/// 'hmtx'
pub const TAG: Tag = Tag::new(b"hmtx");

const LONG_METRIC_LEN: usize = 4;

/// Horizontal metrics: `numberOfHMetrics` `(advanceWidth, lsb)` records
/// followed by bare left side bearings for the remaining glyphs.
///
/// Glyph ids are not checked against the glyph count; callers are expected
/// to do that.
#[derive(Clone, Copy)]
pub struct Hmtx<'a> {
    data: FontData<'a>,
    number_of_h_metrics: u16,
}

impl ReadArgs for Hmtx<'_> {
    type Args = u16;
}

impl<'a> FontReadWithArgs<'a> for Hmtx<'a> {
    fn read_with_args(data: FontData<'a>, args: &u16) -> Result<Self, ReadError> {
        if *args == 0 {
            return Err(ReadError::MalformedData("numberOfHMetrics is zero"));
        }
        Ok(Hmtx {
            data,
            number_of_h_metrics: *args,
        })
    }
}

impl<'a> Hmtx<'a> {
    /// Number of long metric records.
    pub fn number_of_h_metrics(&self) -> u16 {
        self.number_of_h_metrics
    }

    /// The advance width of the glyph.
    ///
    /// Glyphs past the long metrics share the advance of the last record.
    pub fn advance(&self, glyph_id: GlyphId) -> Result<u16, ReadError> {
        let last = self.number_of_h_metrics as u32 - 1;
        let idx = glyph_id.to_u32().min(last) as usize;
        self.data.read_at(idx * LONG_METRIC_LEN)
    }

    /// The left side bearing of the glyph.
    pub fn side_bearing(&self, glyph_id: GlyphId) -> Result<i16, ReadError> {
        let gid = glyph_id.to_u32() as usize;
        let num_long = self.number_of_h_metrics as usize;
        let pos = if gid < num_long {
            gid * LONG_METRIC_LEN + 2
        } else {
            num_long * LONG_METRIC_LEN + (gid - num_long) * 2
        };
        self.data.read_at(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hmtx_bytes() -> Vec<u8> {
        ttf_test_data::tables::hmtx(&[(500, 10), (600, -20)], &[30, 40])
    }

    #[test]
    fn advances_fall_back_to_last_record() {
        let bytes = hmtx_bytes();
        let hmtx = Hmtx::read_with_args(FontData::new(&bytes), &2).unwrap();
        assert_eq!(hmtx.advance(GlyphId::new(0)), Ok(500));
        assert_eq!(hmtx.advance(GlyphId::new(1)), Ok(600));
        assert_eq!(hmtx.advance(GlyphId::new(2)), Ok(600));
        assert_eq!(hmtx.advance(GlyphId::new(3)), Ok(600));
    }

    #[test]
    fn side_bearings() {
        let bytes = hmtx_bytes();
        let hmtx = Hmtx::read_with_args(FontData::new(&bytes), &2).unwrap();
        assert_eq!(hmtx.side_bearing(GlyphId::new(0)), Ok(10));
        assert_eq!(hmtx.side_bearing(GlyphId::new(1)), Ok(-20));
        assert_eq!(hmtx.side_bearing(GlyphId::new(2)), Ok(30));
        assert_eq!(hmtx.side_bearing(GlyphId::new(3)), Ok(40));
        assert_eq!(
            hmtx.side_bearing(GlyphId::new(4)),
            Err(ReadError::OutOfBounds)
        );
    }

    #[test]
    fn zero_long_metrics_is_malformed() {
        let bytes = hmtx_bytes();
        assert!(matches!(
            Hmtx::read_with_args(FontData::new(&bytes), &0),
            Err(ReadError::MalformedData(_))
        ));
    }
}
