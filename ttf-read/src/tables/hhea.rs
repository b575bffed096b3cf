//! The [hhea](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea) table

use types::Tag;

use crate::{FontData, FontRead, ReadError};

/// 'hhea'
pub const TAG: Tag = Tag::new(b"hhea");

/// The horizontal header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hhea {
    ascender: i16,
    descender: i16,
    line_gap: i16,
    advance_width_max: u16,
    number_of_h_metrics: u16,
}

impl FontRead<'_> for Hhea {
    fn read(data: FontData) -> Result<Self, ReadError> {
        Ok(Hhea {
            ascender: data.read_at(4)?,
            descender: data.read_at(6)?,
            line_gap: data.read_at(8)?,
            advance_width_max: data.read_at(10)?,
            number_of_h_metrics: data.read_at(34)?,
        })
    }
}

impl Hhea {
    /// Typographic ascent.
    pub fn ascender(&self) -> i16 {
        self.ascender
    }

    /// Typographic descent; usually negative.
    pub fn descender(&self) -> i16 {
        self.descender
    }

    /// Typographic line gap.
    pub fn line_gap(&self) -> i16 {
        self.line_gap
    }

    /// Maximum advance width value in 'hmtx' table.
    pub fn advance_width_max(&self) -> u16 {
        self.advance_width_max
    }

    /// Number of long metrics in the 'hmtx' table.
    pub fn number_of_h_metrics(&self) -> u16 {
        self.number_of_h_metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_metrics() {
        let bytes = ttf_test_data::tables::Hhea {
            ascender: 1900,
            descender: -500,
            line_gap: 67,
            advance_width_max: 2400,
            number_of_h_metrics: 3,
        }
        .to_bytes();
        let hhea = Hhea::read(FontData::new(&bytes)).unwrap();
        assert_eq!(hhea.ascender(), 1900);
        assert_eq!(hhea.descender(), -500);
        assert_eq!(hhea.line_gap(), 67);
        assert_eq!(hhea.advance_width_max(), 2400);
        assert_eq!(hhea.number_of_h_metrics(), 3);
    }
}
