//! The [head](https://docs.microsoft.com/en-us/typography/opentype/spec/head) table

use types::{BoundingBox, Tag};

use crate::{FontData, FontRead, ReadError};

/// 'head'
pub const TAG: Tag = Tag::new(b"head");

/// The fields of the [head] table read by this crate.
///
/// [head]: https://docs.microsoft.com/en-us/typography/opentype/spec/head
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Head {
    magic_number: u32,
    units_per_em: u16,
    bounds: BoundingBox<i16>,
    index_to_loc_format: u16,
    glyph_data_format: u16,
}

impl FontRead<'_> for Head {
    fn read(data: FontData) -> Result<Self, ReadError> {
        Ok(Head {
            magic_number: data.read_at(12)?,
            units_per_em: data.read_at(18)?,
            bounds: BoundingBox {
                x_min: data.read_at(36)?,
                y_min: data.read_at(38)?,
                x_max: data.read_at(40)?,
                y_max: data.read_at(42)?,
            },
            index_to_loc_format: data.read_at(50)?,
            glyph_data_format: data.read_at(52)?,
        })
    }
}

impl Head {
    /// Set to 0x5F0F3CF5. Read but not validated.
    pub fn magic_number(&self) -> u32 {
        self.magic_number
    }

    /// Set to a value from 16 to 16384. Any value in this range is valid.
    /// In fonts that have TrueType outlines, a power of 2 is recommended
    /// as this allows performance optimization in some rasterizers.
    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// The bounding box for all glyph bounding boxes.
    pub fn bounds(&self) -> BoundingBox<i16> {
        self.bounds
    }

    /// 0 for short offsets (Offset16), 1 for long (Offset32).
    pub fn index_to_loc_format(&self) -> u16 {
        self.index_to_loc_format
    }

    /// 0 for current format.
    pub fn glyph_data_format(&self) -> u16 {
        self.glyph_data_format
    }
}

#[cfg(test)]
mod tests {
    use ttf_test_data::tables::Head as HeadBuilder;

    use super::*;

    #[test]
    fn read_fields() {
        let bytes = HeadBuilder {
            units_per_em: 2048,
            bounds: BoundingBox {
                x_min: -10,
                y_min: -300,
                x_max: 1200,
                y_max: 900,
            },
            index_to_loc_format: 1,
            glyph_data_format: 0,
        }
        .to_bytes();
        let head = Head::read(FontData::new(&bytes)).unwrap();
        assert_eq!(head.magic_number(), HeadBuilder::MAGIC_NUMBER);
        assert_eq!(head.units_per_em(), 2048);
        assert_eq!(head.bounds().y_min, -300);
        assert_eq!(head.bounds().x_max, 1200);
        assert_eq!(head.index_to_loc_format(), 1);
        assert_eq!(head.glyph_data_format(), 0);
    }

    #[test]
    fn truncated() {
        let bytes = HeadBuilder::default().to_bytes();
        assert!(matches!(
            Head::read(FontData::new(&bytes[..53])),
            Err(ReadError::OutOfBounds)
        ));
    }
}
