//! fixed-point numerical types

/// 16-bit signed fixed point number with 14 bits of fraction.
///
/// This is the representation used for the scale and skew entries of
/// composite glyph transforms: the raw value divided by 16384.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct F2Dot14(i16);

impl F2Dot14 {
    /// Zero value.
    pub const ZERO: Self = Self(0);

    /// One value.
    pub const ONE: Self = Self(Self::ONE_BITS);

    /// Minimum value.
    pub const MIN: Self = Self(i16::MIN);

    /// Maximum value.
    pub const MAX: Self = Self(i16::MAX);

    const ONE_BITS: i16 = 1 << 14;

    /// Creates a new fixed point value from the underlying bit representation.
    pub const fn from_bits(bits: i16) -> Self {
        Self(bits)
    }

    /// Returns the underlying bit representation of the value.
    pub const fn to_bits(self) -> i16 {
        self.0
    }

    /// Creates a fixed point value from an f32.
    ///
    /// This operation is lossy; the float will be rounded to the nearest
    /// representable value.
    pub fn from_f32(x: f32) -> Self {
        Self((x * Self::ONE_BITS as f32).round() as i16)
    }

    /// Returns the value as an f32.
    ///
    /// This operation is lossless: all representable values can be
    /// round-tripped.
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / Self::ONE_BITS as f32
    }
}

impl crate::raw::Scalar for F2Dot14 {
    type Raw = [u8; 2];

    fn to_raw(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    fn from_raw(raw: [u8; 2]) -> Self {
        Self(i16::from_be_bytes(raw))
    }
}

//hack: we can losslessly go to float, so use those fmt impls
impl std::fmt::Display for F2Dot14 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.to_f32().fmt(f)
    }
}

impl std::fmt::Debug for F2Dot14 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.to_f32().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    #![allow(overflowing_literals)] // we want to specify byte values directly
    use super::*;
    use crate::Scalar;

    #[test]
    fn f2dot14_floats() {
        // Examples from https://docs.microsoft.com/en-us/typography/opentype/spec/otff#data-types
        assert_eq!(F2Dot14(0x7fff), F2Dot14::from_f32(1.999939));
        assert_eq!(F2Dot14(0x7000), F2Dot14::from_f32(1.75));
        assert_eq!(F2Dot14(0x0001), F2Dot14::from_f32(0.0000610356));
        assert_eq!(F2Dot14(0x0000), F2Dot14::from_f32(0.0));
        assert_eq!(F2Dot14(0xffff), F2Dot14::from_f32(-0.000061));
        assert_eq!(F2Dot14(0x8000), F2Dot14::from_f32(-2.0));
    }

    #[test]
    fn roundtrip_f2dot14() {
        for i in i16::MIN..=i16::MAX {
            let val = F2Dot14(i);
            assert_eq!(val, F2Dot14::from_f32(val.to_f32()));
        }
    }

    #[test]
    fn denominator_is_16384() {
        assert_eq!(F2Dot14::ONE.to_bits(), 16384);
        assert_eq!(F2Dot14::from_bits(8192).to_f32(), 0.5);
        assert_eq!(F2Dot14::read(&[0xC0, 0x00]).unwrap().to_f32(), -1.0);
    }
}
