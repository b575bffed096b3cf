//! Glyph Identifiers
//!
//! Although these are stored as u16s in `loca`, `maxp` and composite glyph
//! records, the `cmap` format 12 subtable stores 32-bit glyph ids. We use a
//! 32-bit representation everywhere and narrow at the point of use.

/// A glyph identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphId(u32);

impl GlyphId {
    /// The identifier reserved for unknown glyphs
    pub const NOTDEF: GlyphId = GlyphId(0);

    /// Construct a new `GlyphId`.
    pub const fn new(raw: u32) -> Self {
        GlyphId(raw)
    }

    /// The identifier as a u32.
    pub const fn to_u32(self) -> u32 {
        self.0
    }
}

impl From<u16> for GlyphId {
    fn from(value: u16) -> Self {
        Self(value as u32)
    }
}

impl From<u32> for GlyphId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for GlyphId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GID_{}", self.0)
    }
}

impl crate::raw::Scalar for GlyphId {
    type Raw = [u8; 2];

    fn to_raw(self) -> [u8; 2] {
        (self.0 as u16).to_be_bytes()
    }

    fn from_raw(raw: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(raw) as u32)
    }
}
