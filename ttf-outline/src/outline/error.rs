//! Error types associated with outlines.

use std::fmt;

use ttf_read::types::GlyphId;

pub use ttf_read::ReadError;

/// Errors that may occur when drawing glyphs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawError {
    /// The glyph identifier is not less than the number of glyphs in the
    /// font.
    IndexOutOfRange(GlyphId),
    /// The `indexToLocFormat` field of the `head` table is neither 0 nor 1.
    UnsupportedLocaFormat(u16),
    /// The glyph record has a negative contour count other than -1.
    MalformedGlyph(GlyphId),
    /// Exceeded a recursion limit when loading a glyph.
    RecursionLimitExceeded(GlyphId),
    /// An anchor point had invalid indices.
    InvalidAnchorPoint(GlyphId, u16),
    /// Error occurred when reading font data.
    Read(ReadError),
}

impl From<ReadError> for DrawError {
    fn from(e: ReadError) -> Self {
        Self::Read(e)
    }
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::IndexOutOfRange(gid) => write!(f, "Glyph {gid} is not in the font"),
            Self::UnsupportedLocaFormat(format) => {
                write!(f, "Unsupported 'loca' format {format}")
            }
            Self::MalformedGlyph(gid) => write!(f, "Glyph {gid} has a malformed header"),
            Self::RecursionLimitExceeded(gid) => write!(
                f,
                "Recursion limit ({}) exceeded when loading composite component {gid}",
                super::GLYF_COMPOSITE_RECURSION_LIMIT,
            ),
            Self::InvalidAnchorPoint(gid, index) => write!(
                f,
                "Invalid anchor point index ({index}) for composite glyph {gid}",
            ),
            Self::Read(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DrawError {}
