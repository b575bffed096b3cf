//! Command line inspection of TrueType fonts.
//!
//! The library half of `ttf-dump`: each subcommand is a function that
//! renders its report to a string, so the binary only handles arguments
//! and file I/O.

mod error;
mod layout;
mod report;

use std::path::Path;

pub use error::Error;
pub use layout::{layout_text, BezPathRenderer, PlacedGlyph, TextLayout};
pub use report::{charmap, font_info, glyph_report, tables, FontInfo, GlyphSelector};

/// Reads an entire font file into memory.
pub fn load(path: &Path) -> Result<Vec<u8>, Error> {
    std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_names_the_path() {
        let err = load(Path::new("/definitely/not/a/font.ttf")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/a/font.ttf"));
    }
}
