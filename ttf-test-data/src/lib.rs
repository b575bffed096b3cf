//! test data shared between the ttf-outline crates.
//!
//! Rather than checking in binary fonts, tests describe the tables they need
//! and these helpers encode them.

pub mod bebuffer;
pub mod font_builder;
pub mod tables;
pub mod test_font;

pub use bebuffer::BeBuffer;
pub use font_builder::FontBuilder;
pub use test_font::{quad_glyph, sample, sample_font, TestFont};
