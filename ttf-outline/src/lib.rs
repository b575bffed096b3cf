//! Glyph outlines and metrics for TrueType fonts.
//!
//! This crate sits above the low level parsing provided by
//! [`ttf-read`](ttf_read) and below a renderer. It resolves characters to
//! glyphs, reconstructs glyph outlines as move/line/quad/close commands and
//! reports the metrics needed to place them.
//!
//! # Example
//!
//! ```no_run
//! use ttf_outline::{outline::SvgPen, FontFile};
//!
//! # let path_to_my_font_file = std::path::Path::new("");
//! let data = std::fs::read(path_to_my_font_file).unwrap();
//! let font = FontFile::new(&data).unwrap();
//! let scale = font.metrics().scale(12.0, 96.0);
//! let mut x = 0.0;
//! for ch in "Hello".chars() {
//!     let gid = font.glyph_index(ch);
//!     let mut pen = SvgPen::new();
//!     font.outline(gid).unwrap().draw(&mut pen);
//!     println!("{ch} at {x}: {}", pen.as_ref());
//!     x += font.advance_width(gid).unwrap() as f32 * scale;
//! }
//! ```

#![forbid(unsafe_code)]

/// Expose our "raw" underlying parser crate.
pub extern crate ttf_read as raw;

mod cache;
pub mod charmap;
mod font;
pub mod metrics;
pub mod outline;

pub use cache::{GlyphPathCache, PathRenderer};
pub use charmap::Charmap;
pub use font::FontFile;
pub use metrics::{FontMetrics, GlyphMetrics};

/// Type for a glyph identifier.
pub type GlyphId = ttf_read::types::GlyphId;

/// Type for a point in font units.
pub type Point = ttf_read::types::Point<f32>;
