//! Single line text layout onto `kurbo` paths.
//!
//! There is no shaping: each character is drawn with its nominal glyph and
//! the pen moves right by the glyph's advance. Outlines are flipped so that
//! y grows downward, with the baseline placed one ascender below the top.

use std::rc::Rc;

use kurbo::{Affine, BezPath, Point, Rect};
use ttf_outline::{outline::PathCommand, FontFile, GlyphId, GlyphPathCache, PathRenderer};

/// Builds shared `kurbo` paths from outline commands, in font units.
#[derive(Clone, Debug, Default)]
pub struct BezPathRenderer {
    created: usize,
}

impl BezPathRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of paths built so far.
    pub fn paths_created(&self) -> usize {
        self.created
    }
}

impl PathRenderer for BezPathRenderer {
    type Path = Rc<BezPath>;

    fn create_path(
        &mut self,
        commands: &[PathCommand],
        coords: &[ttf_outline::Point],
    ) -> Rc<BezPath> {
        self.created += 1;
        let mut coords = coords.iter().map(|p| Point::new(p.x as f64, p.y as f64));
        let mut path = BezPath::new();
        for command in commands {
            match command {
                PathCommand::MoveTo => {
                    if let Some(p) = coords.next() {
                        path.move_to(p);
                    }
                }
                PathCommand::LineTo => {
                    if let Some(p) = coords.next() {
                        path.line_to(p);
                    }
                }
                PathCommand::QuadTo => {
                    if let (Some(c), Some(p)) = (coords.next(), coords.next()) {
                        path.quad_to(c, p);
                    }
                }
                PathCommand::Close => path.close_path(),
            }
        }
        Rc::new(path)
    }
}

/// A glyph positioned on the line.
#[derive(Clone, Debug)]
pub struct PlacedGlyph {
    pub ch: char,
    pub glyph_id: GlyphId,
    /// The glyph's outline in font units, possibly shared with other
    /// placements of the same character.
    pub path: Rc<BezPath>,
    /// Maps font units to output pixels.
    pub transform: Affine,
}

/// The result of laying out a line of text.
#[derive(Clone, Debug, Default)]
pub struct TextLayout {
    pub glyphs: Vec<PlacedGlyph>,
    /// Total horizontal advance, in pixels.
    pub width: f64,
    /// Distance from ascender to descender, in pixels.
    pub height: f64,
}

/// Lays out `text` at `size` points for a display of `dpi` pixels per inch.
///
/// Paths are fetched through `cache`, so repeated characters are drawn once.
/// A glyph that fails to draw is skipped, without advancing the pen.
/// Advances are truncated to whole pixels.
pub fn layout_text(
    font: &FontFile,
    cache: &mut GlyphPathCache<Rc<BezPath>>,
    renderer: &mut BezPathRenderer,
    text: &str,
    size: f32,
    dpi: f32,
) -> TextLayout {
    let metrics = font.metrics();
    let scale = metrics.scale(size, dpi) as f64;
    let baseline = metrics.ascender as f64 * scale;
    let mut layout = TextLayout {
        height: (metrics.ascender as f64 - metrics.descender as f64) * scale,
        ..Default::default()
    };
    for ch in text.chars() {
        let glyph_id = font.glyph_index(ch);
        let path = match cache.get_path(font, renderer, ch as u32, glyph_id) {
            Ok(path) => path,
            Err(e) => {
                log::warn!("skipping {ch:?} ({glyph_id}): {e}");
                continue;
            }
        };
        let advance = font.advance_width(glyph_id).unwrap_or_else(|e| {
            log::warn!("no advance for {ch:?} ({glyph_id}): {e}");
            0
        });
        let transform = Affine::translate((layout.width, baseline))
            * Affine::scale_non_uniform(scale, -scale);
        layout.glyphs.push(PlacedGlyph {
            ch,
            glyph_id,
            path,
            transform,
        });
        layout.width += (advance as f64 * scale).trunc();
    }
    layout
}

impl TextLayout {
    /// All glyphs combined into a single path, in pixels.
    pub fn to_path(&self) -> BezPath {
        let mut combined = BezPath::new();
        for glyph in &self.glyphs {
            let mut path = glyph.path.as_ref().clone();
            path.apply_affine(glyph.transform);
            for el in path.elements() {
                combined.push(*el);
            }
        }
        combined
    }

    /// The bounds of the line box, from the origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Renders the line as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let bounds = self.bounds();
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n  <path d=\"{d}\"/>\n</svg>",
            w = bounds.width(),
            h = bounds.height(),
            d = self.to_path().to_svg(),
        )
    }
}
