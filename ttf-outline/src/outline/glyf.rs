//! Loading outlines from the `glyf` table.

use ttf_read::{
    tables::glyf::{
        Anchor, CompositeGlyph, CompositeGlyphFlags, CurvePoint, Glyf, Glyph, SimpleGlyph,
    },
    tables::loca::Loca,
    types::{GlyphId, Point},
    ReadError,
};

use super::{
    path::{contour_to_path, ContourPoint},
    DrawError, DrawSettings, GlyphOutline, GLYF_COMPOSITE_RECURSION_LIMIT,
};

/// Decodes glyphs from the `loca` and `glyf` tables.
#[derive(Clone)]
pub(crate) struct GlyfLoader<'a> {
    loca: Loca<'a>,
    glyf: Glyf<'a>,
    num_glyphs: u16,
    settings: DrawSettings,
}

impl<'a> GlyfLoader<'a> {
    pub fn new(loca: Loca<'a>, glyf: Glyf<'a>, num_glyphs: u16, settings: DrawSettings) -> Self {
        Self {
            loca,
            glyf,
            num_glyphs,
            settings,
        }
    }

    /// Appends the outline of `glyph_id` to `outline`.
    ///
    /// On error, the outline may hold a partially drawn glyph.
    pub fn load(&self, glyph_id: GlyphId, outline: &mut GlyphOutline) -> Result<(), DrawError> {
        let mut scratch = Scratch::default();
        self.load_glyph(glyph_id, outline, &mut scratch, 0)
    }

    fn load_glyph(
        &self,
        glyph_id: GlyphId,
        outline: &mut GlyphOutline,
        scratch: &mut Scratch,
        recurse_depth: usize,
    ) -> Result<(), DrawError> {
        if recurse_depth > GLYF_COMPOSITE_RECURSION_LIMIT {
            return Err(DrawError::RecursionLimitExceeded(glyph_id));
        }
        if glyph_id.to_u32() >= self.num_glyphs as u32 {
            return Err(DrawError::IndexOutOfRange(glyph_id));
        }
        let glyph = self
            .loca
            .get_glyf(glyph_id, &self.glyf)
            .map_err(|e| match e {
                ReadError::InvalidFormat(_) => DrawError::MalformedGlyph(glyph_id),
                e => e.into(),
            })?;
        match glyph {
            // empty glyphs draw nothing
            None => Ok(()),
            Some(Glyph::Simple(simple)) => self.load_simple(&simple, outline, scratch),
            Some(Glyph::Composite(composite)) => {
                self.load_composite(glyph_id, &composite, outline, scratch, recurse_depth)
            }
        }
    }

    fn load_simple(
        &self,
        glyph: &SimpleGlyph,
        outline: &mut GlyphOutline,
        scratch: &mut Scratch,
    ) -> Result<(), DrawError> {
        scratch.points.clear();
        glyph.read_points(&mut scratch.points)?;
        scratch.contour_points.clear();
        scratch.contour_points.extend(scratch.points.iter().map(|p| {
            let point = Point::new(p.x as f32, p.y as f32);
            outline.push_point(point);
            ContourPoint::new(point, p.kind)
        }));
        let points = &scratch.contour_points;
        let mut start = 0;
        for end in glyph.end_pts_of_contours().iter() {
            let end = (end as usize + 1).min(points.len());
            // decreasing end points leave nothing for this contour
            if end > start {
                contour_to_path(&points[start..end], self.settings, outline);
                start = end;
            }
        }
        Ok(())
    }

    fn load_composite(
        &self,
        glyph_id: GlyphId,
        glyph: &CompositeGlyph,
        outline: &mut GlyphOutline,
        scratch: &mut Scratch,
        recurse_depth: usize,
    ) -> Result<(), DrawError> {
        let base_points = outline.points().len();
        for component in glyph.components() {
            let component = component?;
            log::trace!(
                "{glyph_id}: loading component {} at depth {}",
                component.glyph,
                recurse_depth + 1
            );
            let mark = outline.mark();
            let start_point = outline.points().len();
            self.load_glyph(component.glyph, outline, scratch, recurse_depth + 1)?;
            if !self.settings.apply_component_transforms {
                continue;
            }
            let flags = component.flags;
            let have_xform = flags.intersects(
                CompositeGlyphFlags::WE_HAVE_A_SCALE
                    | CompositeGlyphFlags::WE_HAVE_AN_X_AND_Y_SCALE
                    | CompositeGlyphFlags::WE_HAVE_A_TWO_BY_TWO,
            );
            let t = &component.transform;
            let [xx, yx, xy, yy] = [t.xx, t.yx, t.xy, t.yy].map(|x| x.to_f32());
            if have_xform && !t.is_identity() {
                outline.map_since(mark, |p| {
                    Point::new(xx * p.x + xy * p.y, yx * p.x + yy * p.y)
                });
            }
            let offset = match component.anchor {
                Anchor::Offset { x, y } => {
                    let (mut x, mut y) = (x as f32, y as f32);
                    if have_xform
                        && flags
                            & (CompositeGlyphFlags::SCALED_COMPONENT_OFFSET
                                | CompositeGlyphFlags::UNSCALED_COMPONENT_OFFSET)
                            == CompositeGlyphFlags::SCALED_COMPONENT_OFFSET
                    {
                        // Scale x by the magnitude of the x-basis, y by the y-basis
                        x *= xx.hypot(xy);
                        y *= yx.hypot(yy);
                    }
                    Point::new(x, y)
                }
                Anchor::Point { base, component } => {
                    // base indexes points placed by earlier components of
                    // this glyph
                    let base_point = outline.points()[..start_point]
                        .get(base_points + base as usize)
                        .copied()
                        .ok_or(DrawError::InvalidAnchorPoint(glyph_id, base))?;
                    let component_point = outline
                        .points()
                        .get(start_point + component as usize)
                        .copied()
                        .ok_or(DrawError::InvalidAnchorPoint(glyph_id, component))?;
                    base_point - component_point
                }
            };
            if offset != Point::default() {
                outline.map_since(mark, |p| p + offset);
            }
        }
        Ok(())
    }
}

/// Buffers reused across the glyphs of a single load.
#[derive(Default)]
struct Scratch {
    points: Vec<CurvePoint>,
    contour_points: Vec<ContourPoint>,
}
