//! Loading glyph outlines as path commands.
//!
//! TrueType outlines are stored as contours of points, each flagged as on or
//! off the curve. Consecutive off-curve points imply an on-curve point at
//! their midpoint. Drawing a glyph converts this representation into an
//! explicit sequence of [`PathCommand`]s with their coordinates, collected in
//! a [`GlyphOutline`].
//!
//! Composite glyphs are assembled from other glyphs, each placed by an
//! offset or by matching points and optionally transformed by a 2x2 matrix.
//! By default these placements are applied; see [`DrawSettings`].

mod error;
pub(crate) mod glyf;
mod path;
mod pen;

use ttf_types::{BoundingBox, Point};

pub use error::DrawError;
pub use pen::{OutlinePen, PathElement, SvgPen};

/// Maximum depth of nested composite glyphs.
pub const GLYF_COMPOSITE_RECURSION_LIMIT: usize = 32;

/// Style for path conversion.
///
/// The order to process points in a glyf point stream is ambiguous when the
/// first point is off-curve. Major implementations differ. Which one would
/// you like to match?
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum PathStyle {
    /// If the first point is off-curve, check if the last is on-curve.
    /// If it is, start there. If it isn't, start at the implied midpoint
    /// between first and last.
    FreeType,
    /// If the first point is off-curve, check if the second is on-curve.
    /// If it is, start there. If it isn't, start at the implied midpoint
    /// between first and second.
    ///
    /// Matches hb-draw's interpretation of a point stream.
    #[default]
    HarfBuzz,
}

/// Options for drawing glyphs.
///
/// ```
/// use ttf_outline::outline::{DrawSettings, PathStyle};
///
/// let settings = DrawSettings::new()
///     .path_style(PathStyle::FreeType)
///     .apply_component_transforms(false);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DrawSettings {
    pub(crate) path_style: PathStyle,
    pub(crate) apply_component_transforms: bool,
    pub(crate) floor_implied_points: bool,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            path_style: PathStyle::default(),
            apply_component_transforms: true,
            floor_implied_points: false,
        }
    }
}

impl DrawSettings {
    /// HarfBuzz style paths with component transforms applied and exact
    /// implied points.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule for choosing where a contour that begins with an
    /// off-curve point starts.
    pub fn path_style(mut self, style: PathStyle) -> Self {
        self.path_style = style;
        self
    }

    /// Sets whether composite components are moved and transformed.
    ///
    /// When false, every component is drawn at its own origin, as if its
    /// offset were zero and its matrix the identity.
    pub fn apply_component_transforms(mut self, apply: bool) -> Self {
        self.apply_component_transforms = apply;
        self
    }

    /// Sets whether implied on-curve points are rounded down to whole font
    /// units.
    ///
    /// The point implied between two consecutive off-curve points is their
    /// midpoint, which may fall on a half unit. By default it is kept exact;
    /// renderers that compute it with integer arithmetic land half a unit
    /// lower on odd sums.
    pub fn floor_implied_points(mut self, floor: bool) -> Self {
        self.floor_implied_points = floor;
        self
    }
}

/// A single path command.
///
/// Each command consumes a fixed number of coordinate pairs from the
/// outline; see [`PathCommand::num_coords`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathCommand {
    MoveTo,
    LineTo,
    QuadTo,
    Close,
}

impl PathCommand {
    /// The number of coordinate pairs consumed by this command.
    pub fn num_coords(self) -> usize {
        match self {
            Self::MoveTo | Self::LineTo => 1,
            Self::QuadTo => 2,
            Self::Close => 0,
        }
    }
}

/// The path commands and coordinates of one or more glyphs, in font units.
///
/// Drawing appends to the outline, so a single buffer may accumulate several
/// glyphs. [`clear`](Self::clear) resets it for reuse.
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphOutline {
    commands: Vec<PathCommand>,
    coords: Vec<Point<f32>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    points: Vec<Point<f32>>,
}

/// Lengths of the buffers of an outline, used to roll back a failed draw.
#[derive(Copy, Clone, Debug)]
pub(crate) struct OutlineMark {
    commands: usize,
    coords: usize,
    points: usize,
}

impl GlyphOutline {
    /// Creates an empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    /// The path commands.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// The coordinates consumed by the path commands, in order.
    pub fn coords(&self) -> &[Point<f32>] {
        &self.coords
    }

    /// The TrueType points of every simple glyph drawn into this outline,
    /// after component placement, in point number order.
    pub fn points(&self) -> &[Point<f32>] {
        &self.points
    }

    /// Returns true if the outline has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Removes all commands, coordinates and points.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.coords.clear();
        self.points.clear();
    }

    /// Iterates over the outline as self-contained path elements.
    pub fn elements(&self) -> impl Iterator<Item = PathElement> + '_ {
        let mut coords = self.coords.iter();
        self.commands.iter().filter_map(move |command| {
            Some(match command {
                PathCommand::MoveTo => {
                    let p = coords.next()?;
                    PathElement::MoveTo { x: p.x, y: p.y }
                }
                PathCommand::LineTo => {
                    let p = coords.next()?;
                    PathElement::LineTo { x: p.x, y: p.y }
                }
                PathCommand::QuadTo => {
                    let c = coords.next()?;
                    let p = coords.next()?;
                    PathElement::QuadTo {
                        cx0: c.x,
                        cy0: c.y,
                        x: p.x,
                        y: p.y,
                    }
                }
                PathCommand::Close => PathElement::Close,
            })
        })
    }

    /// Replays the outline into a pen.
    pub fn draw(&self, pen: &mut impl OutlinePen) {
        for element in self.elements() {
            match element {
                PathElement::MoveTo { x, y } => pen.move_to(x, y),
                PathElement::LineTo { x, y } => pen.line_to(x, y),
                PathElement::QuadTo { cx0, cy0, x, y } => pen.quad_to(cx0, cy0, x, y),
                PathElement::Close => pen.close(),
            }
        }
    }

    /// The minimum and maximum extents of all coordinates, including
    /// control points.
    ///
    /// An empty outline has an all-zero bounding box.
    pub fn bounding_box(&self) -> BoundingBox<f32> {
        let mut coords = self.coords.iter();
        let Some(first) = coords.next() else {
            return BoundingBox::default();
        };
        let init = BoundingBox {
            x_min: first.x,
            y_min: first.y,
            x_max: first.x,
            y_max: first.y,
        };
        coords.fold(init, |bounds, p| BoundingBox {
            x_min: bounds.x_min.min(p.x),
            y_min: bounds.y_min.min(p.y),
            x_max: bounds.x_max.max(p.x),
            y_max: bounds.y_max.max(p.y),
        })
    }

    pub(crate) fn mark(&self) -> OutlineMark {
        OutlineMark {
            commands: self.commands.len(),
            coords: self.coords.len(),
            points: self.points.len(),
        }
    }

    pub(crate) fn truncate(&mut self, mark: OutlineMark) {
        self.commands.truncate(mark.commands);
        self.coords.truncate(mark.coords);
        self.points.truncate(mark.points);
    }

    pub(crate) fn push_point(&mut self, point: Point<f32>) {
        self.points.push(point);
    }

    /// Applies `f` to the coordinates and points added since `mark`.
    pub(crate) fn map_since(
        &mut self,
        mark: OutlineMark,
        mut f: impl FnMut(Point<f32>) -> Point<f32>,
    ) {
        for p in self.coords[mark.coords..]
            .iter_mut()
            .chain(self.points[mark.points..].iter_mut())
        {
            *p = f(*p);
        }
    }
}

impl OutlinePen for GlyphOutline {
    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(PathCommand::MoveTo);
        self.coords.push(Point::new(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(PathCommand::LineTo);
        self.coords.push(Point::new(x, y));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.commands.push(PathCommand::QuadTo);
        self.coords.push(Point::new(cx0, cy0));
        self.coords.push(Point::new(x, y));
    }

    fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> GlyphOutline {
        let mut outline = GlyphOutline::new();
        outline.move_to(10.0, -5.0);
        outline.line_to(40.0, 0.0);
        outline.quad_to(60.0, 90.0, 20.0, 30.0);
        outline.close();
        outline
    }

    #[test]
    fn commands_and_coords_line_up() {
        let outline = sample();
        let expected_coords: usize = outline
            .commands()
            .iter()
            .map(|command| command.num_coords())
            .sum();
        assert_eq!(outline.coords().len(), expected_coords);
        assert_eq!(
            outline.elements().collect::<Vec<_>>(),
            vec![
                PathElement::MoveTo { x: 10.0, y: -5.0 },
                PathElement::LineTo { x: 40.0, y: 0.0 },
                PathElement::QuadTo {
                    cx0: 60.0,
                    cy0: 90.0,
                    x: 20.0,
                    y: 30.0
                },
                PathElement::Close,
            ]
        );
    }

    #[test]
    fn bounding_box_includes_control_points() {
        let bounds = sample().bounding_box();
        assert_eq!(
            bounds,
            BoundingBox {
                x_min: 10.0,
                y_min: -5.0,
                x_max: 60.0,
                y_max: 90.0
            }
        );
        assert_eq!(GlyphOutline::new().bounding_box(), BoundingBox::default());
    }

    #[test]
    fn truncate_to_mark() {
        let mut outline = sample();
        let mark = outline.mark();
        outline.push_point(Point::new(1.0, 1.0));
        outline.move_to(0.0, 0.0);
        outline.close();
        outline.truncate(mark);
        assert_eq!(outline, sample());
    }

    #[test]
    fn map_since_mark() {
        let mut outline = GlyphOutline::new();
        outline.move_to(1.0, 1.0);
        let mark = outline.mark();
        outline.push_point(Point::new(2.0, 2.0));
        outline.line_to(2.0, 2.0);
        outline.map_since(mark, |p| p + Point::new(10.0, 0.0));
        assert_eq!(
            outline.coords(),
            &[Point::new(1.0, 1.0), Point::new(12.0, 2.0)]
        );
        assert_eq!(outline.points(), &[Point::new(12.0, 2.0)]);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn serialized_outline_omits_points() {
        let mut outline = sample();
        outline.push_point(Point::new(1.0, 2.0));
        let json = serde_json::to_value(&outline).unwrap();
        assert!(json.get("points").is_none());
        assert_eq!(json["commands"][0], "MoveTo");
        assert_eq!(json["coords"][0]["x"], 10.0);
    }

    #[test]
    fn draw_replays_into_pen() {
        let mut pen = SvgPen::new();
        sample().draw(&mut pen);
        assert_eq!(pen.as_ref(), "M10,-5 L40,0 Q60,90 20,30 Z");
    }
}
