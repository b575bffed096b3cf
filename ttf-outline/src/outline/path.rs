//! TrueType style outline to path conversion.

use ttf_read::tables::glyf::PointKind;
use ttf_types::Point;

use super::{pen::OutlinePen, DrawSettings, PathStyle};

/// A point in a contour, in font units.
#[derive(Copy, Clone, PartialEq, Debug)]
pub(crate) struct ContourPoint {
    pub point: Point<f32>,
    pub kind: PointKind,
}

impl ContourPoint {
    pub fn new(point: Point<f32>, kind: PointKind) -> Self {
        Self { point, kind }
    }

    fn is_on_curve(&self) -> bool {
        self.kind.is_on_curve()
    }

    fn midpoint(&self, other: &Self, floor: bool) -> Point<f32> {
        implied_point(self.point, other.point, floor)
    }
}

/// The on-curve point implied between two off-curve points.
///
/// With `floor`, the coordinates are rounded down, which is what integer
/// `(a + b) >> 1` arithmetic produces for whole font units.
fn implied_point(a: Point<f32>, b: Point<f32>, floor: bool) -> Point<f32> {
    let mid = a.midpoint(b);
    if floor {
        mid.map(f32::floor)
    } else {
        mid
    }
}

/// Generates a path from the points of a single contour.
///
/// Consecutive off-curve points imply an on-curve point at their midpoint.
/// When the contour begins with an off-curve point, the settings' path
/// style selects where the path starts. The contour is always closed, returning to the start
/// point with a line if the last segment did not end there.
pub(crate) fn contour_to_path(
    points: &[ContourPoint],
    settings: DrawSettings,
    pen: &mut impl OutlinePen,
) {
    let floor = settings.floor_implied_points;
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        // This is an empty contour
        return;
    };
    // points emitted after the start, in order
    let mut body = points;
    // points emitted after the body, when the start was found by skipping ahead
    let mut trailing: &[ContourPoint] = &[];
    let start = if first.is_on_curve() {
        body = &points[1..];
        first.point
    } else {
        match settings.path_style {
            PathStyle::FreeType => {
                if last.is_on_curve() {
                    // start on the last point and don't visit it twice
                    body = &points[..points.len() - 1];
                    last.point
                } else {
                    last.midpoint(first, floor)
                }
            }
            PathStyle::HarfBuzz => {
                let Some(next) = points.get(1) else {
                    // a lone off-curve point draws nothing
                    return;
                };
                if next.is_on_curve() {
                    body = &points[2..];
                    trailing = &points[..2];
                    next.point
                } else {
                    body = &points[1..];
                    trailing = &points[..1];
                    first.midpoint(next, floor)
                }
            }
        }
    };
    pen.move_to(start.x, start.y);
    let mut state = PendingState::new(start, floor);
    for point in body.iter().chain(trailing) {
        state.emit(point, pen);
    }
    state.finish(start, pen);
}

/// Tracks the current point and any off-curve control point waiting for
/// the point that ends its curve.
struct PendingState {
    current: Point<f32>,
    control: Option<Point<f32>>,
    floor: bool,
}

impl PendingState {
    fn new(start: Point<f32>, floor: bool) -> Self {
        Self {
            current: start,
            control: None,
            floor,
        }
    }

    fn emit(&mut self, point: &ContourPoint, pen: &mut impl OutlinePen) {
        match (self.control, point.is_on_curve()) {
            (None, true) => {
                pen.line_to(point.point.x, point.point.y);
                self.current = point.point;
            }
            (None, false) => self.control = Some(point.point),
            (Some(control), true) => {
                pen.quad_to(control.x, control.y, point.point.x, point.point.y);
                self.current = point.point;
                self.control = None;
            }
            (Some(control), false) => {
                let end = implied_point(control, point.point, self.floor);
                pen.quad_to(control.x, control.y, end.x, end.y);
                self.current = end;
                self.control = Some(point.point);
            }
        }
    }

    fn finish(self, start: Point<f32>, pen: &mut impl OutlinePen) {
        if let Some(control) = self.control {
            pen.quad_to(control.x, control.y, start.x, start.y);
        } else if self.current != start {
            pen.line_to(start.x, start.y);
        }
        pen.close();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{super::pen::SvgPen, *};

    fn on(x: f32, y: f32) -> ContourPoint {
        ContourPoint::new(Point::new(x, y), PointKind::OnCurve)
    }

    fn off(x: f32, y: f32) -> ContourPoint {
        ContourPoint::new(Point::new(x, y), PointKind::OffCurve)
    }

    fn to_svg(points: &[ContourPoint], style: PathStyle) -> String {
        to_svg_with(points, DrawSettings::new().path_style(style))
    }

    fn to_svg_with(points: &[ContourPoint], settings: DrawSettings) -> String {
        let mut pen = SvgPen::new();
        contour_to_path(points, settings, &mut pen);
        pen.into()
    }

    #[test]
    fn on_curve_start_returns_to_start() {
        let points = [on(0.0, 0.0), on(100.0, 0.0), off(100.0, 100.0), on(0.0, 100.0)];
        let expected = "M0,0 L100,0 Q100,100 0,100 L0,0 Z";
        assert_eq!(to_svg(&points, PathStyle::HarfBuzz), expected);
        assert_eq!(to_svg(&points, PathStyle::FreeType), expected);
    }

    #[test]
    fn closing_curve_needs_no_line() {
        let points = [on(0.0, 0.0), on(100.0, 0.0), off(50.0, 80.0)];
        assert_eq!(
            to_svg(&points, PathStyle::HarfBuzz),
            "M0,0 L100,0 Q50,80 0,0 Z"
        );
    }

    #[test]
    fn consecutive_off_curve_midpoints() {
        let points = [on(0.0, 0.0), off(10.0, 10.0), off(21.0, 10.0), on(30.0, 0.0)];
        assert_eq!(
            to_svg(&points, PathStyle::HarfBuzz),
            "M0,0 Q10,10 15.5,10 Q21,10 30,0 L0,0 Z"
        );
    }

    #[test]
    fn floored_midpoints() {
        let settings = DrawSettings::new().floor_implied_points(true);
        let points = [on(0.0, 0.0), off(10.0, 10.0), off(21.0, 10.0), on(30.0, 0.0)];
        assert_eq!(
            to_svg_with(&points, settings),
            "M0,0 Q10,10 15,10 Q21,10 30,0 L0,0 Z"
        );
        // rounds toward negative infinity, like an arithmetic shift
        let points = [off(-3.0, 0.0), on(0.0, 4.0), off(0.0, 0.0)];
        assert_eq!(
            to_svg_with(&points, settings.path_style(PathStyle::FreeType)),
            "M-2,0 Q-3,0 0,4 Q0,0 -2,0 Z"
        );
    }

    // The off-curve start cases mirror the ones FreeType and HarfBuzz
    // disagree on: the first point off-curve, followed by an on-curve point
    // or by more off-curve points.

    fn start_off_curve(all_off_curve: bool) -> [ContourPoint; 4] {
        let mut points = [
            off(10.0, 2.0),
            off(4.0, 1.0),
            off(10.0, 1.0),
            off(2.0, 2.0),
        ];
        if !all_off_curve {
            points[1].kind = PointKind::OnCurve;
        }
        points
    }

    #[test]
    fn start_off_curve_freetype() {
        assert_eq!(
            to_svg(&start_off_curve(false), PathStyle::FreeType),
            "M6,2 Q10,2 4,1 Q10,1 6,1.5 Q2,2 6,2 Z"
        );
    }

    #[test]
    fn start_off_curve_harfbuzz() {
        assert_eq!(
            to_svg(&start_off_curve(false), PathStyle::HarfBuzz),
            "M4,1 Q10,1 6,1.5 Q2,2 6,2 Q10,2 4,1 Z"
        );
    }

    #[test]
    fn all_off_curve_freetype() {
        assert_eq!(
            to_svg(&start_off_curve(true), PathStyle::FreeType),
            "M6,2 Q10,2 7,1.5 Q4,1 7,1 Q10,1 6,1.5 Q2,2 6,2 Z"
        );
    }

    #[test]
    fn all_off_curve_harfbuzz() {
        assert_eq!(
            to_svg(&start_off_curve(true), PathStyle::HarfBuzz),
            "M7,1.5 Q4,1 7,1 Q10,1 6,1.5 Q2,2 6,2 Q10,2 7,1.5 Z"
        );
    }

    #[test]
    fn freetype_starts_on_last_on_curve_point() {
        let points = [off(50.0, 100.0), on(100.0, 0.0), on(0.0, 0.0)];
        assert_eq!(
            to_svg(&points, PathStyle::FreeType),
            "M0,0 Q50,100 100,0 L0,0 Z"
        );
        assert_eq!(
            to_svg(&points, PathStyle::HarfBuzz),
            "M100,0 L0,0 Q50,100 100,0 Z"
        );
    }

    #[test]
    fn single_point_contours() {
        assert_eq!(to_svg(&[on(5.0, 6.0)], PathStyle::HarfBuzz), "M5,6 Z");
        assert_eq!(to_svg(&[off(5.0, 6.0)], PathStyle::HarfBuzz), "");
        assert_eq!(to_svg(&[], PathStyle::FreeType), "");
    }
}
