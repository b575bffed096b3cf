//! The [glyf (Glyph Data)](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf) table

use types::{BoundingBox, F2Dot14, GlyphId, Tag};

use crate::{array::ScalarArray, font_data::Cursor, FontData, FontRead, ReadError};

/// 'glyf'
pub const TAG: Tag = Tag::new(b"glyf");

bitflags::bitflags! {
    /// Flags used in [SimpleGlyph]
    pub struct SimpleGlyphFlags: u8 {
        /// Bit 0: If set, the point is on the curve; otherwise, it is off
        /// the curve.
        const ON_CURVE_POINT = 0x01;
        /// Bit 1: If set, the corresponding x-coordinate is 1 byte long,
        /// and the sign is determined by the
        /// X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR flag. If not set, its
        /// interpretation depends on the
        /// X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR flag: If that other flag
        /// is set, the x-coordinate is the same as the previous
        /// x-coordinate, and no element is added to the xCoordinates
        /// array. If both flags are not set, the corresponding element in
        /// the xCoordinates array is two bytes and interpreted as a signed
        /// integer.
        const X_SHORT_VECTOR = 0x02;
        /// Bit 2: If set, the corresponding y-coordinate is 1 byte long.
        /// See [`X_SHORT_VECTOR`](Self::X_SHORT_VECTOR).
        const Y_SHORT_VECTOR = 0x04;
        /// Bit 3: If set, the next byte (read as unsigned) specifies the
        /// number of additional times this flag byte is to be repeated in
        /// the logical flags array.
        const REPEAT_FLAG = 0x08;
        /// Bit 4: This flag has two meanings, depending on how the
        /// X_SHORT_VECTOR flag is set. If X_SHORT_VECTOR is set, this bit
        /// describes the sign of the value, with 1 equalling positive and
        /// 0 negative. If X_SHORT_VECTOR is not set and this bit is set,
        /// then the current x-coordinate is the same as the previous
        /// x-coordinate.
        const X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR = 0x10;
        /// Bit 5: See
        /// [`X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR`](Self::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR).
        const Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR = 0x20;
        /// Bit 6: If set, contours in the glyph description may overlap.
        const OVERLAP_SIMPLE = 0x40;
    }
}

bitflags::bitflags! {
    /// Flags used in [Component]
    pub struct CompositeGlyphFlags: u16 {
        /// Bit 0: If this is set, the arguments are 16-bit (uint16 or
        /// int16); otherwise, they are bytes (uint8 or int8).
        const ARG_1_AND_2_ARE_WORDS = 0x0001;
        /// Bit 1: If this is set, the arguments are signed xy values;
        /// otherwise, they are unsigned point numbers.
        const ARGS_ARE_XY_VALUES = 0x0002;
        /// Bit 2: For the xy values if the preceding is true.
        const ROUND_XY_TO_GRID = 0x0004;
        /// Bit 3: This indicates that there is a simple scale for the
        /// component. Otherwise, scale = 1.0.
        const WE_HAVE_A_SCALE = 0x0008;
        /// Bit 5: Indicates at least one more glyph after this one.
        const MORE_COMPONENTS = 0x0020;
        /// Bit 6: The x direction will use a different scale from the y
        /// direction.
        const WE_HAVE_AN_X_AND_Y_SCALE = 0x0040;
        /// Bit 7: There is a 2 by 2 transformation that will be used to
        /// scale the component.
        const WE_HAVE_A_TWO_BY_TWO = 0x0080;
        /// Bit 8: Following the last component are instructions for the
        /// composite character.
        const WE_HAVE_INSTRUCTIONS = 0x0100;
        /// Bit 9: If set, this forces the aw and lsb (and rsb) for the
        /// composite to be equal to those from this component glyph.
        const USE_MY_METRICS = 0x0200;
        /// Bit 10: If set, the components of the compound glyph overlap.
        const OVERLAP_COMPOUND = 0x0400;
        /// Bit 11: The composite is designed to have the component offset
        /// scaled.
        const SCALED_COMPONENT_OFFSET = 0x0800;
        /// Bit 12: The composite is designed not to have the component
        /// offset scaled.
        const UNSCALED_COMPONENT_OFFSET = 0x1000;
    }
}

/// The [glyf] table.
///
/// Individual glyphs are located through the [loca](super::loca) table.
///
/// [glyf]: https://docs.microsoft.com/en-us/typography/opentype/spec/glyf
#[derive(Clone, Copy)]
pub struct Glyf<'a> {
    data: FontData<'a>,
}

impl<'a> FontRead<'a> for Glyf<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        Ok(Glyf { data })
    }
}

impl<'a> Glyf<'a> {
    /// The data of the table, against which `loca` offsets are resolved.
    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}

/// A glyph record: either a simple outline or a list of components.
#[derive(Clone)]
pub enum Glyph<'a> {
    Simple(SimpleGlyph<'a>),
    Composite(CompositeGlyph<'a>),
}

impl<'a> FontRead<'a> for Glyph<'a> {
    /// Fails with [`ReadError::InvalidFormat`] if `numberOfContours` is
    /// less than -1.
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let number_of_contours: i16 = data.read_at(0)?;
        match number_of_contours {
            n if n >= 0 => SimpleGlyph::read(data).map(Glyph::Simple),
            -1 => CompositeGlyph::read(data).map(Glyph::Composite),
            n => Err(ReadError::InvalidFormat(n as i64)),
        }
    }
}

impl Glyph<'_> {
    /// The number of contours; -1 for composite glyphs.
    pub fn number_of_contours(&self) -> i16 {
        match self {
            Glyph::Simple(glyph) => glyph.number_of_contours(),
            Glyph::Composite(_) => -1,
        }
    }

    /// The bounding box stored in the glyph header.
    pub fn bounds(&self) -> BoundingBox<i16> {
        match self {
            Glyph::Simple(glyph) => glyph.bounds,
            Glyph::Composite(glyph) => glyph.bounds,
        }
    }
}

fn read_header(cursor: &mut Cursor) -> Result<(i16, BoundingBox<i16>), ReadError> {
    Ok((
        cursor.read()?,
        BoundingBox {
            x_min: cursor.read()?,
            y_min: cursor.read()?,
            x_max: cursor.read()?,
            y_max: cursor.read()?,
        },
    ))
}

/// Whether a point lies on the curve or is a quadratic control point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointKind {
    OnCurve,
    OffCurve,
}

impl PointKind {
    pub fn is_on_curve(self) -> bool {
        self == PointKind::OnCurve
    }
}

/// A point in a simple glyph, in font units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CurvePoint {
    pub x: i16,
    pub y: i16,
    pub kind: PointKind,
}

impl CurvePoint {
    pub fn on_curve(x: i16, y: i16) -> Self {
        CurvePoint {
            x,
            y,
            kind: PointKind::OnCurve,
        }
    }

    pub fn off_curve(x: i16, y: i16) -> Self {
        CurvePoint {
            x,
            y,
            kind: PointKind::OffCurve,
        }
    }
}

/// A glyph described by contours of quadratic on/off-curve points.
#[derive(Clone)]
pub struct SimpleGlyph<'a> {
    number_of_contours: i16,
    bounds: BoundingBox<i16>,
    end_pts_of_contours: ScalarArray<'a, u16>,
    instructions: &'a [u8],
    glyph_data: FontData<'a>,
}

impl<'a> FontRead<'a> for SimpleGlyph<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let (number_of_contours, bounds) = read_header(&mut cursor)?;
        let n_contours = usize::try_from(number_of_contours)
            .map_err(|_| ReadError::InvalidFormat(number_of_contours as i64))?;
        if n_contours == 0 {
            // nothing follows the header that we need
            return Ok(SimpleGlyph {
                number_of_contours,
                bounds,
                end_pts_of_contours: ScalarArray::new(FontData::default())?,
                instructions: &[],
                glyph_data: FontData::default(),
            });
        }
        let end_pts_of_contours = cursor.read_array(n_contours)?;
        let instruction_length: u16 = cursor.read()?;
        let instructions = cursor
            .read_array::<u8>(instruction_length as usize)?
            .font_data()
            .as_bytes();
        Ok(SimpleGlyph {
            number_of_contours,
            bounds,
            end_pts_of_contours,
            instructions,
            glyph_data: cursor.remaining()?,
        })
    }
}

impl<'a> SimpleGlyph<'a> {
    pub fn number_of_contours(&self) -> i16 {
        self.number_of_contours
    }

    /// The bounding box stored in the glyph header.
    pub fn bounds(&self) -> BoundingBox<i16> {
        self.bounds
    }

    /// Array of point indices for the last point of each contour, in
    /// increasing numeric order.
    pub fn end_pts_of_contours(&self) -> ScalarArray<'a, u16> {
        self.end_pts_of_contours
    }

    /// The hinting bytecode; skipped when decoding points.
    pub fn instructions(&self) -> &'a [u8] {
        self.instructions
    }

    /// The total number of points in this glyph.
    pub fn num_points(&self) -> usize {
        self.end_pts_of_contours
            .last()
            .map(|last| last as usize + 1)
            .unwrap_or(0)
    }

    /// Decode the points of the glyph, appending them to `points`.
    ///
    /// Exactly [`num_points`](Self::num_points) points are appended on
    /// success. Coordinates are accumulated with wrapping 16-bit arithmetic.
    pub fn read_points(&self, points: &mut Vec<CurvePoint>) -> Result<(), ReadError> {
        let n_points = self.num_points();
        let mut cursor = self.glyph_data.cursor();
        let mut flags = Vec::with_capacity(n_points);
        while flags.len() < n_points {
            let flag = SimpleGlyphFlags::from_bits_truncate(cursor.read::<u8>()?);
            let count = if flag.contains(SimpleGlyphFlags::REPEAT_FLAG) {
                cursor.read::<u8>()? as usize + 1
            } else {
                1
            };
            let count = count.min(n_points - flags.len());
            flags.extend(std::iter::repeat(flag).take(count));
        }

        let start = points.len();
        points.reserve(n_points);
        let mut x = 0i16;
        for flag in &flags {
            x = x.wrapping_add(read_delta(
                &mut cursor,
                *flag,
                SimpleGlyphFlags::X_SHORT_VECTOR,
                SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR,
            )?);
            let kind = if flag.contains(SimpleGlyphFlags::ON_CURVE_POINT) {
                PointKind::OnCurve
            } else {
                PointKind::OffCurve
            };
            points.push(CurvePoint { x, y: 0, kind });
        }
        let mut y = 0i16;
        for (point, flag) in points[start..].iter_mut().zip(&flags) {
            y = y.wrapping_add(read_delta(
                &mut cursor,
                *flag,
                SimpleGlyphFlags::Y_SHORT_VECTOR,
                SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR,
            )?);
            point.y = y;
        }
        Ok(())
    }
}

fn read_delta(
    cursor: &mut Cursor,
    flag: SimpleGlyphFlags,
    short: SimpleGlyphFlags,
    same_or_positive: SimpleGlyphFlags,
) -> Result<i16, ReadError> {
    if flag.contains(short) {
        let value = cursor.read::<u8>()? as i16;
        Ok(if flag.contains(same_or_positive) {
            value
        } else {
            -value
        })
    } else if flag.contains(same_or_positive) {
        Ok(0)
    } else {
        cursor.read::<i16>()
    }
}

/// A glyph built from other glyphs.
#[derive(Clone)]
pub struct CompositeGlyph<'a> {
    bounds: BoundingBox<i16>,
    component_data: FontData<'a>,
}

impl<'a> FontRead<'a> for CompositeGlyph<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let (_, bounds) = read_header(&mut cursor)?;
        Ok(CompositeGlyph {
            bounds,
            component_data: cursor.remaining()?,
        })
    }
}

impl<'a> CompositeGlyph<'a> {
    /// The bounding box stored in the glyph header.
    pub fn bounds(&self) -> BoundingBox<i16> {
        self.bounds
    }

    /// Returns an iterator over the components of the composite glyph.
    pub fn components(&self) -> ComponentIter<'a> {
        ComponentIter {
            cursor: self.component_data.cursor(),
            done: false,
        }
    }
}

/// Anchor position for a composite component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// A translation applied to the component.
    Offset { x: i16, y: i16 },
    /// Align point `component` of the component with point `base` of the
    /// composite built so far.
    Point { base: u16, component: u16 },
}

/// Transformation matrix for a composite component.
///
/// Maps `(x, y)` to `(xx * x + xy * y, yx * x + yy * y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transform {
    pub xx: F2Dot14,
    pub yx: F2Dot14,
    pub xy: F2Dot14,
    pub yy: F2Dot14,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            xx: F2Dot14::ONE,
            yx: F2Dot14::ZERO,
            xy: F2Dot14::ZERO,
            yy: F2Dot14::ONE,
        }
    }
}

impl Transform {
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// A reference to another glyph. Part of [CompositeGlyph].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Component {
    /// Component flags.
    pub flags: CompositeGlyphFlags,
    /// Glyph identifier.
    pub glyph: GlyphId,
    /// Anchor for component placement.
    pub anchor: Anchor,
    /// Component transformation matrix.
    pub transform: Transform,
}

/// Iterator that reads composite glyph components.
///
/// Yields an error and stops if a component record is truncated.
pub struct ComponentIter<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl Iterator for ComponentIter<'_> {
    type Item = Result<Component, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.read_component();
        self.done = match &result {
            Ok(component) => !component
                .flags
                .contains(CompositeGlyphFlags::MORE_COMPONENTS),
            Err(_) => true,
        };
        Some(result)
    }
}

impl ComponentIter<'_> {
    fn read_component(&mut self) -> Result<Component, ReadError> {
        let cursor = &mut self.cursor;
        let flags = CompositeGlyphFlags::from_bits_truncate(cursor.read::<u16>()?);
        let glyph: GlyphId = cursor.read()?;
        let words = flags.contains(CompositeGlyphFlags::ARG_1_AND_2_ARE_WORDS);
        let anchor = if flags.contains(CompositeGlyphFlags::ARGS_ARE_XY_VALUES) {
            let (x, y) = if words {
                (cursor.read::<i16>()?, cursor.read::<i16>()?)
            } else {
                (cursor.read::<i8>()? as i16, cursor.read::<i8>()? as i16)
            };
            Anchor::Offset { x, y }
        } else {
            let (base, component) = if words {
                (cursor.read::<u16>()?, cursor.read::<u16>()?)
            } else {
                (cursor.read::<u8>()? as u16, cursor.read::<u8>()? as u16)
            };
            Anchor::Point { base, component }
        };
        let mut transform = Transform::default();
        if flags.contains(CompositeGlyphFlags::WE_HAVE_A_SCALE) {
            transform.xx = cursor.read()?;
            transform.yy = transform.xx;
        } else if flags.contains(CompositeGlyphFlags::WE_HAVE_AN_X_AND_Y_SCALE) {
            transform.xx = cursor.read()?;
            transform.yy = cursor.read()?;
        } else if flags.contains(CompositeGlyphFlags::WE_HAVE_A_TWO_BY_TWO) {
            transform.xx = cursor.read()?;
            transform.yx = cursor.read()?;
            transform.xy = cursor.read()?;
            transform.yy = cursor.read()?;
        }
        Ok(Component {
            flags,
            glyph,
            anchor,
            transform,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ttf_test_data::tables::{
        Component as ComponentBuilder, ComponentScale, CompositeGlyph as CompositeBuilder,
        SimpleGlyph as SimpleBuilder,
    };

    use super::*;

    fn read_glyph(bytes: &[u8]) -> Glyph {
        Glyph::read(FontData::new(bytes)).unwrap()
    }

    fn points_of(glyph: &SimpleGlyph) -> Vec<CurvePoint> {
        let mut points = Vec::new();
        glyph.read_points(&mut points).unwrap();
        points
    }

    #[test]
    fn simple_glyph_points() {
        let bytes = SimpleBuilder::new()
            .contour(&[(0, 0, true), (100, 0, true), (100, 100, false), (0, 100, true)])
            .contour(&[(-300, 2000, true), (-300, 2000, false), (-555, -1, true)])
            .instructions(&[0xB0, 0x01, 0x2F])
            .to_bytes();
        let Glyph::Simple(glyph) = read_glyph(&bytes) else {
            panic!("expected simple glyph");
        };
        assert_eq!(glyph.number_of_contours(), 2);
        assert_eq!(glyph.instructions(), &[0xB0, 0x01, 0x2F]);
        assert_eq!(glyph.end_pts_of_contours().iter().collect::<Vec<_>>(), vec![3, 6]);
        assert_eq!(
            glyph.bounds(),
            BoundingBox {
                x_min: -555,
                y_min: -1,
                x_max: 100,
                y_max: 2000
            }
        );
        assert_eq!(
            points_of(&glyph),
            vec![
                CurvePoint::on_curve(0, 0),
                CurvePoint::on_curve(100, 0),
                CurvePoint::off_curve(100, 100),
                CurvePoint::on_curve(0, 100),
                CurvePoint::on_curve(-300, 2000),
                CurvePoint::off_curve(-300, 2000),
                CurvePoint::on_curve(-555, -1),
            ]
        );
    }

    #[test]
    fn repeated_flags() {
        // 16 points on a line share a flag byte
        let contour: Vec<(i16, i16, bool)> = (0..16).map(|i| (i * 10, 5, true)).collect();
        let bytes = SimpleBuilder::new().contour(&contour).to_bytes();
        let Glyph::Simple(glyph) = read_glyph(&bytes) else {
            panic!("expected simple glyph");
        };
        let points = points_of(&glyph);
        assert_eq!(points.len(), 16);
        assert_eq!(points[15], CurvePoint::on_curve(150, 5));
    }

    #[test]
    fn appends_to_existing_points() {
        let bytes = SimpleBuilder::new().contour(&[(1, 2, false)]).to_bytes();
        let Glyph::Simple(glyph) = read_glyph(&bytes) else {
            panic!("expected simple glyph");
        };
        let mut points = vec![CurvePoint::on_curve(9, 9)];
        glyph.read_points(&mut points).unwrap();
        assert_eq!(points, vec![CurvePoint::on_curve(9, 9), CurvePoint::off_curve(1, 2)]);
    }

    #[test]
    fn truncated_coordinates() {
        let bytes = SimpleBuilder::new()
            .contour(&[(0, 0, true), (1000, 1000, true)])
            .to_bytes();
        let Glyph::Simple(glyph) = read_glyph(&bytes[..bytes.len() - 1]) else {
            panic!("expected simple glyph");
        };
        let mut points = Vec::new();
        assert_eq!(glyph.read_points(&mut points), Err(ReadError::OutOfBounds));
    }

    #[test]
    fn zero_contours_needs_only_header() {
        let bytes = ttf_test_data::be_buffer! { 0i16, 0i16, 0i16, 0i16, 0i16 };
        let glyph = read_glyph(&bytes);
        assert_eq!(glyph.number_of_contours(), 0);
        let Glyph::Simple(glyph) = glyph else {
            panic!("expected simple glyph");
        };
        assert_eq!(glyph.num_points(), 0);
        assert!(points_of(&glyph).is_empty());
    }

    #[test]
    fn bad_contour_count() {
        let bytes = ttf_test_data::be_buffer! { -2i16, 0i16, 0i16, 0i16, 0i16 };
        assert_eq!(
            Glyph::read(FontData::new(&bytes)).err(),
            Some(ReadError::InvalidFormat(-2))
        );
    }

    #[test]
    fn composite_components() {
        let bytes = CompositeBuilder::new()
            .component(ComponentBuilder::offset(1, -20, 300))
            .component(ComponentBuilder::point(2, 4, 0).with_scale(ComponentScale::Uniform(0.5)))
            .component(
                ComponentBuilder::offset(3, 1, 2)
                    .with_scale(ComponentScale::TwoByTwo([0.0, 1.0, -1.0, 0.0]))
                    .with_scaled_offset(),
            )
            .component(ComponentBuilder::offset(4, 0, 0).with_scale(ComponentScale::XY(1.5, -1.0)))
            .to_bytes();
        let Glyph::Composite(glyph) = read_glyph(&bytes) else {
            panic!("expected composite glyph");
        };
        let components: Vec<_> = glyph.components().map(|c| c.unwrap()).collect();
        assert_eq!(components.len(), 4);

        assert_eq!(components[0].glyph, GlyphId::new(1));
        assert_eq!(components[0].anchor, Anchor::Offset { x: -20, y: 300 });
        assert!(components[0]
            .flags
            .contains(CompositeGlyphFlags::ARG_1_AND_2_ARE_WORDS));
        assert!(components[0].transform.is_identity());

        assert_eq!(components[1].anchor, Anchor::Point { base: 4, component: 0 });
        assert_eq!(components[1].transform.xx, F2Dot14::from_f32(0.5));
        assert_eq!(components[1].transform.yy, F2Dot14::from_f32(0.5));

        let rotate = components[2].transform;
        assert_eq!(
            (rotate.xx, rotate.yx, rotate.xy, rotate.yy),
            (
                F2Dot14::ZERO,
                F2Dot14::ONE,
                F2Dot14::from_f32(-1.0),
                F2Dot14::ZERO
            )
        );
        assert!(components[2]
            .flags
            .contains(CompositeGlyphFlags::SCALED_COMPONENT_OFFSET));

        let xy = components[3].transform;
        assert_eq!((xy.xx.to_f32(), xy.yy.to_f32()), (1.5, -1.0));
        assert!(!components[3]
            .flags
            .contains(CompositeGlyphFlags::MORE_COMPONENTS));
    }

    #[test]
    fn truncated_component_stops_iteration() {
        let bytes = CompositeBuilder::new()
            .component(ComponentBuilder::offset(1, 0, 0))
            .component(ComponentBuilder::offset(2, 0, 0))
            .to_bytes();
        let Glyph::Composite(glyph) = read_glyph(&bytes[..bytes.len() - 1]) else {
            panic!("expected composite glyph");
        };
        let mut iter = glyph.components();
        assert!(iter.next().unwrap().is_ok());
        assert_eq!(iter.next().unwrap(), Err(ReadError::OutOfBounds));
        assert!(iter.next().is_none());
    }
}
