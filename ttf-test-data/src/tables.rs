//! Encoders for the tables read by the outline crates.
//!
//! These produce exactly the bytes described by the OpenType spec for each
//! table, with fields this workspace does not read filled with plausible
//! constants.

use ttf_types::{BoundingBox, F2Dot14};

use crate::bebuffer::BeBuffer;

/// The fields of a `head` table.
#[derive(Clone, Debug)]
pub struct Head {
    pub units_per_em: u16,
    pub bounds: BoundingBox<i16>,
    pub index_to_loc_format: u16,
    pub glyph_data_format: u16,
}

impl Default for Head {
    fn default() -> Self {
        Head {
            units_per_em: 1000,
            bounds: BoundingBox::default(),
            index_to_loc_format: 0,
            glyph_data_format: 0,
        }
    }
}

impl Head {
    pub const MAGIC_NUMBER: u32 = 0x5F0F3CF5;

    pub fn to_bytes(&self) -> Vec<u8> {
        BeBuffer::new()
            .push(0x00010000u32) // version
            .push(0x00010000u32) // fontRevision
            .push(0u32) // checksumAdjustment
            .push(Self::MAGIC_NUMBER)
            .push(0u16) // flags
            .push(self.units_per_em)
            .extend([0u32; 4]) // created, modified
            .push(self.bounds.x_min)
            .push(self.bounds.y_min)
            .push(self.bounds.x_max)
            .push(self.bounds.y_max)
            .push(0u16) // macStyle
            .push(8u16) // lowestRecPPEM
            .push(2i16) // fontDirectionHint
            .push(self.index_to_loc_format)
            .push(self.glyph_data_format)
            .into_vec()
    }
}

/// A version 0.5 `maxp` table.
pub fn maxp(num_glyphs: u16) -> Vec<u8> {
    BeBuffer::new()
        .push(0x00005000u32)
        .push(num_glyphs)
        .into_vec()
}

/// The fields of an `hhea` table.
#[derive(Clone, Debug, Default)]
pub struct Hhea {
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub advance_width_max: u16,
    pub number_of_h_metrics: u16,
}

impl Hhea {
    pub fn to_bytes(&self) -> Vec<u8> {
        BeBuffer::new()
            .push(0x00010000u32)
            .push(self.ascender)
            .push(self.descender)
            .push(self.line_gap)
            .push(self.advance_width_max)
            .push(0i16) // minLeftSideBearing
            .push(0i16) // minRightSideBearing
            .push(0i16) // xMaxExtent
            .push(1i16) // caretSlopeRise
            .push(0i16) // caretSlopeRun
            .push(0i16) // caretOffset
            .extend([0i16; 4])
            .push(0i16) // metricDataFormat
            .push(self.number_of_h_metrics)
            .into_vec()
    }
}

/// An `hmtx` table: `(advance, lsb)` long metrics followed by bare side bearings.
pub fn hmtx(long_metrics: &[(u16, i16)], side_bearings: &[i16]) -> Vec<u8> {
    let mut buf = BeBuffer::new();
    for (advance, lsb) in long_metrics {
        buf = buf.push(*advance).push(*lsb);
    }
    buf.extend(side_bearings.iter().copied()).into_vec()
}

/// Encode glyph records into a `glyf` table and the matching `loca` table.
///
/// Each record is padded to an even length. Returns `(glyf, loca)`.
pub fn glyf_and_loca(glyphs: &[Vec<u8>], long: bool) -> (Vec<u8>, Vec<u8>) {
    let mut glyf = Vec::new();
    let mut offsets = vec![0u32];
    for glyph in glyphs {
        glyf.extend_from_slice(glyph);
        if glyf.len() % 2 != 0 {
            glyf.push(0);
        }
        offsets.push(glyf.len() as u32);
    }
    let loca = if long {
        BeBuffer::new().extend(offsets).into_vec()
    } else {
        BeBuffer::new()
            .extend(offsets.into_iter().map(|off| (off / 2) as u16))
            .into_vec()
    };
    (glyf, loca)
}

const ON_CURVE: u8 = 0x01;
const X_SHORT: u8 = 0x02;
const Y_SHORT: u8 = 0x04;
const REPEAT: u8 = 0x08;
const X_SAME_OR_POSITIVE: u8 = 0x10;
const Y_SAME_OR_POSITIVE: u8 = 0x20;

/// A simple (contour based) glyph.
#[derive(Clone, Debug, Default)]
pub struct SimpleGlyph {
    contours: Vec<Vec<(i16, i16, bool)>>,
    instructions: Vec<u8>,
}

impl SimpleGlyph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a contour of `(x, y, on_curve)` points.
    pub fn contour(mut self, points: &[(i16, i16, bool)]) -> Self {
        self.contours.push(points.to_vec());
        self
    }

    /// Set the hinting bytecode, which readers must skip.
    pub fn instructions(mut self, bytes: &[u8]) -> Self {
        self.instructions = bytes.to_vec();
        self
    }

    pub fn bounds(&self) -> BoundingBox<i16> {
        let mut points = self.contours.iter().flatten();
        let Some(&(x, y, _)) = points.next() else {
            return BoundingBox::default();
        };
        points.fold(
            BoundingBox {
                x_min: x,
                y_min: y,
                x_max: x,
                y_max: y,
            },
            |bbox, &(x, y, _)| BoundingBox {
                x_min: bbox.x_min.min(x),
                y_min: bbox.y_min.min(y),
                x_max: bbox.x_max.max(x),
                y_max: bbox.y_max.max(y),
            },
        )
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let bounds = self.bounds();
        let mut buf = BeBuffer::new()
            .push(self.contours.len() as i16)
            .push(bounds.x_min)
            .push(bounds.y_min)
            .push(bounds.x_max)
            .push(bounds.y_max);
        let mut end = 0u16;
        for contour in &self.contours {
            end += contour.len() as u16;
            buf = buf.push(end.wrapping_sub(1));
        }
        buf = buf
            .push(self.instructions.len() as u16)
            .extend_bytes(&self.instructions);

        let mut flags = Vec::new();
        let mut xs = BeBuffer::new();
        let mut ys = BeBuffer::new();
        let (mut prev_x, mut prev_y) = (0i16, 0i16);
        for &(x, y, on_curve) in self.contours.iter().flatten() {
            let mut flag = if on_curve { ON_CURVE } else { 0 };
            let dx = x.wrapping_sub(prev_x);
            let dy = y.wrapping_sub(prev_y);
            (prev_x, prev_y) = (x, y);
            xs = encode_delta(xs, dx, &mut flag, X_SHORT, X_SAME_OR_POSITIVE);
            ys = encode_delta(ys, dy, &mut flag, Y_SHORT, Y_SAME_OR_POSITIVE);
            flags.push(flag);
        }
        buf.extend_bytes(&compress_flags(&flags))
            .extend_bytes(&xs)
            .extend_bytes(&ys)
            .into_vec()
    }
}

fn encode_delta(buf: BeBuffer, delta: i16, flag: &mut u8, short: u8, same: u8) -> BeBuffer {
    if delta == 0 {
        *flag |= same;
        buf
    } else if delta.unsigned_abs() <= 255 {
        *flag |= short;
        if delta > 0 {
            *flag |= same;
        }
        buf.push(delta.unsigned_abs() as u8)
    } else {
        buf.push(delta)
    }
}

fn compress_flags(flags: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(flags.len());
    let mut i = 0;
    while i < flags.len() {
        let flag = flags[i];
        let run = flags[i..]
            .iter()
            .take(256)
            .take_while(|f| **f == flag)
            .count();
        if run > 1 {
            out.push(flag | REPEAT);
            out.push((run - 1) as u8);
        } else {
            out.push(flag);
        }
        i += run;
    }
    out
}

const ARG_1_AND_2_ARE_WORDS: u16 = 0x0001;
const ARGS_ARE_XY_VALUES: u16 = 0x0002;
const WE_HAVE_A_SCALE: u16 = 0x0008;
const MORE_COMPONENTS: u16 = 0x0020;
const WE_HAVE_AN_X_AND_Y_SCALE: u16 = 0x0040;
const WE_HAVE_A_TWO_BY_TWO: u16 = 0x0080;
const SCALED_COMPONENT_OFFSET: u16 = 0x0800;

/// How a component is positioned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ComponentAnchor {
    Offset(i16, i16),
    /// Align point `component` of the component with point `base` of the
    /// glyph built so far.
    Point { base: u16, component: u16 },
}

/// The optional scale or matrix of a component.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ComponentScale {
    #[default]
    None,
    Uniform(f32),
    XY(f32, f32),
    /// `[xx, yx, xy, yy]`, in file order.
    TwoByTwo([f32; 4]),
}

/// One component record of a composite glyph.
#[derive(Clone, Debug, PartialEq)]
pub struct Component {
    pub glyph: u16,
    pub anchor: ComponentAnchor,
    pub scale: ComponentScale,
    pub scaled_offset: bool,
    pub word_args: bool,
}

impl Component {
    pub fn offset(glyph: u16, x: i16, y: i16) -> Self {
        Component {
            glyph,
            anchor: ComponentAnchor::Offset(x, y),
            scale: ComponentScale::None,
            scaled_offset: false,
            word_args: false,
        }
    }

    pub fn point(glyph: u16, base: u16, component: u16) -> Self {
        Component {
            anchor: ComponentAnchor::Point { base, component },
            ..Component::offset(glyph, 0, 0)
        }
    }

    pub fn with_scale(mut self, scale: ComponentScale) -> Self {
        self.scale = scale;
        self
    }

    /// Set `SCALED_COMPONENT_OFFSET`.
    pub fn with_scaled_offset(mut self) -> Self {
        self.scaled_offset = true;
        self
    }

    /// Force 16-bit arguments even when the values fit in a byte.
    pub fn with_word_args(mut self) -> Self {
        self.word_args = true;
        self
    }

    fn encode(&self, buf: BeBuffer, more: bool) -> BeBuffer {
        let mut flags = 0u16;
        if more {
            flags |= MORE_COMPONENTS;
        }
        if self.scaled_offset {
            flags |= SCALED_COMPONENT_OFFSET;
        }
        let (arg1, arg2, words) = match self.anchor {
            ComponentAnchor::Offset(x, y) => {
                flags |= ARGS_ARE_XY_VALUES;
                let fits = i8::try_from(x).is_ok() && i8::try_from(y).is_ok();
                (x as u16, y as u16, !fits)
            }
            ComponentAnchor::Point { base, component } => {
                (base, component, base > 255 || component > 255)
            }
        };
        let words = words || self.word_args;
        if words {
            flags |= ARG_1_AND_2_ARE_WORDS;
        }
        flags |= match self.scale {
            ComponentScale::None => 0,
            ComponentScale::Uniform(_) => WE_HAVE_A_SCALE,
            ComponentScale::XY(..) => WE_HAVE_AN_X_AND_Y_SCALE,
            ComponentScale::TwoByTwo(_) => WE_HAVE_A_TWO_BY_TWO,
        };

        let mut buf = buf.push(flags).push(self.glyph);
        buf = if words {
            buf.push(arg1).push(arg2)
        } else {
            buf.push(arg1 as u8).push(arg2 as u8)
        };
        let scale = match self.scale {
            ComponentScale::None => vec![],
            ComponentScale::Uniform(s) => vec![s],
            ComponentScale::XY(x, y) => vec![x, y],
            ComponentScale::TwoByTwo(m) => m.to_vec(),
        };
        buf.extend(scale.into_iter().map(F2Dot14::from_f32))
    }
}

/// A composite glyph.
#[derive(Clone, Debug, Default)]
pub struct CompositeGlyph {
    components: Vec<Component>,
    bounds: BoundingBox<i16>,
}

impl CompositeGlyph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// The bounds written to the glyph header; readers do not use them.
    pub fn bounds(mut self, bounds: BoundingBox<i16>) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BeBuffer::new()
            .push(-1i16)
            .push(self.bounds.x_min)
            .push(self.bounds.y_min)
            .push(self.bounds.x_max)
            .push(self.bounds.y_max);
        for (i, component) in self.components.iter().enumerate() {
            buf = component.encode(buf, i + 1 < self.components.len());
        }
        buf.into_vec()
    }
}

/// A `cmap` table with one encoding record per `(platform, encoding, subtable)`.
pub fn cmap(records: &[(u16, u16, &[u8])]) -> Vec<u8> {
    let mut buf = BeBuffer::new().push(0u16).push(records.len() as u16);
    let mut offset = 4 + 8 * records.len() as u32;
    for (platform, encoding, subtable) in records {
        buf = buf.push(*platform).push(*encoding).push(offset);
        offset += subtable.len() as u32;
    }
    for (_, _, subtable) in records {
        buf = buf.extend_bytes(subtable);
    }
    buf.into_vec()
}

/// A format 0 subtable mapping byte codepoints to byte glyph ids.
pub fn cmap0(mappings: &[(u8, u8)]) -> Vec<u8> {
    let mut glyphs = [0u8; 256];
    for (cp, gid) in mappings {
        glyphs[*cp as usize] = *gid;
    }
    BeBuffer::new()
        .push(0u16)
        .push(262u16)
        .push(0u16)
        .extend(glyphs)
        .into_vec()
}

/// A format 2 subtable with no mappings.
pub fn cmap2() -> Vec<u8> {
    BeBuffer::new()
        .push(2u16)
        .push(6u16 + 512 + 8)
        .push(0u16)
        .extend([0u16; 256])
        .extend([0u16; 4])
        .into_vec()
}

/// A segment of a format 4 subtable.
#[derive(Clone, Debug)]
pub struct Cmap4Segment {
    pub start: u16,
    pub end: u16,
    pub id_delta: i16,
    /// When non-empty, the segment maps through `glyphIdArray`.
    pub glyph_ids: Vec<u16>,
}

impl Cmap4Segment {
    pub fn delta(start: u16, end: u16, id_delta: i16) -> Self {
        Cmap4Segment {
            start,
            end,
            id_delta,
            glyph_ids: Vec::new(),
        }
    }

    /// A segment starting at `start` with one glyph id per codepoint.
    pub fn array(start: u16, glyph_ids: &[u16]) -> Self {
        Cmap4Segment {
            start,
            end: start + glyph_ids.len() as u16 - 1,
            id_delta: 0,
            glyph_ids: glyph_ids.to_vec(),
        }
    }
}

/// A format 4 subtable. The terminating `0xFFFF` segment is appended.
pub fn cmap4(segments: &[Cmap4Segment]) -> Vec<u8> {
    let mut segments = segments.to_vec();
    segments.push(Cmap4Segment::delta(0xFFFF, 0xFFFF, 1));
    let seg_count = segments.len() as u16;
    let entry_selector = (seg_count as u32).ilog2() as u16;
    let search_range = 2 * (1u16 << entry_selector);

    let mut id_range_offsets = Vec::new();
    let mut glyph_id_array = Vec::new();
    for (i, segment) in segments.iter().enumerate() {
        if segment.glyph_ids.is_empty() {
            id_range_offsets.push(0u16);
        } else {
            let offset = 2 * (seg_count as usize - i) + 2 * glyph_id_array.len();
            id_range_offsets.push(offset as u16);
            glyph_id_array.extend_from_slice(&segment.glyph_ids);
        }
    }

    let mut buf = BeBuffer::new()
        .push(4u16)
        .push_with_tag(0u16, "length")
        .push(0u16)
        .push(seg_count * 2)
        .push(search_range)
        .push(entry_selector)
        .push(seg_count * 2 - search_range)
        .extend(segments.iter().map(|s| s.end))
        .push(0u16)
        .extend(segments.iter().map(|s| s.start))
        .extend(segments.iter().map(|s| s.id_delta))
        .extend(id_range_offsets)
        .extend(glyph_id_array);
    let len = buf.len() as u16;
    buf.write_at("length", len);
    buf.into_vec()
}

/// A format 4 subtable with one single-codepoint segment per mapping.
pub fn cmap4_from_pairs(mappings: &[(u16, u16)]) -> Vec<u8> {
    let mut mappings = mappings.to_vec();
    mappings.sort();
    let segments: Vec<_> = mappings
        .iter()
        .map(|(cp, gid)| Cmap4Segment::delta(*cp, *cp, gid.wrapping_sub(*cp) as i16))
        .collect();
    cmap4(&segments)
}

/// A format 6 subtable.
pub fn cmap6(first_code: u16, glyph_ids: &[u16]) -> Vec<u8> {
    BeBuffer::new()
        .push(6u16)
        .push(10 + 2 * glyph_ids.len() as u16)
        .push(0u16)
        .push(first_code)
        .push(glyph_ids.len() as u16)
        .extend(glyph_ids.iter().copied())
        .into_vec()
}

/// A format 12 subtable of `(startChar, endChar, startGlyphID)` groups.
pub fn cmap12(groups: &[(u32, u32, u32)]) -> Vec<u8> {
    let mut buf = BeBuffer::new()
        .push(12u16)
        .push(0u16)
        .push(16 + 12 * groups.len() as u32)
        .push(0u32)
        .push(groups.len() as u32);
    for (start, end, glyph) in groups {
        buf = buf.push(*start).push(*end).push(*glyph);
    }
    buf.into_vec()
}
