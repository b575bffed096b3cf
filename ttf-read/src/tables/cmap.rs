//! The [cmap](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap) table

use std::ops::RangeInclusive;

use types::{GlyphId, Tag};

use crate::{array::ScalarArray, FontData, FontRead, ReadError};

/// 'cmap'
pub const TAG: Tag = Tag::new(b"cmap");

const ENCODING_RECORD_LEN: usize = 8;

/// The highest codepoint enumerated by [`CmapSubtable::iter`].
const MAX_UNICODE: u32 = 0x10FFFF;

/// The [cmap] table: a list of encoding records pointing at subtables.
///
/// [cmap]: https://docs.microsoft.com/en-us/typography/opentype/spec/cmap
#[derive(Clone, Copy)]
pub struct Cmap<'a> {
    data: FontData<'a>,
    num_tables: u16,
}

impl<'a> FontRead<'a> for Cmap<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let num_tables: u16 = data.read_at(2)?;
        data.check_in_bounds(4 + num_tables as usize * ENCODING_RECORD_LEN)?;
        Ok(Cmap { data, num_tables })
    }
}

/// A platform/encoding pair and the offset of its subtable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodingRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    /// Offset from the start of the cmap table.
    pub subtable_offset: u32,
}

impl EncodingRecord {
    /// Windows Unicode BMP (3, 1), Windows Unicode full (3, 10), or any
    /// Unicode platform (0) encoding.
    pub fn is_unicode(&self) -> bool {
        (self.platform_id == 3 && matches!(self.encoding_id, 1 | 10)) || self.platform_id == 0
    }
}

impl<'a> Cmap<'a> {
    /// Number of encoding records.
    pub fn num_tables(&self) -> u16 {
        self.num_tables
    }

    /// Iterate over the encoding records, in file order.
    pub fn encoding_records(&self) -> impl Iterator<Item = EncodingRecord> + 'a {
        let data = self.data;
        (0..self.num_tables as usize).filter_map(move |i| {
            let pos = 4 + i * ENCODING_RECORD_LEN;
            Some(EncodingRecord {
                platform_id: data.read_at(pos).ok()?,
                encoding_id: data.read_at(pos + 2).ok()?,
                subtable_offset: data.read_at(pos + 4).ok()?,
            })
        })
    }

    /// Read the subtable referenced by `record`.
    ///
    /// Formats other than 0, 4, 6 and 12 fail with
    /// [`ReadError::InvalidFormat`].
    pub fn subtable(&self, record: &EncodingRecord) -> Result<CmapSubtable<'a>, ReadError> {
        self.data
            .split_off(record.subtable_offset as usize)
            .ok_or(ReadError::OutOfBounds)
            .and_then(CmapSubtable::read)
    }
}

/// A supported cmap subtable.
#[derive(Clone)]
pub enum CmapSubtable<'a> {
    Format0(Cmap0<'a>),
    Format4(Cmap4<'a>),
    Format6(Cmap6<'a>),
    Format12(Cmap12<'a>),
}

impl<'a> FontRead<'a> for CmapSubtable<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let format: u16 = data.read_at(0)?;
        match format {
            0 => Cmap0::read(data).map(Self::Format0),
            4 => Cmap4::read(data).map(Self::Format4),
            6 => Cmap6::read(data).map(Self::Format6),
            12 => Cmap12::read(data).map(Self::Format12),
            other => Err(ReadError::InvalidFormat(other as i64)),
        }
    }
}

impl<'a> CmapSubtable<'a> {
    pub fn format(&self) -> u16 {
        match self {
            Self::Format0(_) => 0,
            Self::Format4(_) => 4,
            Self::Format6(_) => 6,
            Self::Format12(_) => 12,
        }
    }

    /// The raw data of the subtable, starting at its format field.
    pub fn offset_data(&self) -> FontData<'a> {
        match self {
            Self::Format0(table) => table.data,
            Self::Format4(table) => table.data,
            Self::Format6(table) => table.data,
            Self::Format12(table) => table.data,
        }
    }

    /// Maps a codepoint to a nominal glyph identifier.
    ///
    /// Returns `None` if the codepoint is not covered or a read fails. A
    /// covered codepoint may still map to glyph 0.
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        let codepoint = codepoint.into();
        match self {
            Self::Format0(table) => table.map_codepoint(codepoint),
            Self::Format4(table) => table.map_codepoint(codepoint),
            Self::Format6(table) => table.map_codepoint(codepoint),
            Self::Format12(table) => table.map_codepoint(codepoint),
        }
    }

    /// Iterate over all `(codepoint, glyph)` pairs with a nonzero glyph, in
    /// increasing codepoint order.
    ///
    /// Codepoints covered by more than one range are reported once.
    pub fn iter(&self) -> CmapIter<'a> {
        CmapIter {
            subtable: self.clone(),
            range_idx: 0,
            current: None,
            last: None,
        }
    }

    /// The `idx`th range of codepoints covered by the subtable.
    fn codepoint_range(&self, idx: usize) -> Option<RangeInclusive<u32>> {
        match self {
            Self::Format0(table) => {
                let len = table.covered_len();
                (idx == 0 && len > 0).then(|| 0..=len - 1)
            }
            Self::Format4(table) => {
                let start = table.start_codes.get(idx)? as u32;
                let end = table.end_codes.get(idx)? as u32;
                Some(start..=end)
            }
            Self::Format6(table) => {
                let count = table.glyph_id_array.len() as u32;
                let first = table.first_code as u32;
                (idx == 0 && count > 0).then(|| first..=first + count - 1)
            }
            Self::Format12(table) => {
                let (start, end, _) = table.group(idx)?;
                Some(start..=end.min(MAX_UNICODE))
            }
        }
    }
}

/// Iterator over the mappings of a [`CmapSubtable`].
#[derive(Clone)]
pub struct CmapIter<'a> {
    subtable: CmapSubtable<'a>,
    range_idx: usize,
    current: Option<RangeInclusive<u32>>,
    last: Option<u32>,
}

impl Iterator for CmapIter<'_> {
    type Item = (u32, GlyphId);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(codepoint) = self.current.as_mut().and_then(|range| range.next()) {
                if self.last.is_some_and(|last| codepoint <= last) {
                    continue;
                }
                self.last = Some(codepoint);
                match self.subtable.map_codepoint(codepoint) {
                    Some(gid) if gid != GlyphId::NOTDEF => return Some((codepoint, gid)),
                    _ => continue,
                }
            }
            let range = self.subtable.codepoint_range(self.range_idx)?;
            self.range_idx += 1;
            // skip ranges entirely below what we've already reported
            self.current = Some(match self.last {
                Some(last) if *range.start() <= last => last.saturating_add(1)..=*range.end(),
                _ => range,
            });
        }
    }
}

/// [cmap format 0](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-0-byte-encoding-table):
/// a byte array indexed by codepoint.
#[derive(Clone, Copy)]
pub struct Cmap0<'a> {
    data: FontData<'a>,
    length: u16,
}

impl<'a> FontRead<'a> for Cmap0<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        Ok(Cmap0 {
            data,
            length: data.read_at(2)?,
        })
    }
}

impl Cmap0<'_> {
    /// Codepoints below this value are covered.
    fn covered_len(&self) -> u32 {
        (self.length as u32).saturating_sub(6)
    }

    pub fn map_codepoint(&self, codepoint: u32) -> Option<GlyphId> {
        if codepoint >= self.covered_len() {
            return None;
        }
        self.data
            .read_at::<u8>(6 + codepoint as usize)
            .ok()
            .map(|gid| GlyphId::new(gid as u32))
    }
}

/// [cmap format 4](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values):
/// segment mapping to delta values.
#[derive(Clone, Copy)]
pub struct Cmap4<'a> {
    data: FontData<'a>,
    end_codes: ScalarArray<'a, u16>,
    start_codes: ScalarArray<'a, u16>,
    id_deltas: ScalarArray<'a, i16>,
    id_range_offsets: ScalarArray<'a, u16>,
    id_range_offsets_pos: usize,
}

impl<'a> FontRead<'a> for Cmap4<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let seg_count_x2: u16 = data.read_at(6)?;
        let seg_count = seg_count_x2 as usize / 2;
        let end_codes = data.read_array(14, seg_count)?;
        // skip reservedPad
        let start_codes_pos = 14 + seg_count * 2 + 2;
        let start_codes = data.read_array(start_codes_pos, seg_count)?;
        let id_deltas = data.read_array(start_codes_pos + seg_count * 2, seg_count)?;
        let id_range_offsets_pos = start_codes_pos + seg_count * 4;
        let id_range_offsets = data.read_array(id_range_offsets_pos, seg_count)?;
        Ok(Cmap4 {
            data,
            end_codes,
            start_codes,
            id_deltas,
            id_range_offsets,
            id_range_offsets_pos,
        })
    }
}

impl Cmap4<'_> {
    /// Number of segments, including the final 0xFFFF segment.
    pub fn seg_count(&self) -> usize {
        self.end_codes.len()
    }

    /// Maps a codepoint to a nominal glyph identifier.
    pub fn map_codepoint(&self, codepoint: u32) -> Option<GlyphId> {
        let codepoint = u16::try_from(codepoint).ok()?;
        // find the first segment whose end code is >= codepoint
        let mut lo = 0;
        let mut hi = self.seg_count();
        while lo < hi {
            let mid = (lo + hi) / 2;
            if self.end_codes.get(mid)? < codepoint {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        let start_code = self.start_codes.get(lo)?;
        if codepoint < start_code {
            return None;
        }
        let id_delta = self.id_deltas.get(lo)? as u16;
        let id_range_offset = self.id_range_offsets.get(lo)? as usize;
        if id_range_offset == 0 {
            return Some(GlyphId::from(codepoint.wrapping_add(id_delta)));
        }
        let pos = self.id_range_offsets_pos
            + lo * 2
            + id_range_offset
            + (codepoint - start_code) as usize * 2;
        // the array value is the glyph id; idDelta applies only to direct mappings
        self.data.read_at::<u16>(pos).ok().map(GlyphId::from)
    }
}

/// [cmap format 6](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-6-trimmed-table-mapping):
/// a dense array for a single range of codepoints.
#[derive(Clone, Copy)]
pub struct Cmap6<'a> {
    data: FontData<'a>,
    first_code: u16,
    glyph_id_array: ScalarArray<'a, u16>,
}

impl<'a> FontRead<'a> for Cmap6<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let first_code = data.read_at(6)?;
        let entry_count: u16 = data.read_at(8)?;
        Ok(Cmap6 {
            data,
            first_code,
            glyph_id_array: data.read_array(10, entry_count as usize)?,
        })
    }
}

impl Cmap6<'_> {
    pub fn map_codepoint(&self, codepoint: u32) -> Option<GlyphId> {
        let idx = codepoint.checked_sub(self.first_code as u32)?;
        self.glyph_id_array.get(idx as usize).map(GlyphId::from)
    }
}

/// [cmap format 12](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-12-segmented-coverage):
/// sequential groups of 32-bit codepoints.
#[derive(Clone, Copy)]
pub struct Cmap12<'a> {
    data: FontData<'a>,
    // flattened (startCharCode, endCharCode, startGlyphID) triples
    groups: ScalarArray<'a, u32>,
}

const SEQUENTIAL_MAP_GROUP_LEN: usize = 3;

impl<'a> FontRead<'a> for Cmap12<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let num_groups: u32 = data.read_at(12)?;
        let len = (num_groups as usize)
            .checked_mul(SEQUENTIAL_MAP_GROUP_LEN)
            .ok_or(ReadError::OutOfBounds)?;
        Ok(Cmap12 {
            data,
            groups: data.read_array(16, len)?,
        })
    }
}

impl Cmap12<'_> {
    pub fn num_groups(&self) -> usize {
        self.groups.len() / SEQUENTIAL_MAP_GROUP_LEN
    }

    /// The `(start, end, start_glyph_id)` of the group at `idx`.
    pub fn group(&self, idx: usize) -> Option<(u32, u32, u32)> {
        let base = idx.checked_mul(SEQUENTIAL_MAP_GROUP_LEN)?;
        Some((
            self.groups.get(base)?,
            self.groups.get(base + 1)?,
            self.groups.get(base + 2)?,
        ))
    }

    /// Maps a codepoint to a nominal glyph identifier.
    pub fn map_codepoint(&self, codepoint: u32) -> Option<GlyphId> {
        let mut lo = 0;
        let mut hi = self.num_groups();
        while lo < hi {
            let mid = (lo + hi) / 2;
            let (start, end, start_glyph_id) = self.group(mid)?;
            if codepoint < start {
                hi = mid;
            } else if codepoint > end {
                lo = mid + 1;
            } else {
                return Some(GlyphId::new(
                    start_glyph_id.wrapping_add(codepoint - start),
                ));
            }
        }
        None
    }
}
