//! The [table directory](https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory)

use types::Tag;

use crate::{FontData, FontRead, ReadError};

const TABLE_RECORD_LEN: usize = 16;
const TABLE_RECORDS_START: usize = 12;

/// The directory of tables at the start of an sfnt font file.
#[derive(Clone, Copy)]
pub struct TableDirectory<'a> {
    data: FontData<'a>,
    num_tables: u16,
}

/// A record in the table directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableRecord {
    /// Table identifier.
    pub tag: Tag,
    /// Checksum for the table. Not verified.
    pub checksum: u32,
    /// Offset from the beginning of the font data.
    pub offset: u32,
    /// Length of the table. Not trusted when reading.
    pub length: u32,
}

impl<'a> FontRead<'a> for TableDirectory<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let num_tables: u16 = data.read_at(4)?;
        data.check_in_bounds(TABLE_RECORDS_START + num_tables as usize * TABLE_RECORD_LEN)?;
        Ok(TableDirectory { data, num_tables })
    }
}

impl<'a> TableDirectory<'a> {
    /// The sfnt version; `0x00010000` for TrueType outlines.
    pub fn sfnt_version(&self) -> u32 {
        self.data.read_at(0).unwrap_or_default()
    }

    /// Number of tables.
    pub fn num_tables(&self) -> u16 {
        self.num_tables
    }

    /// Iterate over the table records, in file order.
    pub fn table_records(&self) -> impl Iterator<Item = TableRecord> + 'a {
        let data = self.data;
        (0..self.num_tables as usize).filter_map(move |i| {
            let pos = TABLE_RECORDS_START + i * TABLE_RECORD_LEN;
            Some(TableRecord {
                tag: data.read_at(pos).ok()?,
                checksum: data.read_at(pos + 4).ok()?,
                offset: data.read_at(pos + 8).ok()?,
                length: data.read_at(pos + 12).ok()?,
            })
        })
    }

    /// Find the record for `tag`.
    ///
    /// The search is linear; if the tag appears more than once the last
    /// record is returned.
    pub fn find(&self, tag: Tag) -> Option<TableRecord> {
        self.table_records()
            .filter(|record| record.tag == tag)
            .last()
    }
}

#[cfg(test)]
mod tests {
    use ttf_test_data::FontBuilder;

    use super::*;

    #[test]
    fn records_in_file_order() {
        let bytes = FontBuilder::new()
            .add_raw(Tag::new(b"glyf"), vec![0; 8])
            .add_raw(Tag::new(b"cmap"), vec![0; 4])
            .build();
        let dir = TableDirectory::read(FontData::new(&bytes)).unwrap();
        assert_eq!(dir.sfnt_version(), types::TT_SFNT_VERSION);
        assert_eq!(dir.num_tables(), 2);
        let records: Vec<_> = dir.table_records().collect();
        assert_eq!(records[0].tag, Tag::new(b"cmap"));
        assert_eq!(records[0].offset, 12 + 32);
        assert_eq!(records[0].length, 4);
        assert_eq!(records[1].tag, Tag::new(b"glyf"));
        assert_eq!(records[1].offset, 12 + 32 + 4);
        assert_eq!(dir.find(Tag::new(b"glyf")), Some(records[1]));
    }
}
