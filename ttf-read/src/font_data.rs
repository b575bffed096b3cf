//! raw font bytes

use std::ops::{Bound, RangeBounds};

use types::{FixedSize, Scalar};

use crate::array::ScalarArray;
use crate::read::{FontReadWithArgs, ReadError};

/// A reference to raw binary font data.
///
/// This is a wrapper around a byte slice, that provides convenience methods
/// for parsing and validating that data.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontData<'a> {
    total_pos: u32,
    bytes: &'a [u8],
}

/// A cursor for reading a sequence of values.
///
/// Each read advances the position by the size of the value read, whether or
/// not the read succeeded.
pub struct Cursor<'a> {
    pos: usize,
    data: FontData<'a>,
}

impl<'a> FontData<'a> {
    /// Create a new `FontData` with these bytes.
    ///
    /// You generally don't need to do this? It is handled for you when loading
    /// data from disk, but may be useful in tests.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData {
            total_pos: 0,
            bytes,
        }
    }

    /// The length of the data, in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The position of the start of this data in the original buffer.
    pub fn total_pos(&self) -> u32 {
        self.total_pos
    }

    /// Returns self[pos..]
    pub fn split_off(&self, pos: usize) -> Option<FontData<'a>> {
        self.bytes.get(pos..).map(|bytes| FontData {
            bytes,
            total_pos: self.total_pos.saturating_add(pos as u32),
        })
    }

    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<FontData<'a>> {
        let start = match range.start_bound() {
            Bound::Unbounded => 0,
            Bound::Included(i) => *i,
            Bound::Excluded(i) => i.saturating_add(1),
        };
        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        let total_pos = self.total_pos.saturating_add(start as u32);
        self.bytes
            .get(bounds)
            .map(|bytes| FontData { bytes, total_pos })
    }

    /// Read a scalar at the provided location in the data.
    pub fn read_at<T: Scalar>(&self, offset: usize) -> Result<T, ReadError> {
        let end = offset
            .checked_add(T::RAW_BYTE_LEN)
            .ok_or(ReadError::OutOfBounds)?;
        self.bytes
            .get(offset..end)
            .and_then(T::read)
            .ok_or(ReadError::OutOfBounds)
    }

    pub fn read_with_args<T>(&self, offset: usize, args: &T::Args) -> Result<T, ReadError>
    where
        T: FontReadWithArgs<'a>,
    {
        self.split_off(offset)
            .ok_or(ReadError::OutOfBounds)
            .and_then(|data| T::read_with_args(data, args))
    }

    /// Interpret `len` items starting at `offset` as an array of scalars.
    pub fn read_array<T: Scalar>(
        &self,
        offset: usize,
        len: usize,
    ) -> Result<ScalarArray<'a, T>, ReadError> {
        let byte_len = len
            .checked_mul(T::RAW_BYTE_LEN)
            .ok_or(ReadError::OutOfBounds)?;
        let end = offset.checked_add(byte_len).ok_or(ReadError::OutOfBounds)?;
        self.slice(offset..end)
            .ok_or(ReadError::OutOfBounds)
            .and_then(ScalarArray::new)
    }

    pub(crate) fn check_in_bounds(&self, offset: usize) -> Result<(), ReadError> {
        self.bytes
            .get(..offset)
            .ok_or(ReadError::OutOfBounds)
            .map(|_| ())
    }

    pub(crate) fn cursor(&self) -> Cursor<'a> {
        Cursor {
            pos: 0,
            data: *self,
        }
    }

    /// Return the data as a byte slice
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> Cursor<'a> {
    pub(crate) fn advance_by(&mut self, n_bytes: usize) {
        self.pos = self.pos.saturating_add(n_bytes);
    }

    pub(crate) fn read<T: Scalar>(&mut self) -> Result<T, ReadError> {
        let temp = self.data.read_at(self.pos);
        self.pos = self.pos.saturating_add(T::RAW_BYTE_LEN);
        temp
    }

    pub(crate) fn read_array<T: Scalar>(
        &mut self,
        len: usize,
    ) -> Result<ScalarArray<'a, T>, ReadError> {
        let temp = self.data.read_array(self.pos, len);
        self.advance_by(len.saturating_mul(T::RAW_BYTE_LEN));
        temp
    }

    /// return the current position, or an error if we are out of bounds
    pub(crate) fn position(&self) -> Result<usize, ReadError> {
        self.data.check_in_bounds(self.pos).map(|_| self.pos)
    }

    // used when handling fields with an implicit length, which must be at the
    // end of a table.
    pub(crate) fn remaining(self) -> Result<FontData<'a>, ReadError> {
        self.data.split_off(self.pos).ok_or(ReadError::OutOfBounds)
    }
}

impl AsRef<[u8]> for FontData<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl<'a> From<&'a [u8]> for FontData<'a> {
    fn from(src: &'a [u8]) -> FontData<'a> {
        FontData::new(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_past_end() {
        let data = FontData::new(&[0, 1, 2]);
        assert_eq!(data.read_at::<u16>(1).unwrap(), 0x0102);
        assert!(matches!(data.read_at::<u16>(2), Err(ReadError::OutOfBounds)));
        assert!(matches!(
            data.read_at::<u32>(usize::MAX - 1),
            Err(ReadError::OutOfBounds)
        ));
    }

    #[test]
    fn split_tracks_position() {
        let bytes = [0u8; 10];
        let data = FontData::new(&bytes);
        let tail = data.split_off(4).unwrap();
        assert_eq!(tail.total_pos(), 4);
        assert_eq!(tail.slice(2..4).unwrap().total_pos(), 6);
        assert!(data.split_off(11).is_none());
        assert_eq!(data.split_off(10).unwrap().len(), 0);
    }

    #[test]
    fn cursor_advances_on_failure() {
        let data = FontData::new(&[0xFF, 0xFE, 7]);
        let mut cursor = data.cursor();
        assert_eq!(cursor.read::<i16>().unwrap(), -2);
        assert!(cursor.read::<u16>().is_err());
        assert!(cursor.position().is_err());
    }

    #[test]
    fn array_overflow_is_an_error() {
        let data = FontData::new(&[0; 4]);
        assert!(data.read_array::<u32>(0, usize::MAX).is_err());
        assert_eq!(data.read_array::<u16>(0, 2).unwrap().len(), 2);
    }
}
