//! Custom array types

use std::marker::PhantomData;

use types::{FixedSize, Scalar};

use crate::font_data::FontData;
use crate::read::ReadError;

/// An array of big-endian scalars, read lazily from font data.
#[derive(Clone, Copy)]
pub struct ScalarArray<'a, T> {
    data: FontData<'a>,
    phantom: PhantomData<T>,
}

impl<'a, T: Scalar> ScalarArray<'a, T> {
    /// Create a new array over `data`.
    ///
    /// Returns an error if the length of the data is not a multiple of the
    /// size of `T`.
    pub fn new(data: FontData<'a>) -> Result<Self, ReadError> {
        if data.len() % T::RAW_BYTE_LEN != 0 {
            return Err(ReadError::InvalidArrayLen);
        }
        Ok(ScalarArray {
            data,
            phantom: PhantomData,
        })
    }

    /// The number of items in the array
    pub fn len(&self) -> usize {
        self.data.len() / T::RAW_BYTE_LEN
    }

    /// Returns `true` if the array contains no items.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the item at `idx`, if it is in bounds.
    pub fn get(&self, idx: usize) -> Option<T> {
        self.data
            .read_at(idx.checked_mul(T::RAW_BYTE_LEN)?)
            .ok()
    }

    /// The last item, if any.
    pub fn last(&self) -> Option<T> {
        self.len().checked_sub(1).and_then(|idx| self.get(idx))
    }

    /// Iterate over the items in the array.
    pub fn iter(&self) -> impl Iterator<Item = T> + 'a
    where
        T: 'a,
    {
        let data = self.data;
        (0..self.len()).filter_map(move |idx| data.read_at(idx * T::RAW_BYTE_LEN).ok())
    }

    /// The underlying bytes.
    pub fn font_data(&self) -> FontData<'a> {
        self.data
    }
}

impl<T: Scalar + std::fmt::Debug> std::fmt::Debug for ScalarArray<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
