//! types for working with raw big-endian bytes

/// A trait for font scalars.
///
/// This is an internal trait for encoding and decoding big-endian bytes.
/// Every multi-byte value in a TrueType file is stored big-endian; reads go
/// through [`Scalar::read`], which fails (rather than panicking) when the
/// input is not exactly the size of the raw representation.
pub trait Scalar: Sized {
    /// The raw byte representation of this type.
    type Raw: bytemuck::Pod + AsRef<[u8]>;

    /// Create an instance of this type from raw big-endian bytes
    fn from_raw(raw: Self::Raw) -> Self;

    /// Encode this type as raw big-endian bytes
    fn to_raw(self) -> Self::Raw;

    /// Attempt to read an instance of this type from a byte slice.
    ///
    /// Returns `None` if the slice length is not equal to the size of the raw
    /// representation.
    fn read(bytes: &[u8]) -> Option<Self> {
        bytemuck::try_pod_read_unaligned::<Self::Raw>(bytes)
            .ok()
            .map(Self::from_raw)
    }
}

/// A type with a known encoded size.
///
/// This is implemented for every [`Scalar`], and is used to compute the
/// stride of arrays and the extent of reads.
pub trait FixedSize: Sized {
    /// The encoded size of this type, in bytes.
    const RAW_BYTE_LEN: usize;
}

impl<T: Scalar> FixedSize for T {
    const RAW_BYTE_LEN: usize = std::mem::size_of::<T::Raw>();
}

macro_rules! int_scalar {
    ($ty:ty, $raw:ty) => {
        impl crate::raw::Scalar for $ty {
            type Raw = $raw;
            fn to_raw(self) -> $raw {
                self.to_be_bytes()
            }

            fn from_raw(raw: $raw) -> $ty {
                Self::from_be_bytes(raw)
            }
        }
    };
}

int_scalar!(u8, [u8; 1]);
int_scalar!(i8, [u8; 1]);
int_scalar!(u16, [u8; 2]);
int_scalar!(i16, [u8; 2]);
int_scalar!(u32, [u8; 4]);
int_scalar!(i32, [u8; 4]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_reinterpretation() {
        // 0xFFB5 is -75 in two's complement
        assert_eq!(i16::read(&[0xFF, 0xB5]), Some(-75));
        assert_eq!(u16::read(&[0xFF, 0xB5]), Some(0xFFB5));
        assert_eq!(i8::read(&[0x80]), Some(-128));
    }

    #[test]
    fn wrong_len_is_none() {
        assert_eq!(u32::read(&[0, 1, 2]), None);
        assert_eq!(u16::read(&[0, 1, 2]), None);
        assert_eq!(u16::read(&[]), None);
    }

    #[test]
    fn raw_byte_len() {
        assert_eq!(u8::RAW_BYTE_LEN, 1);
        assert_eq!(i16::RAW_BYTE_LEN, 2);
        assert_eq!(u32::RAW_BYTE_LEN, 4);
    }

    #[test]
    fn big_endian_roundtrip() {
        assert_eq!(0x1234_u16.to_raw(), [0x12, 0x34]);
        assert_eq!(u32::from_raw([0, 1, 0, 0]), 0x10000);
    }
}
