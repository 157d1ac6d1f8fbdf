use bitvec::prelude::*;
use bytes::Bytes;

use crate::{bits, error::Result, utf8::utf8_len, varint, Reader, Writer};

/// Defines the wire encoding of Rust types in terms of the
/// [`Writer`] and [`Reader`] primitives.
///
/// Like the primitives themselves, encoded values carry no type
/// information. Types that need a length to be decoded store it
/// as a leading varint.
pub trait WireEncoding {
    /// Gets the size of `self` in bytes when encoded.
    fn encoded_len(&self) -> usize;

    /// Writes `self` to the given `dest` writer.
    fn write(&self, dest: &mut Writer) -> Result<()>;

    /// Tries to read a `Self` value out of the given `source`.
    fn read(source: &mut Reader<'_>) -> Result<Self>
    where
        Self: Sized;
}

/// Encodes `value` into an owned buffer of exactly the right size.
pub fn to_bytes<T: WireEncoding + ?Sized>(value: &T) -> Result<Bytes> {
    let mut writer = Writer::with_capacity(value.encoded_len());
    value.write(&mut writer)?;
    Ok(writer.into_bytes())
}

#[inline]
fn uvarint_len(value: usize) -> usize {
    varint::encoded_len(value as u64).unwrap_or(varint::MAX_LEN)
}

macro_rules! impl_primitive_encoding {
    ($(($ty:ty, $read:ident, $write:ident)),* $(,)?) => {
        $(
            impl WireEncoding for $ty {
                fn encoded_len(&self) -> usize {
                    std::mem::size_of::<$ty>()
                }

                fn write(&self, dest: &mut Writer) -> Result<()> {
                    dest.$write(*self);
                    Ok(())
                }

                fn read(source: &mut Reader<'_>) -> Result<Self> {
                    source.$read()
                }
            }
        )*
    };
}

impl_primitive_encoding! {
    (u8, read_u8, write_u8),
    (u32, read_u32, write_u32),
    (u64, read_u64, write_u64),
    (f32, read_f32, write_f32),
}

/// Stored as one byte; any non-zero byte is read as `true`.
///
/// Use a [`BitVec`] to pack many booleans densely.
impl WireEncoding for bool {
    fn encoded_len(&self) -> usize {
        1
    }

    fn write(&self, dest: &mut Writer) -> Result<()> {
        dest.write_u8(u8::from(*self));
        Ok(())
    }

    fn read(source: &mut Reader<'_>) -> Result<Self> {
        source.read_u8().map(|v| v != 0)
    }
}

impl WireEncoding for String {
    fn encoded_len(&self) -> usize {
        match utf8_len(self) {
            0 => 1,
            len => uvarint_len(len) + len,
        }
    }

    fn write(&self, dest: &mut Writer) -> Result<()> {
        dest.write_str(self).map(drop)
    }

    fn read(source: &mut Reader<'_>) -> Result<Self> {
        source.read_string()
    }
}

impl WireEncoding for BitVec<u8, Lsb0> {
    fn encoded_len(&self) -> usize {
        uvarint_len(self.len()) + bits::packed_len(self.len())
    }

    fn write(&self, dest: &mut Writer) -> Result<()> {
        dest.write_uvarint(self.len() as u64)?.write_bitslice(self);
        Ok(())
    }

    fn read(source: &mut Reader<'_>) -> Result<Self> {
        source.atomic(|source| {
            let len = source.read_uvarint()?;
            let len = usize::try_from(len).unwrap_or(usize::MAX);
            source.read_bitslice(len).map(BitVec::from_bitslice)
        })
    }
}

impl WireEncoding for Bytes {
    fn encoded_len(&self) -> usize {
        uvarint_len(self.len()) + self.len()
    }

    fn write(&self, dest: &mut Writer) -> Result<()> {
        dest.write_uvarint(self.len() as u64)?.write_bytes(self);
        Ok(())
    }

    fn read(source: &mut Reader<'_>) -> Result<Self> {
        source.atomic(|source| {
            let len = source.read_uvarint()?;
            let len = usize::try_from(len).unwrap_or(usize::MAX);
            source.read_bytes(len)
        })
    }
}

/// Stored as a presence byte followed by the value, if any.
///
/// Any non-zero presence byte is read as [`Some`].
impl<T: WireEncoding> WireEncoding for Option<T> {
    fn encoded_len(&self) -> usize {
        1 + self.as_ref().map_or(0, T::encoded_len)
    }

    fn write(&self, dest: &mut Writer) -> Result<()> {
        match self {
            Some(value) => {
                dest.write_u8(1);
                value.write(dest)
            }
            None => {
                dest.write_u8(0);
                Ok(())
            }
        }
    }

    fn read(source: &mut Reader<'_>) -> Result<Self> {
        source.atomic(|source| match source.read_u8()? {
            0 => Ok(None),
            _ => T::read(source).map(Some),
        })
    }
}

/// Stored as the element count followed by every element.
impl<T: WireEncoding> WireEncoding for Vec<T> {
    fn encoded_len(&self) -> usize {
        uvarint_len(self.len()) + self.iter().map(T::encoded_len).sum::<usize>()
    }

    fn write(&self, dest: &mut Writer) -> Result<()> {
        dest.write_uvarint(self.len() as u64)?;
        self.iter().try_for_each(|value| value.write(dest))
    }

    fn read(source: &mut Reader<'_>) -> Result<Self> {
        source.atomic(|source| {
            let len = source.read_uvarint()?;

            // Every element takes at least one byte, which bounds what
            // a corrupt count can make us allocate up front.
            let capacity = usize::try_from(len)
                .unwrap_or(usize::MAX)
                .min(source.remaining());
            let mut values = Vec::with_capacity(capacity);
            for _ in 0..len {
                values.push(T::read(source)?);
            }

            Ok(values)
        })
    }
}
