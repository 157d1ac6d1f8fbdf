use bitvec::prelude::*;
use bytes::{BufMut, Bytes, BytesMut};
use wirepack_utils::tracing;

use crate::{
    bits,
    error::Result,
    utf8::{utf8_encode, utf8_len},
    varint,
};

/// The capacity a [`Writer`] starts out with.
pub const INITIAL_CAPACITY: usize = 64;

/// A self-growing buffer which serializes values into the
/// untagged wire format.
///
/// Integers are written in big-endian byte order, while [`f32`]
/// values are written in little-endian byte order. Nothing about
/// the type of a value is stored, so a [`Reader`][crate::Reader]
/// has to call the matching methods in the same order.
///
/// All write methods return the writer itself for chaining:
///
/// ```
/// # fn main() -> wirepack::Result<()> {
/// let mut writer = wirepack::Writer::new();
/// writer.write_u8(1).write_str("ab")?.write_uvarint(300)?.write_f32(1.5);
///
/// assert_eq!(writer.view(), [1, 2, b'a', b'b', 0x82, 0x2C, 0x00, 0x00, 0xC0, 0x3F]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Writer {
    inner: BytesMut,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a new, empty [`Writer`] with [`INITIAL_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates a new, empty [`Writer`] which can hold `capacity`
    /// bytes before it has to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: BytesMut::with_capacity(capacity),
        }
    }

    /// Returns the number of bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Indicates whether nothing has been written yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of bytes the writer can hold without
    /// growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// Gets a view of all the bytes written so far.
    ///
    /// The view borrows the writer, so it has to be dropped before
    /// the next write:
    ///
    /// ```compile_fail
    /// let mut writer = wirepack::Writer::new();
    /// writer.write_u8(1);
    ///
    /// let view = writer.view();
    /// writer.write_u8(2);
    /// assert_eq!(view, [1]);
    /// ```
    ///
    /// Use [`Writer::to_bytes`] to retain the data across writes.
    #[inline]
    pub fn view(&self) -> &[u8] {
        &self.inner
    }

    /// Copies the bytes written so far into an owned buffer.
    #[inline]
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.inner)
    }

    /// Consumes the writer and returns the written bytes without
    /// copying them.
    #[inline]
    pub fn into_bytes(self) -> Bytes {
        self.inner.freeze()
    }

    /// Discards all written bytes while keeping the capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Makes room for `additional` more bytes, doubling the
    /// capacity as often as necessary.
    fn reserve(&mut self, additional: usize) {
        let len = self.inner.len();
        let capacity = self.inner.capacity();
        let required = len + additional;
        if required <= capacity {
            return;
        }

        let mut grown = capacity.max(INITIAL_CAPACITY);
        while grown < required {
            grown *= 2;
        }

        tracing::trace!(from = capacity, to = grown, "growing write buffer");
        self.inner.reserve(grown - len);
    }

    /// Writes a given [`u8`] value to the buffer.
    #[inline]
    pub fn write_u8(&mut self, v: u8) -> &mut Self {
        self.reserve(1);
        self.inner.put_u8(v);
        self
    }

    /// Writes a given [`u32`] value to the buffer in big-endian
    /// byte order.
    #[inline]
    pub fn write_u32(&mut self, v: u32) -> &mut Self {
        self.reserve(4);
        self.inner.put_u32(v);
        self
    }

    /// Writes a given [`u64`] value to the buffer in big-endian
    /// byte order.
    #[inline]
    pub fn write_u64(&mut self, v: u64) -> &mut Self {
        self.reserve(8);
        self.inner.put_u64(v);
        self
    }

    /// Writes a given [`f32`] value to the buffer in little-endian
    /// byte order.
    #[inline]
    pub fn write_f32(&mut self, v: f32) -> &mut Self {
        self.reserve(4);
        self.inner.put_f32_le(v);
        self
    }

    /// Writes a variable-length unsigned integer to the buffer.
    ///
    /// See the [`varint`] module for the format.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::OutOfRange`][crate::Error::OutOfRange] when
    /// `v` exceeds [`varint::MAX_VALUE`]. Nothing is written then.
    pub fn write_uvarint(&mut self, v: u64) -> Result<&mut Self> {
        let encoded = varint::encode(v).map_err(|e| {
            tracing::debug!(value = v, "rejecting varint out of range");
            e
        })?;

        Ok(self.write_bytes(&encoded))
    }

    /// Writes all bits in `bits` to the buffer.
    ///
    /// The bits are packed into whole bytes starting at the LSB,
    /// with zeroes filling the remainder of the last byte.
    #[inline]
    pub fn write_bits(&mut self, bits: &[bool]) -> &mut Self {
        let packed = bits::pack(bits.iter().copied());
        self.write_bytes(packed.as_raw_slice())
    }

    /// Writes all bits in `bits` to the buffer.
    ///
    /// Encodes like [`Writer::write_bits`].
    #[inline]
    pub fn write_bitslice(&mut self, bits: &BitSlice<u8, Lsb0>) -> &mut Self {
        let packed = bits::pack(bits.iter().by_vals());
        self.write_bytes(packed.as_raw_slice())
    }

    /// Writes a string to the buffer.
    ///
    /// The UTF-8 bytes of `s` are prefixed with their length as a
    /// variable-length integer. An empty string is a single zero
    /// byte.
    ///
    /// # Errors
    ///
    /// Fails when the length of `s` is out of range for the varint
    /// prefix. Nothing is written then.
    pub fn write_str(&mut self, s: &str) -> Result<&mut Self> {
        if s.is_empty() {
            return Ok(self.write_u8(0));
        }

        let len = utf8_len(s);
        let prefix = varint::encode(len as u64)?;
        self.reserve(prefix.len() + len);
        self.inner.put_slice(&prefix);

        let offset = self.inner.len();
        self.inner.resize(offset + len, 0);
        utf8_encode(s, &mut self.inner, offset);

        Ok(self)
    }

    /// Writes the bytes in `buf` to the buffer verbatim.
    ///
    /// No length is stored; readers must know it out of band.
    #[inline]
    pub fn write_bytes(&mut self, buf: &[u8]) -> &mut Self {
        self.reserve(buf.len());
        self.inner.put_slice(buf);
        self
    }
}
