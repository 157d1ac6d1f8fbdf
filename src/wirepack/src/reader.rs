use bitvec::prelude::*;
use bytes::Bytes;
use wirepack_bytes_ext::CheckedBuf;

use crate::{
    bits,
    error::{underflow, Result},
    utf8::utf8_decode,
    varint,
};

/// A cursor which deserializes values from a borrowed byte slice
/// in the untagged wire format.
///
/// Integers are read in big-endian byte order, while [`f32`] values
/// are read in little-endian byte order, mirroring the
/// [`Writer`][crate::Writer].
///
/// Every read either succeeds and advances the cursor, or fails and
/// leaves the cursor where it was.
#[derive(Clone, Debug, Default)]
pub struct Reader<'de> {
    source: &'de [u8],
    pos: usize,
}

impl<'de> Reader<'de> {
    /// Creates a new reader over the given byte slice.
    #[inline]
    pub fn new(source: &'de [u8]) -> Self {
        Self { source, pos: 0 }
    }

    /// Returns the number of bytes that are still unread.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.source.len() - self.pos
    }

    /// Indicates whether all bytes have been read.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the offset of the next byte to read.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn rest(&self) -> &'de [u8] {
        &self.source[self.pos..]
    }

    /// Runs a fixed-size read of `needed` bytes over the unread
    /// part of the source.
    #[inline]
    fn read_checked<T>(
        &mut self,
        needed: usize,
        read: impl FnOnce(&mut &'de [u8]) -> Option<T>,
    ) -> Result<T> {
        let mut rest = self.rest();
        let value = read(&mut rest).ok_or_else(|| underflow(needed, self.remaining()))?;
        self.pos = self.source.len() - rest.len();

        Ok(value)
    }

    /// Runs `read` and rewinds the cursor if it fails.
    ///
    /// Use this to make a sequence of reads behave like one.
    #[inline]
    pub fn atomic<T>(&mut self, read: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let start = self.pos;
        read(self).map_err(|e| {
            self.pos = start;
            e
        })
    }

    /// Reads a [`u8`] value from the buffer, if possible.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_checked(1, |buf| buf.try_get_u8())
    }

    /// Reads a big-endian [`u32`] value from the buffer, if possible.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_checked(4, |buf| buf.try_get_u32())
    }

    /// Reads a big-endian [`u64`] value from the buffer, if possible.
    #[inline]
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_checked(8, |buf| buf.try_get_u64())
    }

    /// Reads a little-endian [`f32`] value from the buffer, if possible.
    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_checked(4, |buf| buf.try_get_f32_le())
    }

    /// Reads a variable-length unsigned integer from the buffer, if
    /// possible.
    ///
    /// See the [`varint`] module for the format.
    pub fn read_uvarint(&mut self) -> Result<u64> {
        let (value, len) = varint::decode(self.rest())?;
        self.pos += len;

        Ok(value)
    }

    /// Reads `n` bits packed by [`Writer::write_bits`][crate::Writer::write_bits]
    /// without copying them.
    ///
    /// This consumes all the bytes the bits were packed into; the
    /// padding bits of the final byte are not part of the result.
    pub fn read_bitslice(&mut self, n: usize) -> Result<&'de BitSlice<u8, Lsb0>> {
        let len = bits::packed_len(n);
        let bits = bits::view(self.rest(), n).ok_or_else(|| underflow(len, self.remaining()))?;
        self.pos += len;

        Ok(bits)
    }

    /// Reads `n` bits packed by [`Writer::write_bits`][crate::Writer::write_bits].
    #[inline]
    pub fn read_bits(&mut self, n: usize) -> Result<Vec<bool>> {
        self.read_bitslice(n).map(|bits| bits.iter().by_vals().collect())
    }

    /// Reads a string written by [`Writer::write_str`][crate::Writer::write_str].
    ///
    /// # Errors
    ///
    /// Besides running out of bytes, this fails with
    /// [`Error::InvalidUtf8`][crate::Error::InvalidUtf8] when the
    /// payload is not valid UTF-8.
    pub fn read_string(&mut self) -> Result<String> {
        self.atomic(|this| {
            let len = this.read_uvarint()?;
            if len == 0 {
                return Ok(String::new());
            }

            let len = usize::try_from(len).unwrap_or(usize::MAX);
            if len > this.remaining() {
                return Err(underflow(len, this.remaining()));
            }

            let start = this.pos;
            let s = utf8_decode(this.source, start, start + len)?;
            this.pos += len;

            Ok(s)
        })
    }

    /// Reads a copy of the next `n` bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize) -> Result<Bytes> {
        self.read_checked(n, |buf| buf.try_copy_to_bytes(n))
    }

    /// Skips over the next `n` bytes.
    #[inline]
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read_checked(n, |buf| buf.try_advance(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn fixed_width_byte_order() {
        let data: [u8; 16] = [
            0x01, 0x02, 0x03, 0x04, // u32
            0, 0, 0, 0, 0, 0, 0x01, 0x00, // u64
            0x00, 0x00, 0xC0, 0x3F, // f32
        ];
        let mut reader = Reader::new(&data);

        assert_eq!(reader.read_u32(), Ok(0x0102_0304));
        assert_eq!(reader.read_u64(), Ok(0x100));
        assert_eq!(reader.read_f32(), Ok(1.5));
        assert!(reader.is_empty());
    }

    #[test]
    fn underflow_does_not_advance() {
        let mut reader = Reader::new(&[1, 2, 3]);

        assert_eq!(
            reader.read_u32(),
            Err(Error::Underflow {
                needed: 4,
                remaining: 3
            })
        );
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.remaining(), 3);
    }

    #[test]
    fn truncated_varint_rewinds() {
        let mut reader = Reader::new(&[0x05, 0x82]);

        assert_eq!(reader.read_u8(), Ok(5));
        assert!(reader.read_uvarint().unwrap_err().is_underflow());
        assert_eq!(reader.position(), 1);
    }

    #[test]
    fn truncated_string_rewinds() {
        let mut reader = Reader::new(&[0x03, b'a', b'b']);

        assert_eq!(
            reader.read_string(),
            Err(Error::Underflow {
                needed: 3,
                remaining: 2
            })
        );
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn invalid_utf8_rewinds() {
        let mut reader = Reader::new(&[0x02, b'a', 0xFF]);

        assert_eq!(reader.read_string(), Err(Error::InvalidUtf8 { offset: 1 }));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn empty_string_consumes_one_byte() {
        let mut reader = Reader::new(&[0x00, 0x07]);

        assert_eq!(reader.read_string().as_deref(), Ok(""));
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn bits_consume_whole_bytes() {
        let mut reader = Reader::new(&[0b0000_0101, 0xEE]);

        assert_eq!(reader.read_bits(3), Ok(vec![true, false, true]));
        assert_eq!(reader.read_u8(), Ok(0xEE));
        assert!(reader.read_bits(1).unwrap_err().is_underflow());
    }

    #[test]
    fn huge_bit_count_underflows() {
        let mut reader = Reader::new(&[0u8; 4]);

        assert_eq!(
            reader.read_bits(usize::MAX),
            Err(Error::Underflow {
                needed: usize::MAX / 8 + 1,
                remaining: 4
            })
        );
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn skip_and_copy() {
        let data = [1u8, 2, 3, 4];
        let mut reader = Reader::new(&data);

        assert_eq!(reader.skip(1), Ok(()));
        assert_eq!(reader.read_bytes(2).as_deref(), Ok(&[2u8, 3][..]));
        assert!(reader.read_bytes(2).unwrap_err().is_underflow());
        assert_eq!(reader.skip(1), Ok(()));
        assert!(reader.is_empty());
    }
}
