//! Big-endian base-128 variable-length unsigned integers.
//!
//! A value is split into 7-bit digits which are stored most
//! significant digit first. Every digit byte except the last
//! one has its high bit set to mark that more digits follow.
//!
//! | value range                     | bytes |
//! |---------------------------------|-------|
//! | `0 ..= 0x7F`                    | 1     |
//! | `0x80 ..= 0x3FFF`               | 2     |
//! | `0x4000 ..= 0x1F_FFFF`          | 3     |
//! | `0x20_0000 ..= 0xFFF_FFFF`      | 4     |
//! | `0x1000_0000 ..= 0x7_FFFF_FFFF` | 5     |
//! | `0x8_0000_0000 ..= 0x3FF_FFFF_FFFF` | 6 |
//!
//! Larger values cannot be encoded.

use std::ops::Deref;

use crate::error::{underflow, Error, Result};

/// The maximum number of digit bytes of an encoded value.
pub const MAX_LEN: usize = 6;

/// The largest value that can be encoded.
pub const MAX_VALUE: u64 = (1 << (7 * MAX_LEN)) - 1;

const DIGIT_MASK: u8 = 0x7F;
const CONTINUATION_BIT: u8 = 0x80;
const CONTINUATION_WORD: u64 = 0x8080_8080_8080_8080;

/// Gets the number of bytes `value` occupies when encoded, or
/// [`None`] if it exceeds [`MAX_VALUE`].
#[inline]
pub const fn encoded_len(value: u64) -> Option<usize> {
    match value {
        0..=0x7F => Some(1),
        0x80..=0x3FFF => Some(2),
        0x4000..=0x1F_FFFF => Some(3),
        0x20_0000..=0xFFF_FFFF => Some(4),
        0x1000_0000..=0x7_FFFF_FFFF => Some(5),
        0x8_0000_0000..=MAX_VALUE => Some(6),
        _ => None,
    }
}

/// An encoded varint, ready to be appended to a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encoded {
    word: [u8; 8],
    len: u8,
}

impl Encoded {
    /// Gets the encoded digit bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.word[self.word.len() - self.len as usize..]
    }
}

impl Deref for Encoded {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for Encoded {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Encodes `value` into its digit bytes.
///
/// The digits are assembled inside a single machine word which
/// is then stored in big-endian order, so the caller can append
/// the whole value with one slice copy.
///
/// # Errors
///
/// Fails with [`Error::OutOfRange`] when `value` is larger than
/// [`MAX_VALUE`].
pub fn encode(value: u64) -> Result<Encoded> {
    let len = encoded_len(value).ok_or(Error::OutOfRange {
        value,
        max: MAX_VALUE,
    })?;

    // Spread the 7-bit digits over the low `len` bytes of the word,
    // the least significant digit ending up in the lowest byte.
    let mut word = 0u64;
    for digit in 0..len {
        word |= ((value >> (7 * digit)) & DIGIT_MASK as u64) << (8 * digit);
    }

    // Every byte above the lowest one is followed by another digit.
    let used = (1u64 << (8 * len)) - 1;
    word |= CONTINUATION_WORD & used & !0xFF;

    Ok(Encoded {
        word: word.to_be_bytes(),
        len: len as u8,
    })
}

/// Decodes a value from the start of `src`.
///
/// Returns the value and the number of bytes it occupied. The
/// encoding delimits itself, so any number of digits is accepted
/// as long as the result fits into a [`u64`].
///
/// # Errors
///
/// - [`Error::Underflow`] when `src` ends before the last digit.
/// - [`Error::OutOfRange`] when the digits overflow a [`u64`].
pub fn decode(src: &[u8]) -> Result<(u64, usize)> {
    let mut value = 0u64;
    for (idx, &byte) in src.iter().enumerate() {
        if value > u64::MAX >> 7 {
            return Err(Error::OutOfRange {
                value,
                max: u64::MAX,
            });
        }
        value = (value << 7) | (byte & DIGIT_MASK) as u64;

        if byte & CONTINUATION_BIT == 0 {
            return Ok((value, idx + 1));
        }
    }

    Err(underflow(src.len() + 1, src.len()))
}
