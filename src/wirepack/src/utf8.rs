//! UTF-8 text in and out of byte spans.

use crate::error::{Error, Result};

/// Gets the length of `s` in UTF-8 encoded bytes.
#[inline]
pub fn utf8_len(s: &str) -> usize {
    s.len()
}

/// Stores the UTF-8 bytes of `s` into `dest`, starting at `offset`.
///
/// # Panics
///
/// Panics if `dest` lacks room for [`utf8_len`] bytes past `offset`.
#[inline]
pub fn utf8_encode(s: &str, dest: &mut [u8], offset: usize) {
    dest[offset..offset + s.len()].copy_from_slice(s.as_bytes());
}

/// Decodes the bytes in `src[start..end]` into an owned string.
///
/// # Panics
///
/// Panics if `start..end` is not a valid range of `src`.
pub fn utf8_decode(src: &[u8], start: usize, end: usize) -> Result<String> {
    std::str::from_utf8(&src[start..end])
        .map(str::to_owned)
        .map_err(|e| Error::InvalidUtf8 {
            offset: e.valid_up_to(),
        })
}
