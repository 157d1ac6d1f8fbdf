//! This crate extends the [`bytes`] crate with fallible read
//! operations on [`bytes::Buf`]s for the wirepack field kinds.
//!
//! Every operation either consumes exactly the bytes it needs
//! or leaves the buffer untouched and returns [`None`].

#![deny(rust_2018_idioms, rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use std::mem::size_of;

use bytes::{Buf, Bytes};

macro_rules! read_checked {
    ($source:ident.$fn:ident() -> $ty:ty) => {
        ($source.remaining() >= size_of::<$ty>()).then(|| $source.$fn())
    };
}

/// Provides fallible read operations for arbitrary [`Buf`]s.
pub trait CheckedBuf: Buf {
    /// Attempts to get an [`u8`] from `self`.
    fn try_get_u8(&mut self) -> Option<u8> {
        read_checked!(self.get_u8() -> u8)
    }

    /// Attempts to get an [`u32`] from `self` in big-endian byte order.
    fn try_get_u32(&mut self) -> Option<u32> {
        read_checked!(self.get_u32() -> u32)
    }

    /// Attempts to get an [`u64`] from `self` in big-endian byte order.
    fn try_get_u64(&mut self) -> Option<u64> {
        read_checked!(self.get_u64() -> u64)
    }

    /// Attempts to get an [`f32`] from `self` in little-endian byte order.
    fn try_get_f32_le(&mut self) -> Option<f32> {
        read_checked!(self.get_f32_le() -> f32)
    }

    /// Attempts to copy the next `len` bytes of `self` into an
    /// owned [`Bytes`] buffer.
    fn try_copy_to_bytes(&mut self, len: usize) -> Option<Bytes> {
        (self.remaining() >= len).then(|| self.copy_to_bytes(len))
    }

    /// Attempts to skip the next `len` bytes of `self`.
    fn try_advance(&mut self, len: usize) -> Option<()> {
        (self.remaining() >= len).then(|| self.advance(len))
    }
}

impl<B: Buf> CheckedBuf for B {}
impl CheckedBuf for dyn Buf {}
