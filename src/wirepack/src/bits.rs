//! Packing of boolean vectors into bytes.
//!
//! Bits are stored starting at the LSB of each byte and working
//! towards the MSB, eight per byte. Unused high bits of the final
//! byte are always zero.

use bitvec::prelude::*;
use wirepack_utils::mem::{align_up, bytes_for_bits};

/// Gets the number of bytes `bits` booleans occupy when packed.
#[inline]
pub const fn packed_len(bits: usize) -> usize {
    bytes_for_bits(bits)
}

/// Packs `bits` into a byte-aligned bit vector.
///
/// The length of the returned vector is a multiple of eight,
/// filled up with `false` past the end of `bits`.
pub fn pack<I>(bits: I) -> BitVec<u8, Lsb0>
where
    I: IntoIterator<Item = bool>,
{
    let mut packed: BitVec<u8, Lsb0> = bits.into_iter().collect();
    realign_to_byte(&mut packed);
    packed
}

/// Pads `bits` with zeroes up to the next full byte.
#[inline]
pub fn realign_to_byte(bits: &mut BitVec<u8, Lsb0>) {
    let len = align_up(bits.len(), u8::BITS as _);
    bits.resize(len, false);
}

/// Views the first `len` bits of `bytes`.
///
/// Returns [`None`] when `bytes` holds fewer than `len` bits.
#[inline]
pub fn view(bytes: &[u8], len: usize) -> Option<&BitSlice<u8, Lsb0>> {
    bytes.view_bits::<Lsb0>().get(..len)
}
