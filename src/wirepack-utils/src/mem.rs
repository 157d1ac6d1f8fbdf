//! Alignment math for bit and byte quantities.

/// Rounds `value` up to the next multiple of `align`.
///
/// `align` must be a power of two.
#[inline(always)]
pub const fn align_up(value: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    (value + align - 1) & !(align - 1)
}

/// Gets the number of whole bytes needed to store `bits` bits.
///
/// Unlike [`align_up`], this is defined for every `bits` value.
#[inline(always)]
pub const fn bytes_for_bits(bits: usize) -> usize {
    bits.div_ceil(u8::BITS as usize)
}
