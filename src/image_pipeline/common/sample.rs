//! Pixel sample types

use std::fmt::Debug;

use num_traits::{AsPrimitive, PrimInt, Unsigned};

/// Unsigned fixed-width pixel intensity.
///
/// Neighbour sums are accumulated in `u32`, which holds four 16-bit samples
/// without overflow.
pub trait Sample:
    PrimInt + Unsigned + AsPrimitive<u32> + Default + Debug + Send + Sync + 'static
{
    /// Bits per sample of the storage type.
    const BITS: u32;

    /// Narrows an accumulated value back to the sample type, saturating at `max_value()`.
    fn from_sum(value: u32) -> Self {
        <Self as num_traits::NumCast>::from(value).unwrap_or_else(Self::max_value)
    }

    fn widen(self) -> u32 {
        self.as_()
    }

    fn as_f64(self) -> f64 {
        <f64 as From<u32>>::from(self.widen())
    }
}

impl Sample for u8 {
    const BITS: u32 = 8;
}

impl Sample for u16 {
    const BITS: u32 = 16;
}
