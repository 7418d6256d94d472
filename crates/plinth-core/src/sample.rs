//! Sample type abstraction for generic f32/f64 DSP code.

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub};

/// Floating-point sample type.
///
/// Implemented for `f32` and `f64` so DSP stages can be written once:
///
/// ```ignore
/// fn apply_gain<S: Sample>(samples: &mut [S], gain: f64) {
///     let gain = S::from_f64(gain);
///     for s in samples {
///         *s *= gain;
///     }
/// }
/// ```
pub trait Sample:
    Copy
    + Default
    + PartialEq
    + PartialOrd
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + Mul<Output = Self>
    + MulAssign
    + Neg<Output = Self>
{
    /// Silence.
    const ZERO: Self;
    /// Unity.
    const ONE: Self;

    /// Convert from f32.
    fn from_f32(value: f32) -> Self;
    /// Convert from f64.
    fn from_f64(value: f64) -> Self;
    /// Convert to f32.
    fn to_f32(self) -> f32;
    /// Convert to f64.
    fn to_f64(self) -> f64;
}

impl Sample for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    #[inline]
    fn from_f32(value: f32) -> Self {
        value
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Sample for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    #[inline]
    fn from_f32(value: f32) -> Self {
        value as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}
