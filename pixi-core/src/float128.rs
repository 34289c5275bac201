//! IEEE 754 binary128 values.
//!
//! Storage is the raw 128-bit pattern. `+` and `*` go through
//! `rustc_apfloat`'s software `Quad`, each rounding once to nearest-even.

use rustc_apfloat::ieee::{Double, Quad};
use rustc_apfloat::{Float, FloatConvert};
use std::fmt;
use std::ops::{Add, Mul};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary128 value, stored as its bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Float128(u128);

impl Float128 {
    pub const ZERO: Float128 = Float128(0);
    pub const ONE: Float128 = Float128(0x3FFF_u128 << 112);

    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u128) -> Self {
        Self(bits)
    }

    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> u128 {
        self.0
    }

    /// Widens an `f64`. Always exact.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        let double = Double::from_bits(u128::from(value.to_bits()));
        let mut loses_info = false;
        let quad = <Double as FloatConvert<Quad>>::convert(double, &mut loses_info).value;
        Self::from_quad(quad)
    }

    /// Narrows to the nearest `f64`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_f64(self) -> f64 {
        let mut loses_info = false;
        let double =
            <Quad as FloatConvert<Double>>::convert(self.to_quad(), &mut loses_info).value;
        f64::from_bits(double.to_bits() as u64)
    }

    #[must_use]
    pub fn is_nan(self) -> bool {
        self.to_quad().is_nan()
    }

    fn to_quad(self) -> Quad {
        Quad::from_bits(self.0)
    }

    fn from_quad(quad: Quad) -> Self {
        Self(quad.to_bits())
    }
}

impl Add for Float128 {
    type Output = Float128;

    fn add(self, rhs: Self) -> Self {
        Self::from_quad((self.to_quad() + rhs.to_quad()).value)
    }
}

impl Mul for Float128 {
    type Output = Float128;

    fn mul(self, rhs: Self) -> Self {
        Self::from_quad((self.to_quad() * rhs.to_quad()).value)
    }
}

impl From<f64> for Float128 {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl fmt::Display for Float128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_quad(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_pattern() {
        assert_eq!(Float128::from_f64(1.0), Float128::ONE);
        assert_eq!(Float128::ONE.to_f64(), 1.0);
        assert_eq!(Float128::from_f64(0.0), Float128::ZERO);
    }

    #[test]
    fn test_f64_widening_is_exact() {
        for value in [0.1, -2.5, 1e300, 5e-324, 123_456.789] {
            assert_eq!(Float128::from_f64(value).to_f64(), value);
        }
    }

    #[test]
    fn test_arithmetic() {
        let three = Float128::from_f64(3.0);
        let four = Float128::from_f64(4.0);
        assert_eq!((three * four).to_f64(), 12.0);
        assert_eq!((three + four).to_f64(), 7.0);
    }

    #[test]
    fn test_extra_precision() {
        // 2^60 + 1 is not representable in f64 but is in binary128
        let big = Float128::from_f64(2f64.powi(60));
        let one = Float128::ONE;
        let sum = big + one;
        assert_ne!(sum, big);
        assert_eq!(sum.to_f64(), 2f64.powi(60));
    }
}
