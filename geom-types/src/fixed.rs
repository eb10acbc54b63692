//! fixed-point numerical types

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

// shared between Fix32 and Fix64
macro_rules! fixed_impl {
    ($name:ident, $bits:literal, $fract_bits:literal, $fract_digits:literal, $ty:ty) => {
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "bytemuck", derive(bytemuck::Pod, bytemuck::Zeroable))]
        #[repr(transparent)]
        #[doc = concat!(stringify!($bits), "-bit signed fixed point number with ", stringify!($fract_bits), " bits of fraction." )]
        ///
        /// Arithmetic follows the backing integer: overflow panics in debug
        /// builds and wraps in release builds. Callers are expected to keep
        /// magnitudes within the range of glyph coordinate space.
        pub struct $name($ty);

        impl $name {
            /// Minimum value.
            pub const MIN: Self = Self(<$ty>::MIN);

            /// Maximum value.
            pub const MAX: Self = Self(<$ty>::MAX);

            /// This type's smallest representable value
            pub const EPSILON: Self = Self(1);

            /// Representation of 0.0.
            pub const ZERO: Self = Self(0);

            /// Representation of 1.0.
            pub const ONE: Self = Self(1 << $fract_bits);

            /// Number of bits used for the fractional part.
            pub const FRACT_BITS: u32 = $fract_bits;

            const INT_MASK: $ty = !0 << $fract_bits;
            const ROUND: $ty = 1 << ($fract_bits - 1);

            /// Creates a new fixed point value from the raw count of sub-units.
            #[inline(always)]
            pub const fn from_bits(bits: $ty) -> Self {
                Self(bits)
            }

            /// Returns the raw count of sub-units.
            #[inline(always)]
            pub const fn to_bits(self) -> $ty {
                self.0
            }

            /// Creates a fixed point value from an integer; the fractional part is zero.
            #[inline(always)]
            pub const fn from_int(value: $ty) -> Self {
                Self(value << $fract_bits)
            }

            /// Returns the integer part, rounding toward negative infinity.
            #[inline(always)]
            pub const fn to_int(self) -> $ty {
                self.0 >> $fract_bits
            }

            /// Returns the nearest integer value.
            pub fn round(self) -> Self {
                Self(self.0.wrapping_add(Self::ROUND) & Self::INT_MASK)
            }

            /// Returns the absolute value of the number.
            pub fn abs(self) -> Self {
                Self(self.0.abs())
            }

            /// Returns the largest integer less than or equal to the number.
            pub fn floor(self) -> Self {
                Self(self.0 & Self::INT_MASK)
            }

            /// Returns the fractional part of the number.
            pub fn fract(self) -> Self {
                Self(self.0 - self.floor().0)
            }

            /// Wrapping addition.
            pub fn wrapping_add(self, other: Self) -> Self {
                Self(self.0.wrapping_add(other.0))
            }

            /// Saturating addition.
            pub fn saturating_add(self, other: Self) -> Self {
                Self(self.0.saturating_add(other.0))
            }

            /// Wrapping subtraction.
            pub fn wrapping_sub(self, other: Self) -> Self {
                Self(self.0.wrapping_sub(other.0))
            }

            /// Saturating subtraction.
            pub fn saturating_sub(self, other: Self) -> Self {
                Self(self.0.saturating_sub(other.0))
            }

            /// Creates a fixed point value from an f64.
            ///
            /// This operation is lossy; the float will be rounded to the nearest
            /// representable value.
            pub fn from_f64(x: f64) -> Self {
                let scaled = x * Self::ONE.0 as f64;
                #[cfg(any(feature = "std", test))]
                let rounded = scaled.round();
                //NOTE: rounds half away from zero, same as f64::round
                #[cfg(all(not(feature = "std"), not(test)))]
                let rounded = scaled + if scaled.is_sign_negative() { -0.5 } else { 0.5 };
                Self(rounded as _)
            }

            /// Returns the value as an f64.
            pub fn to_f64(self) -> f64 {
                self.0 as f64 / Self::ONE.0 as f64
            }
        }

        impl Add for $name {
            type Output = Self;
            #[inline(always)]
            fn add(self, other: Self) -> Self {
                // same overflow semantics as std: panic in debug, wrap in release
                Self(self.0 + other.0)
            }
        }

        impl AddAssign for $name {
            fn add_assign(&mut self, other: Self) {
                *self = *self + other;
            }
        }

        impl Sub for $name {
            type Output = Self;
            #[inline(always)]
            fn sub(self, other: Self) -> Self {
                Self(self.0 - other.0)
            }
        }

        impl SubAssign for $name {
            fn sub_assign(&mut self, other: Self) {
                *self = *self - other;
            }
        }

        impl Neg for $name {
            type Output = Self;
            #[inline(always)]
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        /// Scales by a plain integer.
        impl Mul<$ty> for $name {
            type Output = Self;
            #[inline(always)]
            fn mul(self, other: $ty) -> Self {
                Self(self.0 * other)
            }
        }

        /// Divides by a plain integer, truncating toward zero.
        impl Div<$ty> for $name {
            type Output = Self;
            #[inline(always)]
            fn div(self, other: $ty) -> Self {
                Self(self.0 / other)
            }
        }

        impl DivAssign<$ty> for $name {
            fn div_assign(&mut self, other: $ty) {
                *self = *self / other;
            }
        }

        // "-1:064" is one and a quarter below zero; the fractional digits are
        // the raw sub-unit count, not decimal thousandths.
        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                let magnitude = self.0.unsigned_abs();
                if self.0 < 0 {
                    f.write_str("-")?;
                }
                write!(
                    f,
                    "{}:{:0digits$}",
                    magnitude >> $fract_bits,
                    magnitude & !(!0 << $fract_bits),
                    digits = $fract_digits
                )
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                std::fmt::Display::fmt(self, f)
            }
        }
    };
}

fixed_impl!(Fix32, 32, 8, 3, i32);
fixed_impl!(Fix64, 64, 16, 5, i64);

impl Fix32 {
    /// Returns the exact product of two 24.8 values as a 48.16 value.
    #[inline(always)]
    pub fn wide_mul(self, other: Self) -> Fix64 {
        Fix64(self.0 as i64 * other.0 as i64)
    }

    /// Multiplies by `scale`, computing `self * scale / 256` in 64 bits.
    ///
    /// The result is truncated toward zero.
    #[inline(always)]
    pub fn mul_scale(self, scale: Self) -> Self {
        Self((self.0 as i64 * scale.0 as i64 / Self::ONE.0 as i64) as i32)
    }
}

impl Fix64 {
    /// Drops the extra fractional bits, rounding toward negative infinity.
    #[inline(always)]
    pub fn to_fix32(self) -> Fix32 {
        Fix32((self.0 >> (Self::FRACT_BITS - Fix32::FRACT_BITS)) as i32)
    }
}

/// Fixed point multiplication, see [`Fix32::mul_scale`].
impl Mul for Fix32 {
    type Output = Self;
    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        self.mul_scale(other)
    }
}

impl MulAssign for Fix32 {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl From<Fix32> for Fix64 {
    fn from(value: Fix32) -> Self {
        Fix64((value.0 as i64) << (Self::FRACT_BITS - Fix32::FRACT_BITS))
    }
}

/// Returns the larger of `|a|` and `|b|`.
pub fn max_abs(a: Fix32, b: Fix32) -> Fix32 {
    let (a, b) = (a.abs(), b.abs());
    if a < b {
        b
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn fix32_display() {
        assert_eq!(Fix32(320).to_string(), "1:064");
        assert_eq!(Fix32(-320).to_string(), "-1:064");
        assert_eq!(Fix32(0).to_string(), "0:000");
        assert_eq!(Fix32(255).to_string(), "0:255");
        assert_eq!(Fix32(-1).to_string(), "-0:001");
        assert_eq!(Fix32::from_int(100).to_string(), "100:000");
        // the magnitude of MIN does not fit in an i32
        assert_eq!(Fix32::MIN.to_string(), "-8388608:000");
    }

    #[test]
    fn fix64_display() {
        assert_eq!(Fix64(81920).to_string(), "1:16384");
        assert_eq!(Fix64(-81920).to_string(), "-1:16384");
        assert_eq!(Fix64(7).to_string(), "0:00007");
        assert_eq!(format!("{:?}", Fix64(65536 * 3)), "3:00000");
    }

    #[test]
    fn max_abs_picks_larger_magnitude() {
        let a = Fix32(-512);
        let b = Fix32(300);
        assert_eq!(max_abs(a, b), Fix32(512));
        assert_eq!(max_abs(b, a), Fix32(512));
        assert_eq!(max_abs(Fix32(-7), Fix32(-7)), Fix32(7));
        assert_eq!(max_abs(Fix32(7), Fix32(-7)), Fix32(7));
        assert_eq!(max_abs(Fix32::ZERO, Fix32::ZERO), Fix32::ZERO);
    }

    #[test]
    fn max_abs_symmetric() {
        let values = [-1000, -257, -1, 0, 3, 256, 999].map(Fix32);
        for a in values {
            assert_eq!(max_abs(a, a), a.abs());
            for b in values {
                if a.abs() != b.abs() {
                    assert_eq!(max_abs(a, b), max_abs(b, a));
                }
            }
        }
    }

    #[test]
    fn fixed_mul() {
        // 1.5 * 2.5 = 3.75
        assert_eq!(Fix32(384) * Fix32(640), Fix32(960));
        // truncates toward zero
        assert_eq!(Fix32(-1) * Fix32(128), Fix32(0));
        assert_eq!(Fix32(-3) * Fix32(128), Fix32(-1));
        // would overflow a 32-bit intermediate
        assert_eq!(
            Fix32::from_int(20000) * Fix32::from_int(2),
            Fix32::from_int(40000)
        );
    }

    #[test]
    fn wide_mul_and_narrow() {
        let product = Fix32::from_int(3).wide_mul(Fix32(128));
        assert_eq!(product, Fix64(3 * 256 * 128));
        assert_eq!(product.to_string(), "1:32768");
        assert_eq!(product.to_fix32(), Fix32(384));
        assert_eq!(Fix64::from(Fix32(-320)), Fix64(-81920));
    }

    #[test]
    fn round_fix32() {
        assert_eq!(Fix32(0x17F).round(), Fix32(0x100));
        assert_eq!(Fix32(0x180).round(), Fix32(0x200));
        assert_eq!(Fix32(-0x80).round(), Fix32(0));
        assert_eq!(Fix32(-0x81).round(), Fix32(-0x100));
    }

    #[test]
    fn floor_fract() {
        let x = Fix32(0x2_40);
        assert_eq!(x.floor(), Fix32(0x2_00));
        assert_eq!(x.fract(), Fix32(0x40));
        assert_eq!(Fix32(-1).floor(), Fix32(-256));
        assert_eq!(Fix32(-1).to_int(), -1);
    }

    #[test]
    fn fix32_floats() {
        assert_eq!(Fix32::from_f64(1.25), Fix32(320));
        assert_eq!(Fix32::from_f64(-0.5), Fix32(-128));
        assert_eq!(Fix32::from_f64(0.001), Fix32(0));
        assert_eq!(Fix32::from_f64(0.002), Fix32(1));
        assert_eq!(Fix32(320).to_f64(), 1.25);
        assert_eq!(Fix64(-81920).to_f64(), -1.25);
    }

    #[test]
    fn integer_scaling() {
        assert_eq!(Fix32(300) * 3, Fix32(900));
        assert_eq!(Fix32(-301) / 2, Fix32(-150));
        let mut x = Fix32(100);
        x /= 4;
        assert_eq!(x, Fix32(25));
        assert_eq!(-Fix32(5), Fix32(-5));
    }
}
