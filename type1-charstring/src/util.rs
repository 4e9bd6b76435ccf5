use core::fmt;

/// A 32-bit signed fixed point number with 16 bits of fraction.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Fixed(i32);

impl Fixed {
    /// The value `0`.
    pub const ZERO: Self = Self(0);
    /// The value `1`.
    pub const ONE: Self = Self(1 << 16);

    /// Creates a fixed point value from its raw 16.16 representation.
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// Returns the raw 16.16 representation.
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Creates a fixed point value from an `f32`, rounding to the nearest
    /// representable value.
    pub fn from_f32(x: f32) -> Self {
        Self((x * 65536.0).round() as i32)
    }

    /// Returns the value as an `f32`.
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / 65536.0
    }
}

impl fmt::Debug for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_f32().fmt(f)
    }
}

/// Multiplies an integer by a 16.16 fixed point value, rounding to the
/// nearest integer with ties away from zero.
#[inline]
pub(crate) fn mul_fix(a: i32, b: Fixed) -> i32 {
    let b = b.to_bits();
    let negative = (a < 0) != (b < 0);
    let product = i64::from(a).abs() * i64::from(b).abs();
    let c = (product + 0x8000) >> 16;
    let c = if negative { -c } else { c };

    c as i32
}
