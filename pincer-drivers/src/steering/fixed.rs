//! Fixed-point arithmetic for the steering PID
//!
//! Q16.16 format, enough range for heading errors in 0.1 degree units
//! and gains up to a few hundred. Avoids hardware floating point on
//! Cortex-M0.

use core::ops::Neg;

/// Q16.16 fixed-point number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Fixed32(i32);

impl Fixed32 {
    /// Zero value
    pub const ZERO: Self = Self(0);

    /// Fractional bits
    const FRAC_BITS: u32 = 16;

    /// Create from a whole integer
    #[inline]
    pub const fn from_int(n: i16) -> Self {
        Self((n as i32) << Self::FRAC_BITS)
    }

    /// Create from a scaled integer (value × 100)
    ///
    /// Config stores gains like "1.00" as 100.
    #[inline]
    pub const fn from_scaled_100(n: i32) -> Self {
        Self((n << Self::FRAC_BITS) / 100)
    }

    /// Convert to whole integer (truncates toward negative infinity)
    #[inline]
    pub const fn to_int(self) -> i16 {
        (self.0 >> Self::FRAC_BITS) as i16
    }

    /// Multiply two fixed-point numbers
    ///
    /// Uses i64 intermediate to avoid overflow.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn mul(self, other: Self) -> Self {
        let result = ((self.0 as i64) * (other.0 as i64)) >> Self::FRAC_BITS;
        Self(result as i32)
    }

    /// Saturating addition
    #[inline]
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Clamp value to a range
    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self(self.0.clamp(min.0, max.0))
    }

    /// Check if value is zero
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Neg for Fixed32 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_round_trip() {
        assert_eq!(Fixed32::from_int(0).to_int(), 0);
        assert_eq!(Fixed32::from_int(450).to_int(), 450);
        assert_eq!(Fixed32::from_int(-450).to_int(), -450);
    }

    #[test]
    fn test_from_scaled_100() {
        assert_eq!(Fixed32::from_scaled_100(100).to_int(), 1);
        assert_eq!(Fixed32::from_scaled_100(250).to_int(), 2);
    }

    #[test]
    fn test_multiply() {
        let gain = Fixed32::from_scaled_100(150); // 1.5
        let error = Fixed32::from_int(40);
        assert_eq!(gain.mul(error).to_int(), 60);
    }

    #[test]
    fn test_clamp() {
        let v = Fixed32::from_int(500);
        let limit = Fixed32::from_int(300);
        assert_eq!(v.clamp(-limit, limit).to_int(), 300);
        assert_eq!((-v).clamp(-limit, limit).to_int(), -300);
    }

    #[test]
    fn test_saturating_add() {
        let big = Fixed32::from_int(32000);
        let more = Fixed32::from_int(1000);
        assert!(big.saturating_add(more).to_int() > 0);
    }
}
