//! Parts-per-million representation for ratios and fees.

use core::fmt;

use super::{Amount, Rounding};
use crate::error::CurveError;

/// Denominator representing 100%.
const PPM_DENOMINATOR: u32 = 1_000_000;

/// A fraction expressed in parts per million (1 ppm = 0.0001%,
/// 1 000 000 ppm = 100%).
///
/// Used for both the curve's reserve ratio (valid range `1..=1_000_000`)
/// and the swap fee (valid range `0..=1_000_000`). All `u32` values can be
/// constructed; use [`is_valid_ratio`](Self::is_valid_ratio) and
/// [`is_valid_fee`](Self::is_valid_fee) to check range.
///
/// # Examples
///
/// ```
/// use ember_curve::domain::Ppm;
///
/// let half = Ppm::new(500_000);
/// assert_eq!(half.get(), 500_000);
/// assert!(half.is_valid_ratio());
/// assert!(half.is_valid_fee());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ppm(u32);

impl Ppm {
    /// Zero parts per million (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in parts per million.
    pub const ONE: Self = Self(PPM_DENOMINATOR);

    /// 50% — the reserve ratio of a linear-price curve.
    pub const HALF: Self = Self(PPM_DENOMINATOR / 2);

    /// The parts-per-million denominator (1 000 000).
    pub const DENOMINATOR: u32 = PPM_DENOMINATOR;

    /// Creates a new `Ppm` from a raw `u32` value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the value is a valid reserve ratio: `(0, 1_000_000]`.
    #[must_use]
    pub const fn is_valid_ratio(&self) -> bool {
        self.0 > 0 && self.0 <= PPM_DENOMINATOR
    }

    /// Returns `true` if the value is a valid fee: `[0, 1_000_000]`.
    #[must_use]
    pub const fn is_valid_fee(&self) -> bool {
        self.0 <= PPM_DENOMINATOR
    }

    /// Computes `amount * (self / 1_000_000)` with explicit rounding.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Overflow`] if the intermediate multiplication
    /// overflows `u128`.
    pub const fn apply(&self, amount: Amount, rounding: Rounding) -> crate::error::Result<Amount> {
        match amount.checked_mul_div(self.0 as u128, PPM_DENOMINATOR as u128, rounding) {
            Some(v) => Ok(v),
            None => Err(CurveError::Overflow("ppm apply overflow")),
        }
    }
}

impl fmt::Display for Ppm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ppm", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_and_get() {
        assert_eq!(Ppm::new(500_000).get(), 500_000);
    }

    #[test]
    fn constants() {
        assert_eq!(Ppm::ZERO.get(), 0);
        assert_eq!(Ppm::ONE.get(), 1_000_000);
        assert_eq!(Ppm::HALF.get(), 500_000);
        assert_eq!(Ppm::DENOMINATOR, 1_000_000);
    }

    #[test]
    fn ratio_validity_range() {
        assert!(!Ppm::ZERO.is_valid_ratio());
        assert!(Ppm::new(1).is_valid_ratio());
        assert!(Ppm::HALF.is_valid_ratio());
        assert!(Ppm::ONE.is_valid_ratio());
        assert!(!Ppm::new(1_000_001).is_valid_ratio());
    }

    #[test]
    fn fee_validity_range() {
        assert!(Ppm::ZERO.is_valid_fee());
        assert!(Ppm::ONE.is_valid_fee());
        assert!(!Ppm::new(1_000_001).is_valid_fee());
    }

    #[test]
    fn apply_one_percent_fee() {
        // 10_000 ppm (1%) of 5 * 10^18
        let fee = Ppm::new(10_000);
        let Ok(result) = fee.apply(Amount::new(5_000_000_000_000_000_000), Rounding::Down) else {
            panic!("expected Ok");
        };
        assert_eq!(result, Amount::new(50_000_000_000_000_000));
    }

    #[test]
    fn apply_rounding_direction() {
        // 1 ppm of 1 = 0.000001 -> 0 down, 1 up
        let ppm = Ppm::new(1);
        let Ok(down) = ppm.apply(Amount::new(1), Rounding::Down) else {
            panic!("expected Ok");
        };
        let Ok(up) = ppm.apply(Amount::new(1), Rounding::Up) else {
            panic!("expected Ok");
        };
        assert_eq!(down, Amount::ZERO);
        assert_eq!(up, Amount::new(1));
    }

    #[test]
    fn apply_full_denominator_is_identity() {
        let Ok(result) = Ppm::ONE.apply(Amount::new(1_000), Rounding::Down) else {
            panic!("expected Ok");
        };
        assert_eq!(result, Amount::new(1_000));
    }

    #[test]
    fn apply_zero_ppm() {
        let Ok(result) = Ppm::ZERO.apply(Amount::new(1_000), Rounding::Up) else {
            panic!("expected Ok");
        };
        assert_eq!(result, Amount::ZERO);
    }

    #[test]
    fn apply_overflow() {
        let result = Ppm::new(u32::MAX).apply(Amount::MAX, Rounding::Down);
        assert!(result.is_err());
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Ppm::new(500_000)), "500000ppm");
    }

    #[test]
    fn ordering() {
        assert!(Ppm::new(1) < Ppm::new(5));
    }
}
