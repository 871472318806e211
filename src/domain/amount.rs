//! Raw token amount with checked arithmetic.

use core::fmt;

use super::Rounding;

/// A raw token or connector amount in the smallest unit (18-decimal base
/// units for both the issued token and the connector asset).
///
/// `Amount` never interprets decimals — the curve math layer owns the
/// conversion to and from its fixed-point working scale. All `u128` values
/// are valid amounts.
///
/// Arithmetic methods are checked: they return `None` on overflow,
/// underflow, or division by zero instead of panicking.
///
/// # Examples
///
/// ```
/// use ember_curve::domain::Amount;
///
/// let a = Amount::new(100);
/// let b = Amount::new(200);
/// assert_eq!(a.checked_add(&b), Some(Amount::new(300)));
/// assert_eq!(b.checked_sub(&a), Some(Amount::new(100)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a new `Amount` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked multiplication. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_mul(&self, other: &Self) -> Option<Self> {
        match self.0.checked_mul(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked division with explicit rounding direction.
    ///
    /// - [`Rounding::Down`]: floor division (round towards zero).
    /// - [`Rounding::Up`]: ceiling division — `(n + d - 1) / d`.
    ///
    /// Returns `None` if `divisor` is zero.
    #[must_use]
    pub const fn checked_div(&self, divisor: &Self, rounding: Rounding) -> Option<Self> {
        if divisor.0 == 0 {
            return None;
        }
        match rounding {
            Rounding::Down => Some(Self(self.0 / divisor.0)),
            Rounding::Up => {
                let q = self.0 / divisor.0;
                let r = self.0 % divisor.0;
                if r != 0 {
                    // q + 1 cannot overflow: r != 0 implies self < u128::MAX
                    // or divisor > 1, so q < u128::MAX.
                    Some(Self(q + 1))
                } else {
                    Some(Self(q))
                }
            }
        }
    }

    /// `self * numerator / denominator` with a widened intermediate where
    /// possible and explicit rounding.
    ///
    /// Returns `None` if the intermediate product overflows `u128` or if
    /// `denominator` is zero. Used for parts-per-million fee and ratio math
    /// where the numerator is small relative to the amount.
    #[must_use]
    pub const fn checked_mul_div(
        &self,
        numerator: u128,
        denominator: u128,
        rounding: Rounding,
    ) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let product = match self.0.checked_mul(numerator) {
            Some(v) => v,
            None => return None,
        };
        let q = product / denominator;
        let r = product % denominator;
        match rounding {
            Rounding::Down => Some(Self(q)),
            Rounding::Up => {
                if r != 0 {
                    Some(Self(q + 1))
                } else {
                    Some(Self(q))
                }
            }
        }
    }

}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_and_get() {
        assert_eq!(Amount::new(42).get(), 42);
    }

    #[test]
    fn constants() {
        assert_eq!(Amount::ZERO.get(), 0);
        assert_eq!(Amount::MAX.get(), u128::MAX);
    }

    #[test]
    fn is_zero() {
        assert!(Amount::ZERO.is_zero());
        assert!(!Amount::new(1).is_zero());
    }

    #[test]
    fn checked_add_overflow() {
        assert_eq!(Amount::MAX.checked_add(&Amount::new(1)), None);
    }

    #[test]
    fn checked_sub_underflow() {
        assert_eq!(Amount::ZERO.checked_sub(&Amount::new(1)), None);
    }

    #[test]
    fn checked_mul_overflow() {
        assert_eq!(Amount::MAX.checked_mul(&Amount::new(2)), None);
    }

    #[test]
    fn checked_div_by_zero() {
        assert_eq!(
            Amount::new(10).checked_div(&Amount::ZERO, Rounding::Down),
            None
        );
    }

    #[test]
    fn checked_div_rounds_down() {
        let result = Amount::new(7).checked_div(&Amount::new(2), Rounding::Down);
        assert_eq!(result, Some(Amount::new(3)));
    }

    #[test]
    fn checked_div_rounds_up() {
        let result = Amount::new(7).checked_div(&Amount::new(2), Rounding::Up);
        assert_eq!(result, Some(Amount::new(4)));
    }

    #[test]
    fn checked_div_exact_same_both_ways() {
        let down = Amount::new(8).checked_div(&Amount::new(2), Rounding::Down);
        let up = Amount::new(8).checked_div(&Amount::new(2), Rounding::Up);
        assert_eq!(down, up);
    }

    #[test]
    fn mul_div_ppm_fee() {
        // 1% of 1_000_000 in PPM terms: 1_000_000 * 10_000 / 1_000_000
        let fee = Amount::new(1_000_000).checked_mul_div(10_000, 1_000_000, Rounding::Down);
        assert_eq!(fee, Some(Amount::new(10_000)));
    }

    #[test]
    fn mul_div_rounding_direction() {
        // 1 * 1 / 3 = 0.33.. -> 0 down, 1 up
        assert_eq!(
            Amount::new(1).checked_mul_div(1, 3, Rounding::Down),
            Some(Amount::ZERO)
        );
        assert_eq!(
            Amount::new(1).checked_mul_div(1, 3, Rounding::Up),
            Some(Amount::new(1))
        );
    }

    #[test]
    fn mul_div_zero_denominator() {
        assert_eq!(Amount::new(1).checked_mul_div(1, 0, Rounding::Down), None);
    }

    #[test]
    fn mul_div_overflow() {
        assert_eq!(Amount::MAX.checked_mul_div(2, 1, Rounding::Down), None);
    }

    #[test]
    fn min_picks_smaller() {
        assert_eq!(Amount::new(3).min(Amount::new(5)), Amount::new(3));
        assert_eq!(Amount::new(5).min(Amount::new(3)), Amount::new(3));
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Amount::new(1234)), "1234");
    }

    #[test]
    fn ordering() {
        assert!(Amount::new(1) < Amount::new(2));
    }
}
