//! Checked fixed-point type backing all curve math.
//!
//! [`Fixed`] is a newtype over [`I80F48`](fixed::types::I80F48): 80 signed
//! integer bits, 48 fractional bits, precision 2^-48 (~3.55e-15), fully
//! deterministic. Amounts are converted to and from their 18-decimal raw
//! representation with integer arithmetic only — the integer and fractional
//! parts are scaled separately, so no `f64` ever touches a value.
//!
//! One `Fixed` unit represents one whole token (or one whole connector
//! unit); 10^18 raw [`Amount`] units convert to `Fixed::ONE`.

use core::fmt;

use fixed::types::I80F48;

use crate::domain::{Amount, Rounding};
use crate::error::CurveError;

/// Number of fractional bits in the backing representation.
const FRAC_BITS: u32 = 48;

/// Raw `Amount` units per whole `Fixed` unit (18 decimals).
const AMOUNT_SCALE: u128 = 1_000_000_000_000_000_000;

/// Mask selecting the fractional bits of the backing representation.
const FRAC_MASK: u128 = (1u128 << FRAC_BITS) - 1;

/// First integer magnitude that does not fit the 80 signed integer bits.
const INT_LIMIT: u128 = 1u128 << 79;

/// `I80F48`-backed fixed-point value with checked, rounding-explicit
/// arithmetic.
///
/// All checked arithmetic methods return [`Err`] on overflow, underflow,
/// or division by zero. Division takes an explicit [`Rounding`] direction;
/// multiplication truncates (default `I80F48` behaviour).
///
/// # Examples
///
/// ```
/// use ember_curve::domain::Rounding;
/// use ember_curve::math::Fixed;
///
/// let a = Fixed::from_int(10);
/// let b = Fixed::from_int(4);
/// let q = a.checked_div(&b, Rounding::Down).expect("non-zero divisor");
/// assert_eq!(q, Fixed::from_ratio(10, 4, Rounding::Down).expect("ok"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(I80F48);

impl Fixed {
    /// The value `0`.
    pub const ZERO: Self = Self(I80F48::ZERO);

    /// The value `1`.
    pub const ONE: Self = Self(I80F48::ONE);

    /// The smallest representable positive value (one ULP, 2^-48).
    pub const DELTA: Self = Self(I80F48::from_bits(1));

    /// Creates a new `Fixed` from a raw [`I80F48`].
    #[inline]
    #[must_use]
    pub const fn new(value: I80F48) -> Self {
        Self(value)
    }

    /// Returns the underlying [`I80F48`] value.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> I80F48 {
        self.0
    }

    /// Creates a `Fixed` from raw bits (Q80.48 two's complement).
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: i128) -> Self {
        Self(I80F48::from_bits(bits))
    }

    /// Returns the raw bit representation.
    #[inline]
    #[must_use]
    pub const fn to_bits(&self) -> i128 {
        self.0.to_bits()
    }

    /// Creates a `Fixed` from a whole-number value.
    ///
    /// All `u64` values fit in the 80 integer bits.
    #[inline]
    #[must_use]
    pub const fn from_int(value: u64) -> Self {
        Self(I80F48::from_bits((value as i128) << FRAC_BITS))
    }

    /// Creates a `Fixed` as `numerator / denominator` with explicit rounding.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DivisionByZero`] if `denominator` is zero.
    pub fn from_ratio(
        numerator: u64,
        denominator: u64,
        rounding: Rounding,
    ) -> crate::error::Result<Self> {
        Self::from_int(numerator).checked_div(&Self::from_int(denominator), rounding)
    }

    /// Creates a `Fixed` from a parts-per-million value as a fraction of one.
    ///
    /// `500_000` ppm converts to exactly `0.5`; values whose binary
    /// expansion does not terminate are truncated at 2^-48.
    #[must_use]
    pub const fn from_ppm(ppm: crate::domain::Ppm) -> Self {
        let bits = ((ppm.get() as i128) << FRAC_BITS) / 1_000_000;
        Self(I80F48::from_bits(bits))
    }

    /// Converts an 18-decimal raw [`Amount`] to `Fixed` whole units.
    ///
    /// The integer part is placed in the integer bits; the sub-unit
    /// remainder is scaled into the 48 fractional bits, truncating below
    /// 2^-48 of a whole unit.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Overflow`] if the whole-unit part exceeds the
    /// 80 signed integer bits.
    pub fn from_amount(amount: Amount) -> crate::error::Result<Self> {
        let raw = amount.get();
        let int = raw / AMOUNT_SCALE;
        if int >= INT_LIMIT {
            return Err(CurveError::Overflow("amount exceeds fixed-point range"));
        }
        // remainder < 10^18 < 2^60, so the shift cannot overflow u128
        let frac = ((raw % AMOUNT_SCALE) << FRAC_BITS) / AMOUNT_SCALE;
        let bits = ((int << FRAC_BITS) | frac) as i128;
        Ok(Self(I80F48::from_bits(bits)))
    }

    /// Converts back to an 18-decimal raw [`Amount`] with explicit rounding.
    ///
    /// # Errors
    ///
    /// - [`CurveError::Underflow`] if the value is negative.
    /// - [`CurveError::Overflow`] if the scaled value exceeds `u128`.
    pub fn to_amount(&self, rounding: Rounding) -> crate::error::Result<Amount> {
        let bits = self.0.to_bits();
        if bits < 0 {
            return Err(CurveError::Underflow("negative value is not an amount"));
        }
        let bits = bits as u128;
        let int = bits >> FRAC_BITS;
        let frac = bits & FRAC_MASK;

        let int_part = int
            .checked_mul(AMOUNT_SCALE)
            .ok_or(CurveError::Overflow("amount conversion overflow"))?;
        // frac < 2^48 and AMOUNT_SCALE < 2^60, so the product fits u128
        let scaled_frac = frac * AMOUNT_SCALE;
        let mut frac_part = scaled_frac >> FRAC_BITS;
        if rounding.is_up() && (scaled_frac & FRAC_MASK) != 0 {
            frac_part += 1;
        }
        int_part
            .checked_add(frac_part)
            .map(Amount::new)
            .ok_or(CurveError::Overflow("amount conversion overflow"))
    }

    /// Returns `true` if the value is zero.
    #[inline]
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.to_bits() == 0
    }

    /// Returns `true` if the value is strictly negative.
    #[inline]
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0.to_bits() < 0
    }

    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Overflow`] on overflow.
    pub fn checked_add(&self, other: &Self) -> crate::error::Result<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(CurveError::Overflow("fixed-point addition overflow"))
    }

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Underflow`] on overflow past the negative end.
    pub fn checked_sub(&self, other: &Self) -> crate::error::Result<Self> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(CurveError::Underflow("fixed-point subtraction underflow"))
    }

    /// Checked multiplication. The product is truncated at 2^-48.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Overflow`] on overflow.
    pub fn checked_mul(&self, other: &Self) -> crate::error::Result<Self> {
        self.0
            .checked_mul(other.0)
            .map(Self)
            .ok_or(CurveError::Overflow("fixed-point multiplication overflow"))
    }

    /// Checked division with explicit rounding direction.
    ///
    /// - [`Rounding::Down`] — truncates toward zero (default `I80F48`
    ///   behaviour for non-negative operands).
    /// - [`Rounding::Up`] — adds one ULP when truncation discarded a
    ///   non-zero remainder.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DivisionByZero`] if `other` is zero, or
    /// [`CurveError::Overflow`] if the quotient is unrepresentable.
    pub fn checked_div(&self, other: &Self, rounding: Rounding) -> crate::error::Result<Self> {
        if other.is_zero() {
            return Err(CurveError::DivisionByZero);
        }
        let quotient = self
            .0
            .checked_div(other.0)
            .ok_or(CurveError::Overflow("fixed-point division overflow"))?;
        match rounding {
            Rounding::Down => Ok(Self(quotient)),
            Rounding::Up => {
                // Detect a discarded remainder: if quotient * other != self,
                // the true quotient was strictly larger.
                let product = quotient
                    .checked_mul(other.0)
                    .ok_or(CurveError::Overflow("fixed-point division rounding overflow"))?;
                if product != self.0 {
                    quotient
                        .checked_add(I80F48::from_bits(1))
                        .map(Self)
                        .ok_or(CurveError::Overflow("fixed-point division rounding overflow"))
                } else {
                    Ok(Self(quotient))
                }
            }
        }
    }

}

impl From<I80F48> for Fixed {
    #[inline]
    fn from(value: I80F48) -> Self {
        Self(value)
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
