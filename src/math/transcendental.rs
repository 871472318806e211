//! Bounded-iteration natural log, exponential, and fractional power.
//!
//! All three functions run a fixed number of iterations with integer-only
//! arithmetic, so results are bit-identical on every platform.
//!
//! - [`ln`] reduces its argument to `2^k * m` with `m` in `[1, 2)` and sums
//!   the atanh series of `(m - 1) / (m + 1)` (16 odd terms; the series
//!   argument is below `1/3`, so the truncated tail is far below one ULP).
//! - [`exp`] reduces modulo `ln 2` to a remainder in `[0, ln 2)`, sums 22
//!   Taylor terms, and rescales by a power of two.
//! - [`pow`] computes `exp(exponent * ln(base))` and pads the result with a
//!   direction-aware slack so accumulated series truncation can never round
//!   in the caller's favour. Algebraically exact inputs (`base = 1`,
//!   `exponent` of `0` or `1`, `base = 0`) bypass the series entirely and
//!   stay bit-exact.

use crate::domain::Rounding;
use crate::error::CurveError;

use super::Fixed;

/// `ln 2` in Q80.48 bits: `round(0.693147180559945... * 2^48)`.
const LN2_BITS: i128 = 195_103_586_505_167;

/// Number of odd atanh terms summed by [`ln`].
const LN_TERMS: u64 = 16;

/// Number of Taylor terms summed by [`exp`].
const EXP_TERMS: u64 = 22;

/// Base slack, in ULPs, applied per integer unit of the intermediate
/// exponent by [`pow`]. Covers worst-case accumulation of per-operation
/// truncation across the ln and exp series.
const SLACK_ULPS_PER_UNIT: i128 = 32;

/// Natural logarithm.
///
/// # Errors
///
/// Returns [`CurveError::InvalidAmount`] if `x` is zero or negative.
pub fn ln(x: Fixed) -> crate::error::Result<Fixed> {
    let bits = x.to_bits();
    if bits <= 0 {
        return Err(CurveError::InvalidAmount(
            "natural log of a non-positive value",
        ));
    }
    if x == Fixed::ONE {
        return Ok(Fixed::ZERO);
    }

    // Normalize to m in [1, 2): x = 2^k * m.
    let msb = 127 - (bits as u128).leading_zeros() as i32;
    let k = msb - 48;
    let m_bits = if k >= 0 { bits >> k } else { bits << (-k) };
    let m = Fixed::from_bits(m_bits);

    // ln(m) = 2 * atanh(z) with z = (m - 1) / (m + 1) in [0, 1/3).
    let num = m.checked_sub(&Fixed::ONE)?;
    let den = m.checked_add(&Fixed::ONE)?;
    let z = num.checked_div(&den, Rounding::Down)?;
    let z2 = z.checked_mul(&z)?;

    let mut sum = Fixed::ZERO;
    let mut term = z;
    let mut odd = 1u64;
    while odd < 2 * LN_TERMS {
        let contribution = term.checked_div(&Fixed::from_int(odd), Rounding::Down)?;
        sum = sum.checked_add(&contribution)?;
        term = term.checked_mul(&z2)?;
        odd += 2;
    }
    let ln_m = sum.checked_add(&sum)?;

    // |k| <= 79, so the product fits comfortably in i128.
    let k_ln2 = Fixed::from_bits(i128::from(k) * LN2_BITS);
    ln_m.checked_add(&k_ln2)
}

/// Exponential function `e^x`.
///
/// Negative arguments below the representable range return zero (the curve
/// treats a vanished factor as a truncated payout, never an error).
///
/// # Errors
///
/// Returns [`CurveError::Overflow`] if `e^x` exceeds the fixed-point range.
pub fn exp(x: Fixed) -> crate::error::Result<Fixed> {
    let bits = x.to_bits();
    if bits == 0 {
        return Ok(Fixed::ONE);
    }

    // Reduce: x = n * ln2 + r with r in [0, ln2).
    let n = bits.div_euclid(LN2_BITS);
    let r = Fixed::from_bits(bits - n * LN2_BITS);

    let mut sum = Fixed::ONE;
    let mut term = Fixed::ONE;
    for i in 1..=EXP_TERMS {
        term = term.checked_mul(&r)?;
        term = term.checked_div(&Fixed::from_int(i), Rounding::Down)?;
        sum = sum.checked_add(&term)?;
    }

    // Rescale by 2^n.
    if n >= 0 {
        if n > 78 {
            return Err(CurveError::Overflow("exp result exceeds fixed-point range"));
        }
        let sb = sum.to_bits();
        let shift = n as u32;
        if sb > (i128::MAX >> shift) {
            return Err(CurveError::Overflow("exp result exceeds fixed-point range"));
        }
        Ok(Fixed::from_bits(sb << shift))
    } else {
        let shift = -n;
        if shift >= 128 {
            return Ok(Fixed::ZERO);
        }
        Ok(Fixed::from_bits(sum.to_bits() >> (shift as u32)))
    }
}

/// Fractional power `base^exponent` for non-negative operands.
///
/// The result is padded by [`pow_slack`] in the requested direction:
/// [`Rounding::Down`] subtracts the slack (clamped at zero),
/// [`Rounding::Up`] adds it. This is the load-bearing anti-exploitation
/// policy — a truncation-induced error can reduce what the curve pays out
/// but never increase it.
///
/// # Errors
///
/// - [`CurveError::InvalidAmount`] if `base` or `exponent` is negative.
/// - [`CurveError::Overflow`] if the result exceeds the fixed-point range.
pub fn pow(base: Fixed, exponent: Fixed, rounding: Rounding) -> crate::error::Result<Fixed> {
    if base.is_negative() {
        return Err(CurveError::InvalidAmount("power of a negative base"));
    }
    if exponent.is_negative() {
        return Err(CurveError::InvalidAmount("negative exponent"));
    }

    // Exact shortcuts: no series, no slack.
    if exponent.is_zero() {
        return Ok(Fixed::ONE);
    }
    if exponent == Fixed::ONE {
        return Ok(base);
    }
    if base.is_zero() {
        return Ok(Fixed::ZERO);
    }
    if base == Fixed::ONE {
        return Ok(Fixed::ONE);
    }

    let y = exponent.checked_mul(&ln(base)?)?;
    let p = exp(y)?;

    let slack = pow_slack(y);
    match rounding {
        Rounding::Down => {
            if p <= slack {
                Ok(Fixed::ZERO)
            } else {
                p.checked_sub(&slack)
            }
        }
        Rounding::Up => p.checked_add(&slack),
    }
}

/// Conservative bound on the absolute error of `exp(y)` as computed by the
/// `ln`/`exp` pipeline above.
///
/// The dominant error source is the exponent multiplication amplifying the
/// ln series truncation, so the slack grows with the integer magnitude of
/// the intermediate exponent `y`.
fn pow_slack(y: Fixed) -> Fixed {
    let magnitude = (y.to_bits().unsigned_abs() >> 48) as i128;
    Fixed::from_bits(SLACK_ULPS_PER_UNIT * (magnitude + 1))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    /// Asserts two fixed-point values agree within `tol` raw bits.
    fn assert_close(actual: Fixed, expected_bits: i128, tol: i128) {
        let diff = (actual.to_bits() - expected_bits).abs();
        assert!(
            diff <= tol,
            "got {} bits, expected {} bits (diff {} > tol {})",
            actual.to_bits(),
            expected_bits,
            diff,
            tol
        );
    }

    // Reference values: round(f * 2^48) computed at 60-digit precision.
    const E_BITS: i128 = 765_128_314_358_509;
    const SQRT2_BITS: i128 = 398_065_729_532_860;
    const LN10_BITS: i128 = 648_120_085_424_802;
    const EXP_NEG1_BITS: i128 = 103_548_857_136_060;
    const TWO_POW_0_3_BITS: i128 = 346_536_345_073_714;

    const TOL: i128 = 1 << 8; // ~9e-13 of a unit

    #[test]
    fn ln_of_one_is_exactly_zero() {
        let Ok(v) = ln(Fixed::ONE) else {
            panic!("expected Ok");
        };
        assert_eq!(v, Fixed::ZERO);
    }

    #[test]
    fn ln_of_two() {
        let Ok(v) = ln(Fixed::from_int(2)) else {
            panic!("expected Ok");
        };
        assert_close(v, LN2_BITS, TOL);
    }

    #[test]
    fn ln_of_ten() {
        let Ok(v) = ln(Fixed::from_int(10)) else {
            panic!("expected Ok");
        };
        assert_close(v, LN10_BITS, TOL);
    }

    #[test]
    fn ln_of_half_is_negative() {
        let Ok(half) = Fixed::from_ratio(1, 2, Rounding::Down) else {
            panic!("expected Ok");
        };
        let Ok(v) = ln(half) else {
            panic!("expected Ok");
        };
        assert_close(v, -LN2_BITS, TOL);
    }

    #[test]
    fn ln_rejects_zero_and_negative() {
        assert!(ln(Fixed::ZERO).is_err());
        assert!(ln(Fixed::from_bits(-1)).is_err());
    }

    #[test]
    fn exp_of_zero_is_exactly_one() {
        let Ok(v) = exp(Fixed::ZERO) else {
            panic!("expected Ok");
        };
        assert_eq!(v, Fixed::ONE);
    }

    #[test]
    fn exp_of_one() {
        let Ok(v) = exp(Fixed::ONE) else {
            panic!("expected Ok");
        };
        assert_close(v, E_BITS, TOL);
    }

    #[test]
    fn exp_of_minus_one() {
        let minus_one = Fixed::from_bits(-(1i128 << 48));
        let Ok(v) = exp(minus_one) else {
            panic!("expected Ok");
        };
        assert_close(v, EXP_NEG1_BITS, TOL);
    }

    #[test]
    fn exp_ln_round_trip() {
        for int in [2u64, 3, 7, 100, 12_345] {
            let x = Fixed::from_int(int);
            let Ok(l) = ln(x) else {
                panic!("expected Ok");
            };
            let Ok(back) = exp(l) else {
                panic!("expected Ok");
            };
            // relative tolerance: value * 2^-40
            let tol = (x.to_bits() >> 40).max(TOL);
            assert_close(back, x.to_bits(), tol);
        }
    }

    #[test]
    fn exp_overflow_surfaces() {
        assert_eq!(
            exp(Fixed::from_int(100)),
            Err(CurveError::Overflow("exp result exceeds fixed-point range"))
        );
    }

    #[test]
    fn exp_deep_negative_truncates_to_zero() {
        let deep = Fixed::from_bits(-(200i128 << 48));
        let Ok(v) = exp(deep) else {
            panic!("expected Ok");
        };
        assert_eq!(v, Fixed::ZERO);
    }

    #[test]
    fn pow_exact_shortcuts() {
        let Ok(half) = Fixed::from_ratio(1, 2, Rounding::Down) else {
            panic!("expected Ok");
        };
        // x^0 = 1, x^1 = x, 1^y = 1, 0^y = 0 -- all bit-exact
        assert_eq!(pow(Fixed::from_int(9), Fixed::ZERO, Rounding::Down), Ok(Fixed::ONE));
        assert_eq!(
            pow(Fixed::from_int(9), Fixed::ONE, Rounding::Down),
            Ok(Fixed::from_int(9))
        );
        assert_eq!(pow(Fixed::ONE, half, Rounding::Down), Ok(Fixed::ONE));
        assert_eq!(pow(Fixed::ZERO, half, Rounding::Down), Ok(Fixed::ZERO));
    }

    #[test]
    fn pow_square_root_of_two() {
        let Ok(half) = Fixed::from_ratio(1, 2, Rounding::Down) else {
            panic!("expected Ok");
        };
        let Ok(v) = pow(Fixed::from_int(2), half, Rounding::Down) else {
            panic!("expected Ok");
        };
        assert_close(v, SQRT2_BITS, TOL);
    }

    #[test]
    fn pow_two_to_the_0_3() {
        let Ok(e3) = Fixed::from_ratio(3, 10, Rounding::Down) else {
            panic!("expected Ok");
        };
        let Ok(v) = pow(Fixed::from_int(2), e3, Rounding::Down) else {
            panic!("expected Ok");
        };
        assert_close(v, TWO_POW_0_3_BITS, TOL);
    }

    #[test]
    fn pow_integer_exponent_matches_repeated_multiplication() {
        let Ok(cube) = pow(Fixed::from_int(3), Fixed::from_int(3), Rounding::Down) else {
            panic!("expected Ok");
        };
        // wider tolerance: the power-of-two rescale in exp amplifies series
        // truncation for results this large
        assert_close(cube, 27i128 << 48, 1 << 13);
    }

    #[test]
    fn pow_rounding_direction_brackets_truth() {
        let Ok(half) = Fixed::from_ratio(1, 2, Rounding::Down) else {
            panic!("expected Ok");
        };
        let Ok(down) = pow(Fixed::from_int(2), half, Rounding::Down) else {
            panic!("expected Ok");
        };
        let Ok(up) = pow(Fixed::from_int(2), half, Rounding::Up) else {
            panic!("expected Ok");
        };
        assert!(down.to_bits() <= SQRT2_BITS);
        assert!(up.to_bits() >= SQRT2_BITS);
        assert!(down < up);
    }

    #[test]
    fn pow_rejects_negative_operands() {
        let neg = Fixed::from_bits(-1);
        assert!(pow(neg, Fixed::ONE, Rounding::Down).is_err());
        assert!(pow(Fixed::ONE, neg, Rounding::Down).is_err());
    }

    #[test]
    fn pow_monotonic_in_base() {
        let Ok(half) = Fixed::from_ratio(1, 2, Rounding::Down) else {
            panic!("expected Ok");
        };
        let mut prev = Fixed::ZERO;
        for int in [2u64, 3, 5, 9, 100] {
            let Ok(v) = pow(Fixed::from_int(int), half, Rounding::Down) else {
                panic!("expected Ok");
            };
            assert!(v > prev, "pow not increasing at base {int}");
            prev = v;
        }
    }
}
