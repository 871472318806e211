//! The pure Formula Engine: closed-form Bancor-style pricing.
//!
//! Stateless fixed-point math converting connector deposits to minted
//! supply and back. The curve family is the constant-power curve
//! `price(s) ∝ s^(1/r - 1)` with reserve ratio `r` in `(0, 1]`:
//!
//! - purchase: `tokens_out = supply * ((1 + deposit/connector)^r - 1)`
//! - sale: `connector_out = connector * (1 - (1 - tokens/supply)^(1/r))`
//!
//! All functions take raw 18-decimal [`Amount`]s and a [`Ppm`] reserve
//! ratio. Rounding always favours the curve: the fractional power rounds
//! down on purchase and up on sale, and final payouts truncate toward zero.
//!
//! # Bootstrap
//!
//! With zero effective supply or connector balance the closed form is
//! indeterminate. The first purchase on an empty curve mints
//! `deposit^r` whole-unit tokens, the slope-seeded initial purchase with
//! the neutral calibration `slope * ratio = 1`. At a 50% ratio this makes
//! the seed case exact: `purchase_return(0, 0, 1.0, 50%) = 1.0`.

use crate::domain::{Amount, Ppm, Rounding};
use crate::error::CurveError;
use crate::math::{self, Fixed};

/// Parts-per-million denominator as `u64` for exponent construction.
const PPM_DENOM: u64 = 1_000_000;

fn check_ratio(ratio: Ppm) -> crate::error::Result<()> {
    if ratio.is_valid_ratio() {
        Ok(())
    } else {
        Err(CurveError::InvalidConfiguration(
            "reserve ratio must be in (0, 1000000] ppm",
        ))
    }
}

/// Tokens minted for a connector deposit against the current curve point.
///
/// Returns zero for a zero deposit, and may truncate a dust deposit to zero
/// minted tokens; callers that must not accept value for nothing reject the
/// zero-output case themselves.
///
/// # Errors
///
/// - [`CurveError::InvalidConfiguration`] for an out-of-range ratio.
/// - [`CurveError::Overflow`] if an intermediate exceeds the fixed-point
///   range.
pub fn purchase_return(
    supply: Amount,
    connector_balance: Amount,
    deposit: Amount,
    ratio: Ppm,
) -> crate::error::Result<Amount> {
    check_ratio(ratio)?;
    if deposit.is_zero() {
        return Ok(Amount::ZERO);
    }

    let d = Fixed::from_amount(deposit)?;

    if supply.is_zero() || connector_balance.is_zero() {
        // Empty curve: seed with deposit^r (slope calibration m * r = 1).
        let minted = math::pow(d, Fixed::from_ppm(ratio), Rounding::Down)?;
        return minted.to_amount(Rounding::Down);
    }

    let s = Fixed::from_amount(supply)?;
    let c = Fixed::from_amount(connector_balance)?;

    if ratio == Ppm::ONE {
        // 100% ratio degenerates to the linear form s * d / c.
        let minted = s.checked_mul(&d)?.checked_div(&c, Rounding::Down)?;
        return minted.to_amount(Rounding::Down);
    }

    let base = Fixed::ONE.checked_add(&d.checked_div(&c, Rounding::Down)?)?;
    let p = math::pow(base, Fixed::from_ppm(ratio), Rounding::Down)?;
    let gain = match p.checked_sub(&Fixed::ONE) {
        Ok(g) if !g.is_negative() => g,
        _ => return Ok(Amount::ZERO),
    };
    s.checked_mul(&gain)?.to_amount(Rounding::Down)
}

/// Connector returned for tokens burned against the current curve point.
///
/// # Errors
///
/// - [`CurveError::InsufficientSupply`] if `sell_amount > supply`.
/// - [`CurveError::InvalidConfiguration`] for an out-of-range ratio.
/// - [`CurveError::Overflow`] if an intermediate exceeds the fixed-point
///   range.
pub fn sale_return(
    supply: Amount,
    connector_balance: Amount,
    sell_amount: Amount,
    ratio: Ppm,
) -> crate::error::Result<Amount> {
    check_ratio(ratio)?;
    if sell_amount.is_zero() {
        return Ok(Amount::ZERO);
    }
    if sell_amount > supply {
        return Err(CurveError::InsufficientSupply);
    }
    if connector_balance.is_zero() {
        return Ok(Amount::ZERO);
    }
    if sell_amount == supply {
        // Full drain pays out the entire connector balance, exactly.
        return Ok(connector_balance);
    }

    let s = Fixed::from_amount(supply)?;
    let c = Fixed::from_amount(connector_balance)?;
    let a = Fixed::from_amount(sell_amount)?;

    if ratio == Ppm::ONE {
        let out = c.checked_mul(&a)?.checked_div(&s, Rounding::Down)?;
        return out.to_amount(Rounding::Down);
    }

    // fraction sold rounds down, so the retained factor rounds up
    let x = a.checked_div(&s, Rounding::Down)?;
    let base = Fixed::ONE.checked_sub(&x)?;
    let inv_ratio = Fixed::from_ratio(PPM_DENOM, u64::from(ratio.get()), Rounding::Down)?;
    let retained = math::pow(base, inv_ratio, Rounding::Up)?.min(Fixed::ONE);
    let paid_fraction = Fixed::ONE.checked_sub(&retained)?;
    c.checked_mul(&paid_fraction)?.to_amount(Rounding::Down)
}

/// Connector deposit required to mint exactly `tokens_out` — the algebraic
/// inverse of [`purchase_return`], rounded against the buyer.
///
/// Feeding the result back into [`purchase_return`] reproduces
/// `tokens_out` within fixed-point rounding tolerance.
///
/// # Errors
///
/// - [`CurveError::InvalidConfiguration`] for an out-of-range ratio.
/// - [`CurveError::Overflow`] if an intermediate exceeds the fixed-point
///   range (a quote this large is unrepresentable, not payable).
pub fn connector_in_for_exact_tokens(
    supply: Amount,
    connector_balance: Amount,
    tokens_out: Amount,
    ratio: Ppm,
) -> crate::error::Result<Amount> {
    check_ratio(ratio)?;
    if tokens_out.is_zero() {
        return Ok(Amount::ZERO);
    }

    let t = Fixed::from_amount(tokens_out)?;
    let inv_ratio = Fixed::from_ratio(PPM_DENOM, u64::from(ratio.get()), Rounding::Up)?;

    if supply.is_zero() || connector_balance.is_zero() {
        // Inverse of the bootstrap seed: d = tokens^(1/r).
        let d = math::pow(t, inv_ratio, Rounding::Up)?;
        return d.to_amount(Rounding::Up);
    }

    let s = Fixed::from_amount(supply)?;
    let c = Fixed::from_amount(connector_balance)?;

    if ratio == Ppm::ONE {
        let d = c.checked_mul(&t)?.checked_div(&s, Rounding::Up)?;
        return d.to_amount(Rounding::Up);
    }

    let base = Fixed::ONE.checked_add(&t.checked_div(&s, Rounding::Up)?)?;
    let p = math::pow(base, inv_ratio, Rounding::Up)?;
    let gain = p.checked_sub(&Fixed::ONE)?.max(Fixed::ZERO);
    c.checked_mul(&gain)?.to_amount(Rounding::Up)
}

/// The slope constant `m = connector / (r * supply^(1/r))` such that the
/// curve passes through the given point. Diagnostic and seeding use only —
/// never on the buy/sell hot path.
///
/// # Errors
///
/// - [`CurveError::DivisionByZero`] if `supply` is zero.
/// - [`CurveError::InvalidConfiguration`] for an out-of-range ratio.
/// - [`CurveError::Overflow`] if `supply^(1/r)` exceeds the fixed-point
///   range.
pub fn slope(
    connector_balance: Amount,
    supply: Amount,
    ratio: Ppm,
) -> crate::error::Result<Fixed> {
    check_ratio(ratio)?;
    if supply.is_zero() {
        return Err(CurveError::DivisionByZero);
    }

    let s = Fixed::from_amount(supply)?;
    let c = Fixed::from_amount(connector_balance)?;
    let inv_ratio = Fixed::from_ratio(PPM_DENOM, u64::from(ratio.get()), Rounding::Down)?;
    let s_pow = math::pow(s, inv_ratio, Rounding::Down)?;
    let denom = Fixed::from_ppm(ratio).checked_mul(&s_pow)?;
    c.checked_div(&denom, Rounding::Down)
}
