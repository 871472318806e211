//! Unified error types for the ember-curve library.
//!
//! All fallible operations across the crate return [`CurveError`] as their
//! error type, ensuring a consistent error handling experience for consumers.
//!
//! Errors are returned synchronously and nothing is retried internally:
//! every buy or sell is a priced, fee-bearing action, so retry policy belongs
//! to the caller. Arithmetic that would overflow or underflow the fixed-point
//! range is always surfaced, never silently saturated.

use core::fmt;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, CurveError>;

/// Unified error enum for every fallible operation in the crate.
///
/// Variants carry a `&'static str` context message describing the exact
/// computation or check that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveError {
    /// A zero deposit or sell amount, or an amount that prices to nothing.
    InvalidAmount(&'static str),
    /// A buy would push the real supply above the configured cap.
    SupplyCapExceeded,
    /// A sell amount exceeds the real supply issued by the curve.
    InsufficientSupply,
    /// A buy or sell was attempted after the curve graduated.
    CurveGraduated,
    /// An out-of-range or inconsistent value in a curve configuration.
    InvalidConfiguration(&'static str),
    /// The caller is not authorized for the requested operation.
    Unauthorized,
    /// A curve already exists for the given token.
    DuplicateCurve,
    /// No curve is registered for the given token.
    CurveNotFound,
    /// The liquidity bridge rejected the graduation deposit.
    BridgeFailure(&'static str),
    /// A fixed-point computation exceeded the representable range.
    Overflow(&'static str),
    /// A fixed-point computation produced a value below the representable range.
    Underflow(&'static str),
    /// Division by zero.
    DivisionByZero,
    /// An internal pricing invariant was violated. The triggering operation
    /// is aborted with no state change; clamping is never attempted because
    /// it would corrupt pricing for all future calls.
    InvariantViolation(&'static str),
}

impl fmt::Display for CurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAmount(msg) => write!(f, "invalid amount: {msg}"),
            Self::SupplyCapExceeded => write!(f, "purchase would exceed the total supply cap"),
            Self::InsufficientSupply => write!(f, "sell amount exceeds real supply"),
            Self::CurveGraduated => write!(f, "curve has graduated; trade on the external pool"),
            Self::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            Self::Unauthorized => write!(f, "caller is not authorized"),
            Self::DuplicateCurve => write!(f, "a curve already exists for this token"),
            Self::CurveNotFound => write!(f, "no curve registered for this token"),
            Self::BridgeFailure(msg) => write!(f, "liquidity bridge failure: {msg}"),
            Self::Overflow(msg) => write!(f, "arithmetic overflow: {msg}"),
            Self::Underflow(msg) => write!(f, "arithmetic underflow: {msg}"),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::InvariantViolation(msg) => write!(f, "invariant violation: {msg}"),
        }
    }
}

impl std::error::Error for CurveError {}
