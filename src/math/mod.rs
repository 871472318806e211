//! Deterministic fixed-point arithmetic for curve calculations.
//!
//! This module provides [`Fixed`], a checked wrapper over the `fixed`
//! crate's `I80F48` with explicit rounding and lossless conversion to and
//! from 18-decimal [`Amount`](crate::domain::Amount)s, plus bounded-iteration
//! [`ln`], [`exp`], and [`pow`] implementations.
//!
//! No floating point is used anywhere on the value path, so every result is
//! bit-reproducible across platforms.

mod fixed_point;
mod transcendental;

pub use fixed_point::Fixed;
pub use transcendental::{exp, ln, pow};
