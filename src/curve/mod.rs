//! The per-token bonding curve state machine.

mod bonding_curve;

#[cfg(test)]
mod proptest_properties;

pub use bonding_curve::{BondingCurve, CurveStatus};
