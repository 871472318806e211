//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use ember_curve::prelude::*;
//! ```
//!
//! This re-exports the most frequently used domain types, the curve and
//! factory entry points, the bridge trait, and the error types so that
//! consumers don't need to import from individual submodules.

// Re-export domain types
pub use crate::domain::{
    AccountId, Amount, BuyReceipt, GraduationSummary, Ppm, Rounding, SellReceipt, TokenId,
};

// Re-export the curve state machine
pub use crate::curve::{BondingCurve, CurveStatus};

// Re-export configuration
pub use crate::config::{CurveConfig, GraduationPlan};

// Re-export the bridge seam
pub use crate::traits::{LiquidityBridge, PoolShareReceipt};

// Re-export the factory
pub use crate::factory::{CurveFactory, CurveHandle, FactoryDefaults};

// Re-export error types
pub use crate::error::{CurveError, Result};
