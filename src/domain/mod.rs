//! Fundamental domain value types used throughout the curve library.
//!
//! This module contains the core value types that model the bonding-curve
//! domain: token and account identities, raw amounts, parts-per-million
//! ratios, rounding direction, and trade receipts. All types use newtypes
//! with validated constructors to enforce invariants.

mod account_id;
mod amount;
mod ppm;
mod rounding;
mod token_id;
mod trade;

pub use account_id::AccountId;
pub use amount::Amount;
pub use ppm::Ppm;
pub use rounding::Rounding;
pub use token_id::TokenId;
pub use trade::{BuyReceipt, GraduationSummary, SellReceipt};
