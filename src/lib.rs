//! # Ember Curve
//!
//! Bonding-curve token launch engine: deterministic fixed-point pricing,
//! per-token curve state machines, and a factory/registry that takes a
//! token from its first buy to graduation into an external liquidity pool.
//!
//! Tokens launched through this engine are priced by a constant-power
//! bonding curve (Bancor style) instead of an order book. Participants buy
//! and sell against the curve; once the curve's connector balance reaches a
//! configured threshold, the curve *graduates* — its liquidity moves to an
//! external pool through the [`LiquidityBridge`](traits::LiquidityBridge)
//! seam and the curve stops trading, permanently.
//!
//! All value math runs on a checked `I80F48` fixed-point type with
//! deterministic, bounded-iteration `ln`/`exp`/`pow` — results are
//! bit-reproducible across platforms, and every rounding decision favours
//! the curve over the caller.
//!
//! # Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! ember-curve = "0.1"
//! ```
//!
//! ## Launch a token and trade against its curve
//!
//! ```rust
//! use ember_curve::config::GraduationPlan;
//! use ember_curve::domain::{AccountId, Amount, Ppm, TokenId};
//! use ember_curve::factory::{CurveFactory, FactoryDefaults};
//! use ember_curve::traits::{LiquidityBridge, PoolShareReceipt};
//!
//! const WAD: u128 = 1_000_000_000_000_000_000; // one whole unit
//!
//! // 1. Fix the process-wide launch parameters
//! let plan = GraduationPlan::new(
//!     Amount::new(42 * WAD / 10), // graduate at 4.2 connector units
//!     Amount::new(4 * WAD),       // 4.0 to the external pool
//!     Amount::new(WAD / 10),      // 0.1 liquidity fee
//!     Amount::new(WAD / 10),      // 0.1 developer reward
//! )
//! .expect("valid plan");
//! let defaults = FactoryDefaults::new(
//!     Ppm::HALF,        // 50% reserve ratio
//!     Ppm::new(10_000), // 1% swap fee
//!     plan,
//! )
//! .expect("valid defaults");
//! let factory = CurveFactory::new(
//!     defaults,
//!     AccountId::from_bytes([7u8; 32]), // fee recipient
//!     AccountId::from_bytes([8u8; 32]), // fee recipient setter
//! );
//!
//! // 2. Create a curve for a new token
//! let handle = factory
//!     .create_curve_with_defaults(
//!         TokenId::from_bytes([1u8; 32]),
//!         Amount::new(1_000_000 * WAD), // supply cap
//!         Amount::new(1_000 * WAD),     // virtual token reserve
//!         Amount::new(WAD),             // virtual connector reserve
//!     )
//!     .expect("curve created");
//!
//! // 3. Buy against the curve (the bridge only fires at graduation)
//! struct Pool;
//! impl LiquidityBridge for Pool {
//!     fn provide_liquidity(
//!         &mut self,
//!         token: TokenId,
//!         connector_amount: Amount,
//!     ) -> ember_curve::error::Result<PoolShareReceipt> {
//!         Ok(PoolShareReceipt::new(token, connector_amount, connector_amount))
//!     }
//! }
//! let mut pool = Pool;
//! let mut curve = handle.lock().expect("not poisoned");
//! let receipt = curve.buy(Amount::new(WAD), &mut pool).expect("buy succeeded");
//!
//! assert!(receipt.tokens_out().get() > 0);
//! assert!(!receipt.graduated());
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Consumer   │  uses CurveFactory + CurveHandle
//! └──────┬──────┘
//!        │ create_curve(token, config)
//!        ▼
//! ┌─────────────┐
//! │   Factory    │  validates config, owns the token → curve registry
//! └──────┬──────┘
//!        │ Arc<Mutex<BondingCurve>> (one writer per curve)
//!        ▼
//! ┌─────────────┐
//! │    Curve     │  buy / sell / quotes, graduation state machine
//! └──────┬──────┘
//!        │ purchase_return / sale_return        │ provide_liquidity
//!        ▼                                      ▼ (at graduation)
//! ┌─────────────┐                        ┌─────────────┐
//! │   Formula    │  pure Bancor math     │   Bridge     │  external pool
//! └──────┬──────┘                        └─────────────┘
//!        │ Fixed, ln / exp / pow
//!        ▼
//! ┌─────────────┐
//! │    Math      │  checked I80F48, deterministic transcendentals
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Ppm`](domain::Ppm), [`TokenId`](domain::TokenId), trade receipts |
//! | [`math`]   | [`Fixed`](math::Fixed) checked fixed-point plus deterministic [`ln`](math::ln)/[`exp`](math::exp)/[`pow`](math::pow) |
//! | [`formula`] | Pure Bancor pricing: [`purchase_return`](formula::purchase_return), [`sale_return`](formula::sale_return), quotes, slope |
//! | [`config`] | Validated curve blueprints: [`CurveConfig`](config::CurveConfig), [`GraduationPlan`](config::GraduationPlan) |
//! | [`curve`]  | [`BondingCurve`](curve::BondingCurve) state machine with one-shot graduation |
//! | [`traits`] | The [`LiquidityBridge`](traits::LiquidityBridge) seam to the external pool |
//! | [`factory`] | [`CurveFactory`](factory::CurveFactory) registry and global fee parameters |
//! | [`error`]  | [`CurveError`](error::CurveError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod curve;
pub mod domain;
pub mod error;
pub mod factory;
pub mod formula;
pub mod math;
pub mod prelude;
pub mod traits;
