//! Trait abstractions at the engine's seams.

mod liquidity_bridge;

pub use liquidity_bridge::{LiquidityBridge, PoolShareReceipt};
