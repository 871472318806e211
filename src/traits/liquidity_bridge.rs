//! The seam between a graduating curve and the external liquidity venue.
//!
//! A [`BondingCurve`](crate::curve::BondingCurve) never talks to a pool
//! directly. When the graduation threshold is crossed, the crossing buy
//! hands the carved-out connector to a [`LiquidityBridge`] and commits its
//! own state only after the bridge succeeds. A failed bridge call leaves
//! the curve exactly as it was before the buy, so the caller can retry.
//!
//! # Ordering Invariant
//!
//! Implementations are called **before** the curve mutates any of its own
//! state. They must therefore be atomic from the curve's point of view: on
//! [`Err`], no external effect may persist.

use core::fmt;

use crate::domain::{Amount, TokenId};

/// Proof of a completed graduation deposit, returned by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolShareReceipt {
    token: TokenId,
    connector_deposited: Amount,
    pool_shares: Amount,
}

impl PoolShareReceipt {
    /// Creates a new receipt.
    #[must_use]
    pub const fn new(token: TokenId, connector_deposited: Amount, pool_shares: Amount) -> Self {
        Self {
            token,
            connector_deposited,
            pool_shares,
        }
    }

    /// The token whose curve graduated.
    #[must_use]
    pub const fn token(&self) -> TokenId {
        self.token
    }

    /// Connector actually deposited into the pool.
    #[must_use]
    pub const fn connector_deposited(&self) -> Amount {
        self.connector_deposited
    }

    /// Pool shares minted for the deposit.
    #[must_use]
    pub const fn pool_shares(&self) -> Amount {
        self.pool_shares
    }
}

impl fmt::Display for PoolShareReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "deposited {} connector for {} shares ({})",
            self.connector_deposited, self.pool_shares, self.token
        )
    }
}

/// Destination for the liquidity carved out of a graduating curve.
///
/// # Errors
///
/// A deposit that cannot complete returns
/// [`CurveError::BridgeFailure`](crate::error::CurveError::BridgeFailure)
/// (or any other error the venue maps to); the curve then aborts the
/// crossing buy without mutating state.
pub trait LiquidityBridge {
    /// Deposits `connector_amount` of graduation liquidity for `token`.
    ///
    /// Called at most once per curve, on the buy that crosses the
    /// graduation threshold.
    fn provide_liquidity(
        &mut self,
        token: TokenId,
        connector_amount: Amount,
    ) -> crate::error::Result<PoolShareReceipt>;
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn receipt_accessors() {
        let token = TokenId::from_bytes([3u8; 32]);
        let r = PoolShareReceipt::new(token, Amount::new(400), Amount::new(20));
        assert_eq!(r.token(), token);
        assert_eq!(r.connector_deposited(), Amount::new(400));
        assert_eq!(r.pool_shares(), Amount::new(20));
    }

    #[test]
    fn receipt_display_mentions_amounts() {
        let r = PoolShareReceipt::new(TokenId::zero(), Amount::new(400), Amount::new(20));
        let s = format!("{r}");
        assert!(s.contains("400"));
        assert!(s.contains("20"));
    }
}
