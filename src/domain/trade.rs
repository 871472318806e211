//! Outcomes of buy, sell, and graduation operations.

use core::fmt;

use super::Amount;
use crate::error::CurveError;

/// The outcome of a completed buy, including tokens minted, fee paid, and
/// the graduation report when this buy crossed the funding threshold.
///
/// # Invariants
///
/// - `deposit > 0` and `tokens_out > 0`.
/// - `fee < deposit` — the fee is carved from the deposit.
///
/// # Examples
///
/// ```
/// use ember_curve::domain::{Amount, BuyReceipt};
///
/// let receipt = BuyReceipt::new(Amount::new(1000), Amount::new(10), Amount::new(990), None);
/// assert!(receipt.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BuyReceipt {
    deposit: Amount,
    fee: Amount,
    tokens_out: Amount,
    graduation: Option<GraduationSummary>,
}

impl BuyReceipt {
    /// Creates a new `BuyReceipt` with validated invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidAmount`] if `deposit` or `tokens_out`
    /// is zero, or if `fee >= deposit`.
    pub const fn new(
        deposit: Amount,
        fee: Amount,
        tokens_out: Amount,
        graduation: Option<GraduationSummary>,
    ) -> crate::error::Result<Self> {
        if deposit.is_zero() {
            return Err(CurveError::InvalidAmount("deposit must be positive"));
        }
        if tokens_out.is_zero() {
            return Err(CurveError::InvalidAmount("tokens_out must be positive"));
        }
        if fee.get() >= deposit.get() {
            return Err(CurveError::InvalidAmount("fee must be less than deposit"));
        }
        Ok(Self {
            deposit,
            fee,
            tokens_out,
            graduation,
        })
    }

    /// Returns the gross connector amount deposited.
    #[must_use]
    pub const fn deposit(&self) -> Amount {
        self.deposit
    }

    /// Returns the swap fee carved from the deposit.
    #[must_use]
    pub const fn fee(&self) -> Amount {
        self.fee
    }

    /// Returns the tokens minted to the buyer.
    #[must_use]
    pub const fn tokens_out(&self) -> Amount {
        self.tokens_out
    }

    /// Returns `true` if this buy triggered graduation.
    #[must_use]
    pub const fn graduated(&self) -> bool {
        self.graduation.is_some()
    }

    /// Returns the graduation report, if this buy crossed the threshold.
    #[must_use]
    pub const fn graduation(&self) -> Option<&GraduationSummary> {
        self.graduation.as_ref()
    }
}

impl fmt::Display for BuyReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BuyReceipt(deposit={}, fee={}, tokens_out={}, graduated={})",
            self.deposit,
            self.fee,
            self.tokens_out,
            self.graduated()
        )
    }
}

/// The outcome of a completed sell.
///
/// `connector_out` is the net amount paid to the seller; `fee` was carved
/// from the gross sale return before payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SellReceipt {
    tokens_in: Amount,
    fee: Amount,
    connector_out: Amount,
}

impl SellReceipt {
    /// Creates a new `SellReceipt` with validated invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidAmount`] if `tokens_in` or
    /// `connector_out` is zero.
    pub const fn new(
        tokens_in: Amount,
        fee: Amount,
        connector_out: Amount,
    ) -> crate::error::Result<Self> {
        if tokens_in.is_zero() {
            return Err(CurveError::InvalidAmount("tokens_in must be positive"));
        }
        if connector_out.is_zero() {
            return Err(CurveError::InvalidAmount("connector_out must be positive"));
        }
        Ok(Self {
            tokens_in,
            fee,
            connector_out,
        })
    }

    /// Returns the tokens burned by the seller.
    #[must_use]
    pub const fn tokens_in(&self) -> Amount {
        self.tokens_in
    }

    /// Returns the swap fee carved from the gross sale return.
    #[must_use]
    pub const fn fee(&self) -> Amount {
        self.fee
    }

    /// Returns the net connector amount paid to the seller.
    #[must_use]
    pub const fn connector_out(&self) -> Amount {
        self.connector_out
    }
}

impl fmt::Display for SellReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SellReceipt(tokens_in={}, fee={}, connector_out={})",
            self.tokens_in, self.fee, self.connector_out
        )
    }
}

/// Report of a one-time graduation transition.
///
/// The real connector balance is split in fixed order — liquidity, then
/// liquidity fee, then developer reward — each carve capped at the balance
/// remaining at its turn. Whatever is left stays on the curve as `dust`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraduationSummary {
    liquidity_deposited: Amount,
    pool_shares: Amount,
    liquidity_fee: Amount,
    dev_reward: Amount,
    dust: Amount,
}

impl GraduationSummary {
    /// Creates a new `GraduationSummary`.
    #[must_use]
    pub const fn new(
        liquidity_deposited: Amount,
        pool_shares: Amount,
        liquidity_fee: Amount,
        dev_reward: Amount,
        dust: Amount,
    ) -> Self {
        Self {
            liquidity_deposited,
            pool_shares,
            liquidity_fee,
            dev_reward,
            dust,
        }
    }

    /// Returns the connector amount deposited into the liquidity bridge.
    #[must_use]
    pub const fn liquidity_deposited(&self) -> Amount {
        self.liquidity_deposited
    }

    /// Returns the pool shares received from the bridge.
    #[must_use]
    pub const fn pool_shares(&self) -> Amount {
        self.pool_shares
    }

    /// Returns the liquidity fee routed to the fee recipient.
    #[must_use]
    pub const fn liquidity_fee(&self) -> Amount {
        self.liquidity_fee
    }

    /// Returns the one-time developer reward.
    #[must_use]
    pub const fn dev_reward(&self) -> Amount {
        self.dev_reward
    }

    /// Returns the connector amount retained on the curve after the split.
    #[must_use]
    pub const fn dust(&self) -> Amount {
        self.dust
    }
}

impl fmt::Display for GraduationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GraduationSummary(liquidity={}, shares={}, fee={}, dev={}, dust={})",
            self.liquidity_deposited, self.pool_shares, self.liquidity_fee, self.dev_reward, self.dust
        )
    }
}
