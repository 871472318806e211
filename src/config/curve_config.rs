//! Configuration for bonding curves.

use crate::domain::{AccountId, Amount, Ppm};
use crate::error::CurveError;

/// The connector carve-out executed when a curve graduates.
///
/// When the real connector balance reaches `threshold`, the curve stops
/// trading and splits its connector holdings in a fixed order:
///
/// 1. `liquidity` is deposited into the external pool via the liquidity
///    bridge,
/// 2. `liquidity_fee` is credited to the fee recipient,
/// 3. `dev_reward` is credited to the token creator,
/// 4. anything left over stays on the curve as dust.
///
/// Each split is capped at the connector actually available when its turn
/// comes, so a curve that barely crosses the threshold still graduates
/// cleanly.
///
/// # Validation
///
/// - `threshold` must be non-zero.
/// - No single split may exceed `threshold` (a split that could never be
///   paid in full is a configuration mistake, not a runtime condition).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraduationPlan {
    threshold: Amount,
    liquidity: Amount,
    liquidity_fee: Amount,
    dev_reward: Amount,
}

impl GraduationPlan {
    /// Creates a new `GraduationPlan`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] if `threshold` is zero
    /// or any split exceeds it.
    pub fn new(
        threshold: Amount,
        liquidity: Amount,
        liquidity_fee: Amount,
        dev_reward: Amount,
    ) -> crate::error::Result<Self> {
        let plan = Self {
            threshold,
            liquidity,
            liquidity_fee,
            dev_reward,
        };
        plan.validate()?;
        Ok(plan)
    }

    /// Validates all plan invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] if `threshold` is zero
    /// or any split exceeds it.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.threshold.is_zero() {
            return Err(CurveError::InvalidConfiguration(
                "graduation threshold must be non-zero",
            ));
        }
        if self.liquidity > self.threshold {
            return Err(CurveError::InvalidConfiguration(
                "liquidity split exceeds graduation threshold",
            ));
        }
        if self.liquidity_fee > self.threshold {
            return Err(CurveError::InvalidConfiguration(
                "liquidity fee split exceeds graduation threshold",
            ));
        }
        if self.dev_reward > self.threshold {
            return Err(CurveError::InvalidConfiguration(
                "dev reward split exceeds graduation threshold",
            ));
        }
        Ok(())
    }

    /// Real connector balance at which the curve graduates.
    #[must_use]
    pub const fn threshold(&self) -> Amount {
        self.threshold
    }

    /// Connector deposited into the external pool on graduation.
    #[must_use]
    pub const fn liquidity(&self) -> Amount {
        self.liquidity
    }

    /// Connector credited to the fee recipient on graduation.
    #[must_use]
    pub const fn liquidity_fee(&self) -> Amount {
        self.liquidity_fee
    }

    /// Connector credited to the token creator on graduation.
    #[must_use]
    pub const fn dev_reward(&self) -> Amount {
        self.dev_reward
    }
}

/// Immutable parameters for a single bonding curve.
///
/// Fixed at curve creation; the only value that changes after construction
/// is the fee recipient, which the factory may rotate for curves created
/// afterwards (already-created curves keep the recipient they were born
/// with).
///
/// # Validation
///
/// - `supply_cap` must be non-zero; it bounds the real issued supply.
/// - `reserve_ratio` must be in `(0, 1_000_000]` ppm.
/// - `swap_fee` must be at most `1_000_000` ppm.
/// - Virtual reserves must be both zero (a cold-start curve) or both
///   non-zero (a pre-seeded price point); exactly one zero leaves the
///   formula with an indeterminate spot price.
/// - The graduation plan validates its own invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveConfig {
    supply_cap: Amount,
    reserve_ratio: Ppm,
    virtual_token_reserve: Amount,
    virtual_connector_reserve: Amount,
    graduation: GraduationPlan,
    swap_fee: Ppm,
    fee_recipient: AccountId,
    fee_recipient_setter: AccountId,
}

impl CurveConfig {
    /// Creates a new `CurveConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] if any invariant in the
    /// type-level documentation is violated.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        supply_cap: Amount,
        reserve_ratio: Ppm,
        virtual_token_reserve: Amount,
        virtual_connector_reserve: Amount,
        graduation: GraduationPlan,
        swap_fee: Ppm,
        fee_recipient: AccountId,
        fee_recipient_setter: AccountId,
    ) -> crate::error::Result<Self> {
        let config = Self {
            supply_cap,
            reserve_ratio,
            virtual_token_reserve,
            virtual_connector_reserve,
            graduation,
            swap_fee,
            fee_recipient,
            fee_recipient_setter,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] on the first violated
    /// invariant.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.supply_cap.is_zero() {
            return Err(CurveError::InvalidConfiguration(
                "supply cap must be non-zero",
            ));
        }
        if !self.reserve_ratio.is_valid_ratio() {
            return Err(CurveError::InvalidConfiguration(
                "reserve ratio must be in (0, 1000000] ppm",
            ));
        }
        if !self.swap_fee.is_valid_fee() {
            return Err(CurveError::InvalidConfiguration(
                "swap fee must be at most 1000000 ppm",
            ));
        }
        let token_zero = self.virtual_token_reserve.is_zero();
        let connector_zero = self.virtual_connector_reserve.is_zero();
        if token_zero != connector_zero {
            return Err(CurveError::InvalidConfiguration(
                "virtual reserves must be both zero or both non-zero",
            ));
        }
        self.graduation.validate()
    }

    /// Maximum real issued supply, always non-zero.
    #[must_use]
    pub const fn supply_cap(&self) -> Amount {
        self.supply_cap
    }

    /// Reserve ratio in parts per million.
    #[must_use]
    pub const fn reserve_ratio(&self) -> Ppm {
        self.reserve_ratio
    }

    /// Virtual token reserve added to the real supply for pricing.
    #[must_use]
    pub const fn virtual_token_reserve(&self) -> Amount {
        self.virtual_token_reserve
    }

    /// Virtual connector reserve added to the real balance for pricing.
    #[must_use]
    pub const fn virtual_connector_reserve(&self) -> Amount {
        self.virtual_connector_reserve
    }

    /// The graduation carve-out plan.
    #[must_use]
    pub const fn graduation(&self) -> &GraduationPlan {
        &self.graduation
    }

    /// Swap fee in parts per million, charged on every buy and sell.
    #[must_use]
    pub const fn swap_fee(&self) -> Ppm {
        self.swap_fee
    }

    /// Account credited with swap fees and the graduation liquidity fee.
    #[must_use]
    pub const fn fee_recipient(&self) -> AccountId {
        self.fee_recipient
    }

    /// The only account allowed to rotate the factory's fee recipient.
    #[must_use]
    pub const fn fee_recipient_setter(&self) -> AccountId {
        self.fee_recipient_setter
    }
}
