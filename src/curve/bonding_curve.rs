//! Per-token curve state machine: reserves, trading, graduation.

use core::fmt;

use crate::config::CurveConfig;
use crate::domain::{Amount, BuyReceipt, GraduationSummary, Rounding, SellReceipt, TokenId};
use crate::error::CurveError;
use crate::formula;
use crate::math::Fixed;
use crate::traits::LiquidityBridge;

/// Lifecycle status of a [`BondingCurve`].
///
/// The transition `Active -> Graduated` happens at most once, on the buy
/// that pushes the real connector balance to the graduation threshold, and
/// is irreversible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveStatus {
    /// The curve prices trades itself; buys and sells are accepted.
    Active,
    /// Liquidity has moved to the external pool; all trading is rejected.
    Graduated,
}

impl fmt::Display for CurveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Graduated => write!(f, "Graduated"),
        }
    }
}

/// Connector split computed for a graduating curve, before any state is
/// touched.
struct GraduationCarve {
    liquidity: Amount,
    liquidity_fee: Amount,
    dev_reward: Amount,
    dust: Amount,
}

/// A single token's bonding curve.
///
/// Owns the mutable trading state (real supply, real connector balance,
/// fee accrual, status) and an immutable [`CurveConfig`]. Every trade is
/// all-or-nothing: all deltas are computed into locals first and committed
/// only once nothing can fail, so an error — including a failed liquidity
/// bridge call mid-graduation — leaves the curve untouched.
///
/// Pricing always runs on *effective* values: virtual reserves from the
/// config plus the real balances held here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondingCurve {
    token_id: TokenId,
    config: CurveConfig,
    real_supply: Amount,
    real_connector: Amount,
    fees_accrued: Amount,
    status: CurveStatus,
}

impl BondingCurve {
    /// Creates a fresh `Active` curve with zero real balances.
    ///
    /// The config is assumed validated; [`CurveConfig::new`] is the only
    /// way to obtain one.
    #[must_use]
    pub const fn new(token_id: TokenId, config: CurveConfig) -> Self {
        Self {
            token_id,
            config,
            real_supply: Amount::ZERO,
            real_connector: Amount::ZERO,
            fees_accrued: Amount::ZERO,
            status: CurveStatus::Active,
        }
    }

    /// The identity of the token this curve issues.
    #[must_use]
    pub const fn token_id(&self) -> TokenId {
        self.token_id
    }

    /// The immutable curve parameters.
    #[must_use]
    pub const fn config(&self) -> &CurveConfig {
        &self.config
    }

    /// Current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> CurveStatus {
        self.status
    }

    /// Real issued supply and real connector balance, in that order.
    ///
    /// Virtual reserves are excluded; they exist only inside the pricing
    /// formula.
    #[must_use]
    pub const fn reserves(&self) -> (Amount, Amount) {
        (self.real_supply, self.real_connector)
    }

    /// Total swap fees (plus the graduation liquidity fee, once paid)
    /// accrued to the configured fee recipient.
    #[must_use]
    pub const fn fees_accrued(&self) -> Amount {
        self.fees_accrued
    }

    fn effective_supply(&self) -> crate::error::Result<Amount> {
        self.config
            .virtual_token_reserve()
            .checked_add(&self.real_supply)
            .ok_or(CurveError::Overflow("effective supply overflow"))
    }

    fn effective_connector(&self) -> crate::error::Result<Amount> {
        self.config
            .virtual_connector_reserve()
            .checked_add(&self.real_connector)
            .ok_or(CurveError::Overflow("effective connector overflow"))
    }

    fn ensure_active(&self) -> crate::error::Result<()> {
        match self.status {
            CurveStatus::Active => Ok(()),
            CurveStatus::Graduated => Err(CurveError::CurveGraduated),
        }
    }

    /// Splits fee off a gross amount: fee rounds up, so the net can never
    /// exceed its exact value.
    fn split_fee(&self, gross: Amount) -> crate::error::Result<(Amount, Amount)> {
        let fee = self.config.swap_fee().apply(gross, Rounding::Up)?;
        let net = gross
            .checked_sub(&fee)
            .ok_or(CurveError::Underflow("fee exceeds gross amount"))?;
        Ok((fee, net))
    }

    /// Carves the post-buy connector balance into the graduation splits, in
    /// plan order, each capped at what remains.
    fn carve_graduation(&self, balance: Amount) -> crate::error::Result<GraduationCarve> {
        let plan = self.config.graduation();
        let underflow = CurveError::Underflow("graduation carve underflow");

        let liquidity = plan.liquidity().min(balance);
        let remaining = balance.checked_sub(&liquidity).ok_or(underflow)?;
        let liquidity_fee = plan.liquidity_fee().min(remaining);
        let remaining = remaining.checked_sub(&liquidity_fee).ok_or(underflow)?;
        let dev_reward = plan.dev_reward().min(remaining);
        let dust = remaining.checked_sub(&dev_reward).ok_or(underflow)?;

        Ok(GraduationCarve {
            liquidity,
            liquidity_fee,
            dev_reward,
            dust,
        })
    }

    /// Buys tokens from the curve for `deposit` connector units.
    ///
    /// The swap fee is carved from the deposit first; the net amount is
    /// priced through the purchase formula and added to the connector
    /// balance. If the post-buy balance reaches the graduation threshold,
    /// the graduation carve runs and the liquidity split is handed to
    /// `bridge` before any state commits — a bridge failure rolls the whole
    /// buy back.
    ///
    /// # Errors
    ///
    /// - [`CurveError::CurveGraduated`] after graduation.
    /// - [`CurveError::InvalidAmount`] for a zero deposit, a deposit
    ///   consumed entirely by the fee, or one too small to mint any tokens.
    /// - [`CurveError::SupplyCapExceeded`] if minting would push the real
    ///   supply past the cap; state is unchanged.
    /// - [`CurveError::BridgeFailure`] (or whatever the bridge returns) if
    ///   the graduation deposit fails; state is unchanged and the curve
    ///   stays `Active`.
    /// - [`CurveError::Overflow`] on arithmetic overflow.
    pub fn buy(
        &mut self,
        deposit: Amount,
        bridge: &mut dyn LiquidityBridge,
    ) -> crate::error::Result<BuyReceipt> {
        self.ensure_active()?;
        if deposit.is_zero() {
            return Err(CurveError::InvalidAmount("deposit must be positive"));
        }
        let (fee, net) = self.split_fee(deposit)?;
        if net.is_zero() {
            return Err(CurveError::InvalidAmount("deposit consumed entirely by fee"));
        }

        let tokens_out = formula::purchase_return(
            self.effective_supply()?,
            self.effective_connector()?,
            net,
            self.config.reserve_ratio(),
        )?;
        if tokens_out.is_zero() {
            return Err(CurveError::InvalidAmount("deposit too small to mint tokens"));
        }

        let new_supply = self
            .real_supply
            .checked_add(&tokens_out)
            .ok_or(CurveError::Overflow("real supply overflow"))?;
        if new_supply > self.config.supply_cap() {
            return Err(CurveError::SupplyCapExceeded);
        }
        let new_connector = self
            .real_connector
            .checked_add(&net)
            .ok_or(CurveError::Overflow("real connector overflow"))?;

        if new_connector >= self.config.graduation().threshold() {
            let carve = self.carve_graduation(new_connector)?;
            // External call before any state commit: on Err the curve is
            // untouched and stays Active.
            let pool = bridge.provide_liquidity(self.token_id, carve.liquidity)?;
            let new_fees = Self::accrued(self.fees_accrued, fee)
                .and_then(|total| Self::accrued(total, carve.liquidity_fee))?;
            let receipt = BuyReceipt::new(
                deposit,
                fee,
                tokens_out,
                Some(GraduationSummary::new(
                    carve.liquidity,
                    pool.pool_shares(),
                    carve.liquidity_fee,
                    carve.dev_reward,
                    carve.dust,
                )),
            )?;

            // Nothing below can fail; the buy commits atomically.
            self.real_supply = new_supply;
            self.real_connector = carve.dust;
            self.fees_accrued = new_fees;
            self.status = CurveStatus::Graduated;
            Ok(receipt)
        } else {
            let new_fees = Self::accrued(self.fees_accrued, fee)?;
            let receipt = BuyReceipt::new(deposit, fee, tokens_out, None)?;

            self.real_supply = new_supply;
            self.real_connector = new_connector;
            self.fees_accrued = new_fees;
            Ok(receipt)
        }
    }

    /// Sells `tokens` back to the curve for connector units.
    ///
    /// The gross return comes from the sale formula; the swap fee is carved
    /// from it, and the full gross amount leaves the connector balance
    /// (net to the seller, fee to the recipient).
    ///
    /// # Errors
    ///
    /// - [`CurveError::CurveGraduated`] after graduation.
    /// - [`CurveError::InvalidAmount`] for a zero amount or one pricing to
    ///   zero connector out.
    /// - [`CurveError::InsufficientSupply`] if `tokens` exceeds the real
    ///   issued supply.
    /// - [`CurveError::InvariantViolation`] if the formula prices the sale
    ///   above the real connector balance; the operation aborts rather than
    ///   clamp, since clamping would corrupt pricing for every later call.
    pub fn sell(&mut self, tokens: Amount) -> crate::error::Result<SellReceipt> {
        self.ensure_active()?;
        if tokens.is_zero() {
            return Err(CurveError::InvalidAmount("sell amount must be positive"));
        }
        if tokens > self.real_supply {
            return Err(CurveError::InsufficientSupply);
        }

        let gross = formula::sale_return(
            self.effective_supply()?,
            self.effective_connector()?,
            tokens,
            self.config.reserve_ratio(),
        )?;
        if gross > self.real_connector {
            return Err(CurveError::InvariantViolation(
                "sale return exceeds real connector balance",
            ));
        }
        let (fee, net_out) = self.split_fee(gross)?;
        if net_out.is_zero() {
            return Err(CurveError::InvalidAmount("sale prices to zero connector"));
        }

        let new_supply = self
            .real_supply
            .checked_sub(&tokens)
            .ok_or(CurveError::Underflow("real supply underflow"))?;
        let new_connector = self
            .real_connector
            .checked_sub(&gross)
            .ok_or(CurveError::Underflow("real connector underflow"))?;

        let new_fees = Self::accrued(self.fees_accrued, fee)?;
        let receipt = SellReceipt::new(tokens, fee, net_out)?;

        self.real_supply = new_supply;
        self.real_connector = new_connector;
        self.fees_accrued = new_fees;
        Ok(receipt)
    }

    /// Prices a buy without mutating state or touching the bridge.
    ///
    /// The receipt is identical to what [`buy`](Self::buy) would return,
    /// except that a would-graduate quote reports zero pool shares — those
    /// are known only after the bridge call.
    ///
    /// # Errors
    ///
    /// Same as [`buy`](Self::buy), minus the bridge failures.
    pub fn quote_buy(&self, deposit: Amount) -> crate::error::Result<BuyReceipt> {
        self.ensure_active()?;
        if deposit.is_zero() {
            return Err(CurveError::InvalidAmount("deposit must be positive"));
        }
        let (fee, net) = self.split_fee(deposit)?;
        if net.is_zero() {
            return Err(CurveError::InvalidAmount("deposit consumed entirely by fee"));
        }

        let tokens_out = formula::purchase_return(
            self.effective_supply()?,
            self.effective_connector()?,
            net,
            self.config.reserve_ratio(),
        )?;
        if tokens_out.is_zero() {
            return Err(CurveError::InvalidAmount("deposit too small to mint tokens"));
        }
        let new_supply = self
            .real_supply
            .checked_add(&tokens_out)
            .ok_or(CurveError::Overflow("real supply overflow"))?;
        if new_supply > self.config.supply_cap() {
            return Err(CurveError::SupplyCapExceeded);
        }
        let new_connector = self
            .real_connector
            .checked_add(&net)
            .ok_or(CurveError::Overflow("real connector overflow"))?;

        let graduation = if new_connector >= self.config.graduation().threshold() {
            let carve = self.carve_graduation(new_connector)?;
            Some(GraduationSummary::new(
                carve.liquidity,
                Amount::ZERO,
                carve.liquidity_fee,
                carve.dev_reward,
                carve.dust,
            ))
        } else {
            None
        };
        BuyReceipt::new(deposit, fee, tokens_out, graduation)
    }

    /// Prices a sell without mutating state.
    ///
    /// # Errors
    ///
    /// Same as [`sell`](Self::sell).
    pub fn quote_sell(&self, tokens: Amount) -> crate::error::Result<SellReceipt> {
        self.ensure_active()?;
        if tokens.is_zero() {
            return Err(CurveError::InvalidAmount("sell amount must be positive"));
        }
        if tokens > self.real_supply {
            return Err(CurveError::InsufficientSupply);
        }
        let gross = formula::sale_return(
            self.effective_supply()?,
            self.effective_connector()?,
            tokens,
            self.config.reserve_ratio(),
        )?;
        if gross > self.real_connector {
            return Err(CurveError::InvariantViolation(
                "sale return exceeds real connector balance",
            ));
        }
        let (fee, net_out) = self.split_fee(gross)?;
        if net_out.is_zero() {
            return Err(CurveError::InvalidAmount("sale prices to zero connector"));
        }
        SellReceipt::new(tokens, fee, net_out)
    }

    /// Current marginal price in connector units per token: the Bancor
    /// identity `effective connector / (ratio * effective supply)`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DivisionByZero`] on an empty cold-start curve,
    /// which has no defined price until the first buy.
    pub fn spot_price(&self) -> crate::error::Result<Fixed> {
        let supply = Fixed::from_amount(self.effective_supply()?)?;
        let connector = Fixed::from_amount(self.effective_connector()?)?;
        let denom = Fixed::from_ppm(self.config.reserve_ratio()).checked_mul(&supply)?;
        connector.checked_div(&denom, Rounding::Down)
    }

    /// New accrued-fee total, computed before the trade commits so an
    /// overflow surfaces while state is still untouched.
    fn accrued(total: Amount, fee: Amount) -> crate::error::Result<Amount> {
        total
            .checked_add(&fee)
            .ok_or(CurveError::Overflow("fee accrual overflow"))
    }
}
