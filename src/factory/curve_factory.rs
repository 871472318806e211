//! The curve factory: creation, registry, and global fee parameters.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::config::{CurveConfig, GraduationPlan};
use crate::curve::BondingCurve;
use crate::domain::{AccountId, Amount, Ppm, TokenId};
use crate::error::CurveError;

/// Shared handle to a registered curve.
///
/// The `Mutex` is the serialization point required by the curve's
/// all-or-nothing execution model: one in-flight buy or sell per curve,
/// never a stale-read interleaving.
pub type CurveHandle = Arc<Mutex<BondingCurve>>;

/// Process-wide defaults applied by
/// [`CurveFactory::create_curve_with_defaults`].
///
/// Mirrors the launch parameters a deployment fixes once: reserve ratio,
/// swap fee, and the graduation template shared by every token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryDefaults {
    reserve_ratio: Ppm,
    swap_fee: Ppm,
    graduation: GraduationPlan,
}

impl FactoryDefaults {
    /// Creates validated factory defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] for an out-of-range
    /// ratio or fee.
    pub fn new(
        reserve_ratio: Ppm,
        swap_fee: Ppm,
        graduation: GraduationPlan,
    ) -> crate::error::Result<Self> {
        if !reserve_ratio.is_valid_ratio() {
            return Err(CurveError::InvalidConfiguration(
                "reserve ratio must be in (0, 1000000] ppm",
            ));
        }
        if !swap_fee.is_valid_fee() {
            return Err(CurveError::InvalidConfiguration(
                "swap fee must be at most 1000000 ppm",
            ));
        }
        Ok(Self {
            reserve_ratio,
            swap_fee,
            graduation,
        })
    }

    /// Default reserve ratio for new curves.
    #[must_use]
    pub const fn reserve_ratio(&self) -> Ppm {
        self.reserve_ratio
    }

    /// Default swap fee for new curves.
    #[must_use]
    pub const fn swap_fee(&self) -> Ppm {
        self.swap_fee
    }

    /// Default graduation plan for new curves.
    #[must_use]
    pub const fn graduation(&self) -> &GraduationPlan {
        &self.graduation
    }
}

/// Owner of the token-to-curve registry and the global fee parameters.
///
/// One curve per token, created exactly once. The registry sits behind an
/// `RwLock` so lookups are cheap and concurrent; each curve sits behind its
/// own `Mutex` (see [`CurveHandle`]) so trades on different tokens never
/// contend.
///
/// The factory's fee recipient is a *template* value: it is snapshotted
/// into each [`CurveConfig`] at creation time, so rotating it via
/// [`set_fee_recipient`](Self::set_fee_recipient) affects only curves
/// created afterwards.
///
/// # Example
///
/// ```rust
/// use ember_curve::config::GraduationPlan;
/// use ember_curve::domain::{AccountId, Amount, Ppm, TokenId};
/// use ember_curve::factory::{CurveFactory, FactoryDefaults};
///
/// const WAD: u128 = 1_000_000_000_000_000_000;
///
/// let plan = GraduationPlan::new(
///     Amount::new(42 * WAD / 10),
///     Amount::new(4 * WAD),
///     Amount::new(WAD / 10),
///     Amount::new(WAD / 10),
/// )
/// .expect("valid plan");
/// let defaults =
///     FactoryDefaults::new(Ppm::HALF, Ppm::new(10_000), plan).expect("valid defaults");
/// let factory = CurveFactory::new(
///     defaults,
///     AccountId::from_bytes([7u8; 32]),
///     AccountId::from_bytes([8u8; 32]),
/// );
///
/// let handle = factory
///     .create_curve_with_defaults(
///         TokenId::from_bytes([1u8; 32]),
///         Amount::new(1_000_000 * WAD),
///         Amount::new(1_000 * WAD),
///         Amount::new(WAD),
///     )
///     .expect("curve created");
/// let curve = handle.lock().expect("not poisoned");
/// assert_eq!(curve.config().swap_fee(), Ppm::new(10_000));
/// ```
#[derive(Debug)]
pub struct CurveFactory {
    defaults: FactoryDefaults,
    fee_recipient: RwLock<AccountId>,
    fee_recipient_setter: AccountId,
    curves: RwLock<HashMap<TokenId, CurveHandle>>,
}

impl CurveFactory {
    /// Creates a factory with the given defaults and fee authorities.
    #[must_use]
    pub fn new(
        defaults: FactoryDefaults,
        fee_recipient: AccountId,
        fee_recipient_setter: AccountId,
    ) -> Self {
        Self {
            defaults,
            fee_recipient: RwLock::new(fee_recipient),
            fee_recipient_setter,
            curves: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide defaults.
    #[must_use]
    pub const fn defaults(&self) -> &FactoryDefaults {
        &self.defaults
    }

    /// The fee recipient that will be snapshotted into the next curve.
    #[must_use]
    pub fn fee_recipient(&self) -> AccountId {
        *self
            .fee_recipient
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// The only account allowed to rotate the fee recipient.
    #[must_use]
    pub const fn fee_recipient_setter(&self) -> AccountId {
        self.fee_recipient_setter
    }

    /// Registers a new curve for `token_id` with an explicit config.
    ///
    /// # Errors
    ///
    /// - [`CurveError::InvalidConfiguration`] if the config fails
    ///   validation.
    /// - [`CurveError::DuplicateCurve`] if the token already has a curve.
    pub fn create_curve(
        &self,
        token_id: TokenId,
        config: CurveConfig,
    ) -> crate::error::Result<CurveHandle> {
        config.validate()?;
        let mut curves = self
            .curves
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match curves.entry(token_id) {
            Entry::Occupied(_) => Err(CurveError::DuplicateCurve),
            Entry::Vacant(slot) => {
                let handle = Arc::new(Mutex::new(BondingCurve::new(token_id, config)));
                slot.insert(Arc::clone(&handle));
                Ok(handle)
            }
        }
    }

    /// Registers a new curve built from the factory defaults and the
    /// current fee recipient; only the per-token values are supplied.
    ///
    /// # Errors
    ///
    /// Same as [`create_curve`](Self::create_curve).
    pub fn create_curve_with_defaults(
        &self,
        token_id: TokenId,
        supply_cap: Amount,
        virtual_token_reserve: Amount,
        virtual_connector_reserve: Amount,
    ) -> crate::error::Result<CurveHandle> {
        let config = CurveConfig::new(
            supply_cap,
            self.defaults.reserve_ratio(),
            virtual_token_reserve,
            virtual_connector_reserve,
            *self.defaults.graduation(),
            self.defaults.swap_fee(),
            self.fee_recipient(),
            self.fee_recipient_setter,
        )?;
        self.create_curve(token_id, config)
    }

    /// Looks up the curve registered for `token_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::CurveNotFound`] if no curve exists.
    pub fn curve_of(&self, token_id: &TokenId) -> crate::error::Result<CurveHandle> {
        self.curves
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token_id)
            .map(Arc::clone)
            .ok_or(CurveError::CurveNotFound)
    }

    /// Rotates the fee recipient used for curves created from now on.
    ///
    /// Not retroactive: existing curves keep the recipient snapshotted in
    /// their config.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Unauthorized`] unless `caller` is the
    /// configured setter.
    pub fn set_fee_recipient(
        &self,
        caller: AccountId,
        new_recipient: AccountId,
    ) -> crate::error::Result<()> {
        if caller != self.fee_recipient_setter {
            return Err(CurveError::Unauthorized);
        }
        *self
            .fee_recipient
            .write()
            .unwrap_or_else(PoisonError::into_inner) = new_recipient;
        Ok(())
    }
}
