//! Property-based tests using `proptest` for curve invariant validation.
//!
//! Covers the load-bearing economic properties:
//!
//! 1. **Purchase monotonicity** — a larger deposit never mints fewer tokens.
//! 2. **Sale monotonicity** — selling more never returns less connector.
//! 3. **Round-trip loss** — buy then sell-everything returns ≤ the deposit.
//! 4. **Supply-cap safety** — no buy sequence pushes real supply past the cap.
//! 5. **Graduation exactly once** — the crossing buy graduates; everything
//!    after it fails with `CurveGraduated`.
//! 6. **Path independence** — many small buys ≈ one large buy, within a
//!    rounding tolerance that favours the curve.

use proptest::prelude::*;

use crate::config::{CurveConfig, GraduationPlan};
use crate::domain::{AccountId, Amount, Ppm, TokenId};
use crate::error::CurveError;
use crate::formula;
use crate::traits::{LiquidityBridge, PoolShareReceipt};

use super::{BondingCurve, CurveStatus};

const WAD: u128 = 1_000_000_000_000_000_000;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

struct AcceptingBridge;

impl LiquidityBridge for AcceptingBridge {
    fn provide_liquidity(
        &mut self,
        token: TokenId,
        connector_amount: Amount,
    ) -> crate::error::Result<PoolShareReceipt> {
        Ok(PoolShareReceipt::new(token, connector_amount, connector_amount))
    }
}

fn make_curve(supply_cap: u128, threshold: u128, fee_ppm: u32) -> BondingCurve {
    let Ok(plan) = GraduationPlan::new(
        Amount::new(threshold),
        Amount::new(threshold / 2),
        Amount::new(threshold / 10),
        Amount::new(threshold / 10),
    ) else {
        panic!("valid plan");
    };
    let Ok(cfg) = CurveConfig::new(
        Amount::new(supply_cap),
        Ppm::HALF,
        Amount::new(1_000 * WAD),
        Amount::new(WAD),
        plan,
        Ppm::new(fee_ppm),
        AccountId::from_bytes([7u8; 32]),
        AccountId::from_bytes([8u8; 32]),
    ) else {
        panic!("valid config");
    };
    BondingCurve::new(TokenId::from_bytes([1u8; 32]), cfg)
}

/// Deposits from one milli-unit to one thousand whole units.
fn deposit_strategy() -> impl Strategy<Value = u128> {
    (WAD / 1_000)..=(1_000 * WAD)
}

fn fee_strategy() -> impl Strategy<Value = u32> {
    0u32..=100_000
}

// ---------------------------------------------------------------------------
// Property 1 + 2: formula monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_purchase_return_monotonic_in_deposit(
        d in deposit_strategy(),
        extra in (1u128)..=(10 * WAD),
    ) {
        let supply = Amount::new(1_000 * WAD);
        let connector = Amount::new(WAD);
        let Ok(small) = formula::purchase_return(supply, connector, Amount::new(d), Ppm::HALF)
        else {
            panic!("purchase_return failed");
        };
        let Ok(large) =
            formula::purchase_return(supply, connector, Amount::new(d + extra), Ppm::HALF)
        else {
            panic!("purchase_return failed");
        };
        prop_assert!(large >= small, "more deposit minted fewer tokens");
    }

    #[test]
    fn prop_sale_return_monotonic_in_amount(
        a in (WAD / 1_000)..=(500 * WAD),
        extra in (1u128)..=(100 * WAD),
    ) {
        let supply = Amount::new(1_000 * WAD);
        let connector = Amount::new(10 * WAD);
        let Ok(small) = formula::sale_return(supply, connector, Amount::new(a), Ppm::HALF)
        else {
            panic!("sale_return failed");
        };
        let Ok(large) = formula::sale_return(supply, connector, Amount::new(a + extra), Ppm::HALF)
        else {
            panic!("sale_return failed");
        };
        prop_assert!(large >= small, "selling more returned less connector");
    }
}

// ---------------------------------------------------------------------------
// Property 3: round-trip loss
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_buy_sell_round_trip_never_profits(
        d in deposit_strategy(),
        fee in fee_strategy(),
    ) {
        let mut curve = make_curve(u128::MAX, u128::MAX, fee);
        let mut bridge = AcceptingBridge;
        let deposit = Amount::new(d);
        let bought = match curve.buy(deposit, &mut bridge) {
            Ok(r) => r,
            // tiny deposits may be consumed by the fee or price to zero
            Err(CurveError::InvalidAmount(_)) => return Ok(()),
            Err(e) => panic!("unexpected buy failure: {e}"),
        };
        let returned = match curve.sell(bought.tokens_out()) {
            Ok(r) => r.connector_out(),
            Err(CurveError::InvalidAmount(_)) => Amount::ZERO,
            Err(e) => panic!("unexpected sell failure: {e}"),
        };
        prop_assert!(returned <= deposit, "round trip created value: {deposit} -> {returned}");
    }
}

// ---------------------------------------------------------------------------
// Property 4: supply cap
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_supply_cap_never_exceeded(
        deposits in proptest::collection::vec(deposit_strategy(), 1..8),
    ) {
        let cap = 500 * WAD;
        let mut curve = make_curve(cap, u128::MAX, 0);
        let mut bridge = AcceptingBridge;
        for d in deposits {
            let before = curve.clone();
            match curve.buy(Amount::new(d), &mut bridge) {
                Ok(_) => {}
                Err(CurveError::SupplyCapExceeded) => {
                    prop_assert_eq!(&curve, &before, "failed buy mutated state");
                }
                Err(CurveError::InvalidAmount(_)) => {}
                Err(e) => panic!("unexpected buy failure: {e}"),
            }
            let (supply, _) = curve.reserves();
            prop_assert!(supply <= Amount::new(cap), "real supply passed the cap");
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: graduation exactly once
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_graduation_fires_exactly_once(
        deposits in proptest::collection::vec(deposit_strategy(), 1..12),
    ) {
        let mut curve = make_curve(u128::MAX, 100 * WAD, 0);
        let mut bridge = AcceptingBridge;
        let mut graduations = 0u32;
        for d in deposits {
            match curve.buy(Amount::new(d), &mut bridge) {
                Ok(receipt) => {
                    if receipt.graduated() {
                        graduations += 1;
                        prop_assert_eq!(curve.status(), CurveStatus::Graduated);
                    }
                }
                Err(CurveError::CurveGraduated) => {
                    prop_assert_eq!(curve.status(), CurveStatus::Graduated);
                    prop_assert!(graduations == 1, "rejected before graduating");
                }
                Err(CurveError::InvalidAmount(_)) => {}
                Err(e) => panic!("unexpected buy failure: {e}"),
            }
        }
        prop_assert!(graduations <= 1, "graduated {graduations} times");
    }
}

// ---------------------------------------------------------------------------
// Property 6: path independence
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_split_buys_approximate_single_buy(
        d in (WAD)..=(100 * WAD),
        parts in 2u128..=5,
    ) {
        let mut split = make_curve(u128::MAX, u128::MAX, 0);
        let mut single = make_curve(u128::MAX, u128::MAX, 0);
        let mut bridge = AcceptingBridge;

        let chunk = d / parts;
        let total = chunk * parts;
        let mut split_tokens = Amount::ZERO;
        for _ in 0..parts {
            let Ok(receipt) = split.buy(Amount::new(chunk), &mut bridge) else {
                panic!("split buy failed");
            };
            let Some(sum) = split_tokens.checked_add(&receipt.tokens_out()) else {
                panic!("token sum overflow");
            };
            split_tokens = sum;
        }
        let Ok(one) = single.buy(Amount::new(total), &mut bridge) else {
            panic!("single buy failed");
        };

        // rounding always favours the curve, so split buys mint at most as
        // much as the single buy, and the gap stays within a few billionths
        // of a token per chunk
        prop_assert!(split_tokens <= one.tokens_out());
        let gap = one.tokens_out().get() - split_tokens.get();
        prop_assert!(
            gap <= 10_000_000_000 * parts,
            "path dependence beyond tolerance: gap {gap}"
        );
    }
}
