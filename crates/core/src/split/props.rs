//! Property-based tests for the settlement engine.
//!
//! - Transfers clear every creditor and debtor balance
//! - Settlement is deterministic
//! - Plans stay within `creditors + debtors - 1` transfers
//! - Amounts anywhere in the `Decimal` range never panic

use std::collections::HashMap;

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::engine::{SETTLED_EPSILON, SettlementEngine};
use super::error::SettlementError;
use super::types::{Bill, Person};

/// Strategy to generate a group of 2 to 8 people with IDs 1..=n.
fn group() -> impl Strategy<Value = Vec<Person>> {
    (2i64..=8).prop_map(|n| (1..=n).map(|id| Person::new(id, format!("P{id}"))).collect())
}

/// Strategy to generate bills over a group of `size` people.
fn bills_for(size: i64) -> impl Strategy<Value = Vec<Bill>> {
    let bill = (
        1i64..10_000_000,
        1..=size,
        prop::collection::vec(1..=size, 0..=8),
    )
        .prop_map(|(cents, payer, participants)| {
            Bill::new(0, Decimal::new(cents, 2), payer, participants)
        });
    prop::collection::vec(bill, 0..20)
}

/// Strategy to generate any non-negative `Decimal`, up to `Decimal::MAX`.
fn any_amount() -> impl Strategy<Value = Decimal> {
    (any::<u32>(), any::<u32>(), any::<u32>(), 0u32..=28)
        .prop_map(|(lo, mid, hi, scale)| Decimal::from_parts(lo, mid, hi, false, scale))
}

/// Bills with unrestricted amounts over a group of `size` people.
fn wide_bills_for(size: i64) -> impl Strategy<Value = Vec<Bill>> {
    let bill = (
        any_amount(),
        1..=size,
        prop::collection::vec(1..=size, 0..=4),
    )
        .prop_map(|(amount, payer, participants)| Bill::new(0, amount, payer, participants));
    prop::collection::vec(bill, 0..6)
}

fn scenario() -> impl Strategy<Value = (Vec<Person>, Vec<Bill>)> {
    group().prop_flat_map(|people| {
        let size = i64::try_from(people.len()).unwrap();
        (Just(people), bills_for(size))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Balances sum to zero before any epsilon handling.
    #[test]
    fn prop_balances_sum_to_zero((people, bills) in scenario()) {
        let total: Decimal = SettlementEngine::balances(&people, &bills).unwrap().values().copied().sum();
        prop_assert!(total.abs() < dec!(0.000001), "total = {}", total);
    }

    /// Each creditor receives, and each debtor pays, their balance.
    ///
    /// Leftovers come from balances within a cent of zero, so the
    /// tolerance grows with group size.
    #[test]
    fn prop_transfers_clear_balances((people, bills) in scenario()) {
        let balances = SettlementEngine::balances(&people, &bills).unwrap();
        let settlements = SettlementEngine::settle(&people, &bills).unwrap();
        let tolerance = SETTLED_EPSILON * Decimal::from(people.len());

        let mut flow: HashMap<&str, Decimal> = HashMap::new();
        for s in &settlements {
            *flow.entry(s.to.as_str()).or_default() += s.amount;
            *flow.entry(s.from.as_str()).or_default() -= s.amount;
        }

        for person in &people {
            let balance = balances[&person.id];
            if balance.abs() <= SETTLED_EPSILON {
                continue;
            }
            let moved = flow.get(person.name.as_str()).copied().unwrap_or_default();
            prop_assert!(
                (moved - balance).abs() <= tolerance,
                "{} has balance {} but transfers total {}",
                person.name, balance, moved
            );
        }
    }

    /// Every transfer is positive and the plan is bounded.
    #[test]
    fn prop_plan_is_bounded((people, bills) in scenario()) {
        let balances = SettlementEngine::balances(&people, &bills).unwrap();
        let parties = balances.values().filter(|b| b.abs() > SETTLED_EPSILON).count();
        let settlements = SettlementEngine::settle(&people, &bills).unwrap();

        prop_assert!(settlements.len() <= parties.saturating_sub(1));
        for s in &settlements {
            prop_assert!(s.amount > Decimal::ZERO);
            prop_assert_ne!(&s.from, &s.to);
        }
    }

    /// Running settle twice yields the same plan.
    #[test]
    fn prop_settle_is_deterministic((people, bills) in scenario()) {
        let first = SettlementEngine::settle(&people, &bills).unwrap();
        let second = SettlementEngine::settle(&people, &bills).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Extreme amounts yield either a valid plan or an overflow error.
    #[test]
    fn prop_extreme_amounts_do_not_panic(
        (people, bills) in (2i64..=4).prop_flat_map(|n| {
            let people: Vec<Person> = (1..=n).map(|id| Person::new(id, format!("P{id}"))).collect();
            (Just(people), wide_bills_for(n))
        })
    ) {
        match SettlementEngine::settle(&people, &bills) {
            Ok(settlements) => {
                for s in &settlements {
                    prop_assert!(s.amount > Decimal::ZERO);
                    prop_assert_ne!(&s.from, &s.to);
                }
            }
            Err(SettlementError::Overflow { person, .. }) => {
                prop_assert!((1..=4).contains(&person));
            }
        }
    }
}
