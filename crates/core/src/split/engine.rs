//! Settlement engine: net balances and greedy transfer matching.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::SettlementError;
use super::types::{Bill, Person, PersonId, Settlement};

/// Balances within this distance of zero are treated as settled.
pub const SETTLED_EPSILON: Decimal = dec!(0.01);

/// Engine for computing who pays whom.
pub struct SettlementEngine;

impl SettlementEngine {
    /// Computes net balances keyed by person ID.
    ///
    /// Positive means the person is owed money, negative means they owe.
    /// Every known person starts at zero; IDs referenced only by bills
    /// still accrue a balance. Bills without participants are skipped
    /// entirely, so the payer is not credited either.
    ///
    /// Fails if any running balance leaves the `Decimal` range.
    pub fn balances(
        people: &[Person],
        bills: &[Bill],
    ) -> Result<BTreeMap<PersonId, Decimal>, SettlementError> {
        let mut balances: BTreeMap<PersonId, Decimal> =
            people.iter().map(|p| (p.id, Decimal::ZERO)).collect();

        for bill in bills {
            if bill.participants.is_empty() {
                continue;
            }

            let amount = bill.settlement_amount();
            let share = amount / Decimal::from(bill.participants.len());

            apply(&mut balances, bill, bill.paid_by, amount)?;
            for &participant in &bill.participants {
                apply(&mut balances, bill, participant, -share)?;
            }
        }

        Ok(balances)
    }

    /// Computes the transfer plan for a set of people and bills.
    ///
    /// Creditors and debtors are matched greedily in ascending person-ID
    /// order, so identical inputs always yield identical output.
    pub fn settle(people: &[Person], bills: &[Bill]) -> Result<Vec<Settlement>, SettlementError> {
        let names: HashMap<PersonId, &str> =
            people.iter().map(|p| (p.id, p.name.as_str())).collect();
        let balances = Self::balances(people, bills)?;

        Ok(Self::match_transfers(&balances, &names))
    }

    /// Greedily matches creditors against debtors.
    ///
    /// Emits at most `creditors + debtors - 1` transfers. Unknown IDs are
    /// reported with an empty name.
    #[must_use]
    pub fn match_transfers(
        balances: &BTreeMap<PersonId, Decimal>,
        names: &HashMap<PersonId, &str>,
    ) -> Vec<Settlement> {
        let (mut creditors, mut debtors) = Self::partition(balances);
        let name_of = |id: PersonId| names.get(&id).copied().unwrap_or_default().to_string();

        let mut settlements = Vec::new();
        let (mut i, mut j) = (0, 0);

        while i < creditors.len() && j < debtors.len() {
            let (creditor_id, credit) = creditors[i];
            let (debtor_id, debt) = debtors[j];
            let amount = credit.min(debt);

            settlements.push(Settlement {
                from: name_of(debtor_id),
                to: name_of(creditor_id),
                amount,
            });

            creditors[i].1 -= amount;
            debtors[j].1 -= amount;

            if creditors[i].1 < SETTLED_EPSILON {
                i += 1;
            }
            if debtors[j].1 < SETTLED_EPSILON {
                j += 1;
            }
        }

        settlements
    }

    /// Splits balances into creditors and debtors, both as positive amounts
    /// ordered by person ID. Settled people are dropped.
    #[allow(clippy::type_complexity)]
    fn partition(
        balances: &BTreeMap<PersonId, Decimal>,
    ) -> (Vec<(PersonId, Decimal)>, Vec<(PersonId, Decimal)>) {
        let mut creditors = Vec::new();
        let mut debtors = Vec::new();

        for (&id, &balance) in balances {
            if balance > SETTLED_EPSILON {
                creditors.push((id, balance));
            } else if balance < -SETTLED_EPSILON {
                debtors.push((id, -balance));
            }
        }

        (creditors, debtors)
    }
}

fn apply(
    balances: &mut BTreeMap<PersonId, Decimal>,
    bill: &Bill,
    person: PersonId,
    delta: Decimal,
) -> Result<(), SettlementError> {
    let balance = balances.entry(person).or_default();
    *balance = balance
        .checked_add(delta)
        .ok_or(SettlementError::Overflow {
            bill: bill.id,
            person,
        })?;
    Ok(())
}
