//! Greedy settlement minimization.
//!
//! Parties are split into debtors and creditors and kept in two max-heaps
//! ordered by outstanding magnitude. Each round pairs the largest debtor
//! with the largest creditor and settles the smaller of the two amounts, so
//! at least one of them leaves the heaps. That gives termination and the
//! bound `settlements <= debtors + creditors - 1`.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use cashflow_common::{round_cents, BalanceMap, PartyName, Settlement, EPSILON};
use rust_decimal::Decimal;
use tracing::{debug, info};

/// A party waiting in one of the heaps.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Position {
    /// Magnitude still to pay or receive, always > ε.
    outstanding: Decimal,
    party: PartyName,
}

impl Ord for Position {
    // Larger magnitude first. Equal magnitudes pop in ascending name order.
    fn cmp(&self, other: &Self) -> Ordering {
        self.outstanding
            .cmp(&other.outstanding)
            .then_with(|| other.party.cmp(&self.party))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compute the transfers that bring every balance to within ε of zero.
///
/// The input is never modified. Each settled amount is rounded to cents
/// before it is taken off both sides, so the remainders match what is paid.
pub fn minimize(balances: &BalanceMap) -> Vec<Settlement> {
    let mut debtors = BinaryHeap::new();
    let mut creditors = BinaryHeap::new();

    for (party, &balance) in balances {
        if balance < -EPSILON {
            debtors.push(Position {
                outstanding: -balance,
                party: party.clone(),
            });
        } else if balance > EPSILON {
            creditors.push(Position {
                outstanding: balance,
                party: party.clone(),
            });
        }
    }

    let bound = (debtors.len() + creditors.len()).saturating_sub(1);
    let mut settlements = Vec::with_capacity(bound);

    // A one-sided leftover can only be drift below ε; it is dropped.
    while let (Some(debtor), Some(creditor)) = (debtors.pop(), creditors.pop()) {
        let amount = round_cents(debtor.outstanding.min(creditor.outstanding));

        debug!(
            debtor = %debtor.party,
            creditor = %creditor.party,
            amount = %amount,
            "Pairing debtor with creditor"
        );

        let remaining_debt = debtor.outstanding - amount;
        let remaining_credit = creditor.outstanding - amount;

        settlements.push(Settlement::new(
            debtor.party.clone(),
            creditor.party.clone(),
            amount,
        ));

        if remaining_debt > EPSILON {
            debtors.push(Position {
                outstanding: remaining_debt,
                party: debtor.party,
            });
        }

        if remaining_credit > EPSILON {
            creditors.push(Position {
                outstanding: remaining_credit,
                party: creditor.party,
            });
        }
    }

    info!(
        settlements = settlements.len(),
        parties = balances.len(),
        "Settlements minimized"
    );

    settlements
}

/// Balances after every settlement has been paid.
///
/// Paying moves the debtor's balance up and the creditor's down by the
/// settled amount.
pub fn apply_settlements(balances: &BalanceMap, settlements: &[Settlement]) -> BalanceMap {
    let mut result = balances.clone();

    for settlement in settlements {
        *result
            .entry(settlement.debtor.clone())
            .or_insert(Decimal::ZERO) += settlement.amount;
        *result
            .entry(settlement.creditor.clone())
            .or_insert(Decimal::ZERO) -= settlement.amount;
    }

    result
}
