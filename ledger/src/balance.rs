//! Per-party balance views.

use cashflow_common::{BalanceMap, PartyName, PartyRole};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A party's net position at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyPosition {
    /// Party name.
    pub party: PartyName,
    /// Net balance (negative owes, positive is owed).
    pub balance: Decimal,
    /// Classification by the ε rule.
    pub role: PartyRole,
}

impl PartyPosition {
    /// Build a position from a net balance.
    pub fn new(party: PartyName, balance: Decimal) -> Self {
        Self {
            role: PartyRole::of(balance),
            party,
            balance,
        }
    }

    /// Amount the party owes, zero unless it is a debtor.
    pub fn owes(&self) -> Decimal {
        match self.role {
            PartyRole::Debtor => -self.balance,
            _ => Decimal::ZERO,
        }
    }

    /// Amount the party is owed, zero unless it is a creditor.
    pub fn is_owed(&self) -> Decimal {
        match self.role {
            PartyRole::Creditor => self.balance,
            _ => Decimal::ZERO,
        }
    }
}

/// Classify every party in a balance map, in name order.
pub fn positions(balances: &BalanceMap) -> Vec<PartyPosition> {
    balances
        .iter()
        .map(|(party, balance)| PartyPosition::new(party.clone(), *balance))
        .collect()
}

/// Count debtors and creditors (settled parties excluded).
pub fn count_roles(balances: &BalanceMap) -> (usize, usize) {
    balances
        .values()
        .fold((0, 0), |(debtors, creditors), balance| match PartyRole::of(*balance) {
            PartyRole::Debtor => (debtors + 1, creditors),
            PartyRole::Creditor => (debtors, creditors + 1),
            PartyRole::Settled => (debtors, creditors),
        })
}
