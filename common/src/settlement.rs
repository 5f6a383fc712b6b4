//! Proposed settlement transfers.

use crate::PartyName;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single proposed transfer from a debtor to a creditor.
///
/// Settlements are transient: they are recomputed from the current balances
/// on every request and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Party paying.
    pub debtor: PartyName,
    /// Party receiving.
    pub creditor: PartyName,
    /// Amount to transfer, rounded to cents.
    pub amount: Decimal,
}

impl Settlement {
    /// Create a new settlement.
    pub fn new(debtor: PartyName, creditor: PartyName, amount: Decimal) -> Self {
        Self {
            debtor,
            creditor,
            amount,
        }
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.debtor, self.creditor, self.amount)
    }
}

/// Which side of the ledger a party is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyRole {
    /// Owes money (balance below -ε).
    Debtor,
    /// Is owed money (balance above +ε).
    Creditor,
    /// Within ε of zero.
    Settled,
}

impl PartyRole {
    /// Classify a net balance.
    pub fn of(balance: Decimal) -> Self {
        if balance < -crate::EPSILON {
            PartyRole::Debtor
        } else if balance > crate::EPSILON {
            PartyRole::Creditor
        } else {
            PartyRole::Settled
        }
    }
}
