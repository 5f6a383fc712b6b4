//! Recorded IOU transactions.

use crate::{PartyName, TransactionId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An immutable "debtor owes creditor amount" record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction ID.
    pub id: TransactionId,
    /// Party that owes.
    pub debtor: PartyName,
    /// Party that is owed.
    pub creditor: PartyName,
    /// Amount owed, always positive.
    pub amount: Decimal,
    /// When the transaction was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction record.
    pub fn new(debtor: PartyName, creditor: PartyName, amount: Decimal) -> Self {
        Self {
            id: TransactionId::new(),
            debtor,
            creditor,
            amount,
            recorded_at: Utc::now(),
        }
    }
}
