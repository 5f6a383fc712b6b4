//! Append-only transaction journal.

use cashflow_common::{BalanceMap, Transaction};
use rust_decimal::Decimal;

/// Transactions in the order they were recorded.
///
/// Entries are never edited or removed individually; the journal can only
/// grow or be cleared as a whole.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Vec<Transaction>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction.
    pub fn append(&mut self, transaction: Transaction) {
        self.entries.push(transaction);
    }

    /// Entries in recording order.
    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been appended since the last clear.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Rebuild net balances from scratch.
    pub fn replay(&self) -> BalanceMap {
        replay(&self.entries)
    }
}

/// Net balances obtained by applying `transactions` in order to an empty map.
pub fn replay<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> BalanceMap {
    let mut balances = BalanceMap::new();

    for tx in transactions {
        *balances.entry(tx.debtor.clone()).or_insert(Decimal::ZERO) -= tx.amount;
        *balances.entry(tx.creditor.clone()).or_insert(Decimal::ZERO) += tx.amount;
    }

    balances
}
