//! Core ledger implementation.

use parking_lot::Mutex;
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use cashflow_common::{
    round_cents, total, BalanceMap, CashflowError, PartyName, Result, Settlement, Transaction,
};

use crate::balance::{self, PartyPosition};
use crate::journal::Journal;
use crate::plan::SettlementPlan;
use crate::solver;

/// Journal plus the balances derived from it, always updated together.
#[derive(Debug, Default)]
struct LedgerState {
    journal: Journal,
    balances: BalanceMap,
}

/// The ledger records IOUs and keeps a net balance per party.
///
/// All state sits behind one mutex held for the duration of each call, so
/// concurrent writers cannot lose balance updates and readers always see a
/// journal consistent with the balances.
#[derive(Debug, Default)]
pub struct Ledger {
    state: Mutex<LedgerState>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `debtor` owes `creditor` the given amount.
    ///
    /// Names are trimmed and the amount is rounded to cents. Blank names and
    /// self-loops are not rejected here; callers facing user input must
    /// check them first.
    #[instrument(skip(self, debtor, creditor))]
    pub fn add_transaction(
        &self,
        debtor: impl Into<PartyName>,
        creditor: impl Into<PartyName>,
        amount: Decimal,
    ) -> Result<Transaction> {
        self.state.lock().record(debtor.into(), creditor.into(), amount)
    }

    /// Record a transaction and capture the journal and balances right after
    /// it, under the same lock.
    #[instrument(skip(self, debtor, creditor))]
    pub fn add_and_snapshot(
        &self,
        debtor: impl Into<PartyName>,
        creditor: impl Into<PartyName>,
        amount: Decimal,
    ) -> Result<(Transaction, Vec<Transaction>, BalanceMap)> {
        let mut state = self.state.lock();
        let transaction = state.record(debtor.into(), creditor.into(), amount)?;

        Ok((
            transaction,
            state.journal.entries().to_vec(),
            state.balances.clone(),
        ))
    }

    /// All transactions in recording order.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.lock().journal.entries().to_vec()
    }

    /// Snapshot of net balances. Later ledger changes do not affect it.
    pub fn balances(&self) -> BalanceMap {
        self.state.lock().balances.clone()
    }

    /// Transactions and balances captured together.
    pub fn snapshot(&self) -> (Vec<Transaction>, BalanceMap) {
        let state = self.state.lock();
        (state.journal.entries().to_vec(), state.balances.clone())
    }

    /// Number of recorded transactions.
    pub fn transaction_count(&self) -> usize {
        self.state.lock().journal.len()
    }

    /// True when no transaction has been recorded since the last clear.
    pub fn is_empty(&self) -> bool {
        self.state.lock().journal.is_empty()
    }

    /// Every party classified as debtor, creditor or settled.
    pub fn positions(&self) -> Vec<PartyPosition> {
        balance::positions(&self.balances())
    }

    /// Minimized settlements for the current balances.
    pub fn minimize(&self) -> Vec<Settlement> {
        solver::minimize(&self.balances())
    }

    /// Minimized settlements plus the raw transaction count, taken from the
    /// same ledger state.
    #[instrument(skip(self))]
    pub fn settlement_plan(&self) -> SettlementPlan {
        let (balances, original_count) = {
            let state = self.state.lock();
            (state.balances.clone(), state.journal.len())
        };

        let plan = SettlementPlan::new(solver::minimize(&balances), original_count);

        info!(
            original_count = plan.original_count,
            count = plan.count(),
            "Settlement plan computed"
        );

        plan
    }

    /// Remove every transaction and balance.
    #[instrument(skip(self))]
    pub fn clear(&self) {
        let mut state = self.state.lock();
        let removed = state.journal.len();
        state.journal.clear();
        state.balances.clear();

        info!(removed, "Ledger cleared");
    }

    /// Check that the balances match a replay of the journal and sum to zero.
    pub fn verify_integrity(&self) -> bool {
        let state = self.state.lock();
        let replayed = state.journal.replay();

        replayed == state.balances && total(&state.balances) == Some(Decimal::ZERO)
    }
}

impl LedgerState {
    fn record(
        &mut self,
        debtor: PartyName,
        creditor: PartyName,
        amount: Decimal,
    ) -> Result<Transaction> {
        let amount = round_cents(amount);
        if amount <= Decimal::ZERO {
            warn!(amount = %amount, "Rejecting non-positive amount");
            return Err(CashflowError::NonPositiveAmount);
        }

        let transaction = Transaction::new(debtor, creditor, amount);

        // Both sides must move by exactly `amount` before either is touched.
        let debtor_ok =
            shifted(balance_of(&self.balances, &transaction.debtor), -amount).is_some();
        let creditor_ok =
            shifted(balance_of(&self.balances, &transaction.creditor), amount).is_some();
        if !(debtor_ok && creditor_ok) {
            warn!(amount = %amount, "Rejecting amount that a balance cannot hold exactly");
            return Err(CashflowError::BalanceOverflow);
        }

        *self
            .balances
            .entry(transaction.debtor.clone())
            .or_insert(Decimal::ZERO) -= amount;
        *self
            .balances
            .entry(transaction.creditor.clone())
            .or_insert(Decimal::ZERO) += amount;
        self.journal.append(transaction.clone());

        info!(
            transaction_id = %transaction.id,
            debtor = %transaction.debtor,
            creditor = %transaction.creditor,
            amount = %amount,
            "Transaction recorded"
        );

        Ok(transaction)
    }
}

/// `balance + delta`, or `None` when the sum overflows or loses digits.
fn shifted(balance: Decimal, delta: Decimal) -> Option<Decimal> {
    balance
        .checked_add(delta)
        .filter(|new| new.checked_sub(balance) == Some(delta))
}

fn balance_of(balances: &BalanceMap, party: &PartyName) -> Decimal {
    balances.get(party).copied().unwrap_or(Decimal::ZERO)
}
