//! Monetary helpers shared by the ledger and the settlement solver.

use crate::PartyName;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Net balance per party. Negative means the party owes, positive means it is owed.
pub type BalanceMap = BTreeMap<PartyName, Decimal>;

/// Tolerance below which a balance counts as settled (0.01).
pub const EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Decimal places used when reporting settlement amounts.
pub const SETTLEMENT_DECIMAL_PLACES: u32 = 2;

/// Round an amount to cents, half to even.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp(SETTLEMENT_DECIMAL_PLACES)
}

/// Check whether a balance is within tolerance of zero.
pub fn is_settled(balance: Decimal) -> bool {
    balance.abs() <= EPSILON
}

/// Parse a user-supplied amount from text.
///
/// Accepts plain and scientific notation. Returns `None` for anything that
/// is not a finite decimal.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Convert a binary float into a decimal amount. NaN and infinities yield `None`.
pub fn amount_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value)
}

/// Sum of all balances. Zero for a consistent ledger.
///
/// Debts and credits are added alternately so the running sum stays in range
/// whenever the true total does. `None` means the total itself overflows.
pub fn total(balances: &BalanceMap) -> Option<Decimal> {
    let (mut credits, mut debts): (Vec<Decimal>, Vec<Decimal>) = balances
        .values()
        .copied()
        .partition(|balance| balance.is_sign_positive());

    let mut sum = Decimal::ZERO;
    loop {
        let next = if sum.is_sign_negative() {
            credits.pop().or_else(|| debts.pop())
        } else {
            debts.pop().or_else(|| credits.pop())
        };

        match next {
            Some(balance) => sum = sum.checked_add(balance)?,
            None => return Some(sum),
        }
    }
}
