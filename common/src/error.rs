//! Error types for ledger operations.

use thiserror::Error;

/// Main error type for cashflow operations.
///
/// Every variant is a validation failure. None of them is fatal and none is
/// worth retrying: operations are synchronous and in-memory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CashflowError {
    /// Amount was zero or negative.
    #[error("Amount must be positive")]
    NonPositiveAmount,

    /// Amount was missing, non-numeric or not finite.
    #[error("Invalid amount")]
    InvalidAmount,

    /// Debtor or creditor name was blank after trimming.
    #[error("Names cannot be empty")]
    EmptyName,

    /// Debtor and creditor name the same party.
    #[error("Debtor and creditor cannot be the same")]
    SelfTransaction,

    /// Applying the amount would overflow a party's balance.
    #[error("Amount too large")]
    BalanceOverflow,
}

impl CashflowError {
    /// Get error code for API responses and logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            CashflowError::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            CashflowError::InvalidAmount => "INVALID_AMOUNT",
            CashflowError::EmptyName => "EMPTY_NAME",
            CashflowError::SelfTransaction => "SELF_TRANSACTION",
            CashflowError::BalanceOverflow => "BALANCE_OVERFLOW",
        }
    }

    /// Name of the request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            CashflowError::NonPositiveAmount
            | CashflowError::InvalidAmount
            | CashflowError::BalanceOverflow => "amount",
            CashflowError::EmptyName => "debtor",
            CashflowError::SelfTransaction => "creditor",
        }
    }
}

/// Result type alias for cashflow operations.
pub type Result<T> = std::result::Result<T, CashflowError>;
