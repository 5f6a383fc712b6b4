//! HTTP handlers for the ledger API.
//!
//! Handlers validate user input, call into the shared [`Ledger`] and shape
//! JSON responses. No netting logic lives here.
//!
//! [`Ledger`]: cashflow_ledger::Ledger

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use cashflow_common::{
    amount_from_f64, parse_amount, round_cents, BalanceMap, CashflowError, PartyName, Settlement, Transaction,
};

use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

/// Body of `POST /api/transaction`.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionRequest {
    #[serde(default)]
    pub debtor: Option<String>,
    #[serde(default)]
    pub creditor: Option<String>,
    /// Number or numeric string.
    #[serde(default)]
    pub amount: Option<Value>,
}

/// A transaction request that passed boundary validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidTransaction {
    pub debtor: PartyName,
    pub creditor: PartyName,
    pub amount: Decimal,
}

impl TransactionRequest {
    /// Check names, then self-loops, then the amount, which is rounded to
    /// cents and must stay positive.
    pub fn validate(&self) -> Result<ValidTransaction, CashflowError> {
        let debtor = PartyName::new(self.debtor.as_deref().unwrap_or_default());
        let creditor = PartyName::new(self.creditor.as_deref().unwrap_or_default());

        if debtor.is_empty() || creditor.is_empty() {
            return Err(CashflowError::EmptyName);
        }

        if debtor.same_party(&creditor) {
            return Err(CashflowError::SelfTransaction);
        }

        let amount = self
            .amount
            .as_ref()
            .and_then(amount_from_json)
            .map(round_cents)
            .filter(|amount| *amount > Decimal::ZERO)
            .ok_or(CashflowError::InvalidAmount)?;

        Ok(ValidTransaction {
            debtor,
            creditor,
            amount,
        })
    }
}

fn amount_from_json(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(Decimal::from)
            .or_else(|| n.as_u64().map(Decimal::from))
            .or_else(|| n.as_f64().and_then(amount_from_f64)),
        Value::String(s) => parse_amount(s),
        _ => None,
    }
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct AddTransactionResponse {
    pub success: bool,
    pub message: String,
    pub transactions: Vec<Transaction>,
    pub balances: BalanceMap,
}

#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
    pub balances: BalanceMap,
}

#[derive(Debug, Serialize)]
pub struct MinimizeResponse {
    pub minimized: Vec<Settlement>,
    pub count: usize,
    pub original_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

// ============================================================================
// Handlers
// ============================================================================

/// `POST /api/transaction`
pub async fn add_transaction(
    State(state): State<AppState>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<Json<AddTransactionResponse>, ApiError> {
    let result = record_transaction(&state, payload);

    match &result {
        Ok(_) => state.metrics.transaction_recorded(),
        Err(e) => {
            warn!(code = e.code(), error = %e, "Transaction rejected");
            state.metrics.transaction_rejected();
        }
    }

    result
}

fn record_transaction(
    state: &AppState,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<Json<AddTransactionResponse>, ApiError> {
    let Json(request) = payload?;
    let valid = request.validate()?;

    let (_, transactions, balances) = state
        .ledger
        .add_and_snapshot(valid.debtor, valid.creditor, valid.amount)?;

    Ok(Json(AddTransactionResponse {
        success: true,
        message: "Transaction added successfully".to_string(),
        transactions,
        balances,
    }))
}

/// `GET /api/transactions`
pub async fn list_transactions(State(state): State<AppState>) -> Json<TransactionsResponse> {
    let (transactions, balances) = state.ledger.snapshot();

    Json(TransactionsResponse {
        transactions,
        balances,
    })
}

/// `GET /api/minimize`
pub async fn minimize(State(state): State<AppState>) -> Json<MinimizeResponse> {
    let plan = state.ledger.settlement_plan();
    state.metrics.minimized(plan.count());

    Json(MinimizeResponse {
        count: plan.count(),
        original_count: plan.original_count,
        minimized: plan.settlements,
    })
}

/// `POST /api/clear`
pub async fn clear(State(state): State<AppState>) -> Json<ClearResponse> {
    state.ledger.clear();
    state.metrics.cleared();
    info!("All data cleared");

    Json(ClearResponse {
        success: true,
        message: "All data cleared".to_string(),
    })
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// `GET /metrics`
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.to_prometheus(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn request(body: Value) -> TransactionRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_valid_request() {
        let valid = request(json!({"debtor": " Alice ", "creditor": "Bob", "amount": 50}))
            .validate()
            .unwrap();

        assert_eq!(valid.debtor.as_str(), "Alice");
        assert_eq!(valid.creditor.as_str(), "Bob");
        assert_eq!(valid.amount, dec!(50));
    }

    #[test]
    fn test_amount_as_string() {
        let valid = request(json!({"debtor": "A", "creditor": "B", "amount": "12.75"}))
            .validate()
            .unwrap();

        assert_eq!(valid.amount, dec!(12.75));
    }

    #[test]
    fn test_fractional_amount() {
        let valid = request(json!({"debtor": "A", "creditor": "B", "amount": 0.1}))
            .validate()
            .unwrap();

        assert_eq!(valid.amount, dec!(0.1));
    }

    #[test]
    fn test_amount_rounded_to_cents() {
        let valid = request(json!({"debtor": "A", "creditor": "B", "amount": "0.335"}))
            .validate()
            .unwrap();
        assert_eq!(valid.amount, dec!(0.34));

        let tiny = request(json!({"debtor": "A", "creditor": "B", "amount": 0.004})).validate();
        assert_eq!(tiny, Err(CashflowError::InvalidAmount));
    }

    #[test]
    fn test_empty_names() {
        for body in [
            json!({"debtor": "", "creditor": "B", "amount": 1}),
            json!({"debtor": "A", "creditor": "   ", "amount": 1}),
            json!({"creditor": "B", "amount": 1}),
            json!({"debtor": null, "creditor": "B", "amount": 1}),
        ] {
            assert_eq!(request(body).validate(), Err(CashflowError::EmptyName));
        }
    }

    #[test]
    fn test_same_party_ignores_case() {
        let result = request(json!({"debtor": "alice", "creditor": "ALICE ", "amount": 1}))
            .validate();

        assert_eq!(result, Err(CashflowError::SelfTransaction));
    }

    #[test]
    fn test_invalid_amounts() {
        for amount in [
            json!(0),
            json!(-5),
            json!("-1.5"),
            json!("abc"),
            json!("NaN"),
            json!("inf"),
            json!(true),
            json!(null),
            json!([1]),
        ] {
            let result = request(json!({"debtor": "A", "creditor": "B", "amount": amount}))
                .validate();
            assert_eq!(result, Err(CashflowError::InvalidAmount));
        }

        let missing = request(json!({"debtor": "A", "creditor": "B"})).validate();
        assert_eq!(missing, Err(CashflowError::InvalidAmount));
    }

    #[test]
    fn test_name_checked_before_amount() {
        let result = request(json!({"debtor": "", "creditor": "", "amount": -1})).validate();
        assert_eq!(result, Err(CashflowError::EmptyName));
    }
}
