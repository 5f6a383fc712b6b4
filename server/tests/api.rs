//! End-to-end tests of the HTTP API against an in-process router.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use cashflow_ledger::Ledger;
use cashflow_server::{build_router, AppState};

fn test_app() -> (Router, Arc<Ledger>) {
    let ledger = Arc::new(Ledger::new());
    let app = build_router(AppState::new(ledger.clone()));
    (app, ledger)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn add(app: &Router, debtor: &str, creditor: &str, amount: Value) -> (StatusCode, Value) {
    send(
        app,
        post_json(
            "/api/transaction",
            json!({"debtor": debtor, "creditor": creditor, "amount": amount}),
        ),
    )
    .await
}

#[tokio::test]
async fn test_add_transaction_returns_state() {
    let (app, _) = test_app();

    let (status, body) = add(&app, "Alice", "Bob", json!(50)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Transaction added successfully");
    assert_eq!(body["transactions"].as_array().unwrap().len(), 1);
    assert_eq!(body["transactions"][0]["debtor"], "Alice");
    assert_eq!(body["transactions"][0]["amount"], json!(50.0));
    assert_eq!(body["balances"], json!({"Alice": -50.0, "Bob": 50.0}));
}

#[tokio::test]
async fn test_validation_errors() {
    let (app, ledger) = test_app();

    let (status, body) = add(&app, "  ", "Bob", json!(5)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Names cannot be empty");

    let (status, body) = add(&app, "alice", "Alice", json!(5)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Debtor and creditor cannot be the same");

    let (status, body) = add(&app, "Alice", "Bob", json!(0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid amount");
    assert_eq!(body["field"], "amount");

    let (status, body) = add(&app, "Alice", "Bob", json!("ten")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid amount");

    assert!(ledger.is_empty());
}

#[tokio::test]
async fn test_amount_beyond_balance_precision() {
    let (app, ledger) = test_app();

    let (status, _) = add(&app, "A", "B", json!("10000000000000000000000000000")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = add(&app, "A", "C", json!(0.5)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Amount too large");
    assert_eq!(body["code"], "BALANCE_OVERFLOW");

    assert_eq!(ledger.transaction_count(), 1);
    assert!(ledger.verify_integrity());
}

#[tokio::test]
async fn test_add_response_reflects_cents() {
    let (app, _) = test_app();

    let (_, body) = add(&app, "D", "C", json!(0.335)).await;

    assert_eq!(body["transactions"][0]["amount"], json!(0.34));
    assert_eq!(body["balances"], json!({"C": 0.34, "D": -0.34}));
}

#[tokio::test]
async fn test_malformed_body() {
    let (app, ledger) = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/transaction")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "MALFORMED_BODY");
    assert!(body.get("field").is_none());
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn test_list_transactions() {
    let (app, _) = test_app();
    add(&app, "A", "B", json!(10)).await;
    add(&app, "B", "C", json!("10")).await;

    let (status, body) = send(&app, get("/api/transactions")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transactions"].as_array().unwrap().len(), 2);
    assert_eq!(body["balances"], json!({"A": -10.0, "B": 0.0, "C": 10.0}));
}

#[tokio::test]
async fn test_minimize_chain() {
    let (app, _) = test_app();
    add(&app, "A", "B", json!(10)).await;
    add(&app, "B", "C", json!(10)).await;

    let (status, body) = send(&app, get("/api/minimize")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "minimized": [{"debtor": "A", "creditor": "C", "amount": 10.0}],
            "count": 1,
            "original_count": 2
        })
    );
}

#[tokio::test]
async fn test_minimize_hub() {
    let (app, _) = test_app();
    add(&app, "A", "B", json!(100)).await;
    add(&app, "C", "B", json!(50)).await;

    let (_, body) = send(&app, get("/api/minimize")).await;

    assert_eq!(body["count"], 2);
    assert_eq!(body["minimized"][0], json!({"debtor": "A", "creditor": "B", "amount": 100.0}));
    assert_eq!(body["minimized"][1], json!({"debtor": "C", "creditor": "B", "amount": 50.0}));
}

#[tokio::test]
async fn test_minimize_empty_ledger() {
    let (app, _) = test_app();

    let (_, body) = send(&app, get("/api/minimize")).await;

    assert_eq!(body, json!({"minimized": [], "count": 0, "original_count": 0}));
}

#[tokio::test]
async fn test_clear() {
    let (app, ledger) = test_app();
    add(&app, "A", "B", json!(10)).await;

    let (status, body) = send(&app, post_json("/api/clear", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "All data cleared"}));

    let (_, body) = send(&app, get("/api/transactions")).await;
    assert_eq!(body, json!({"transactions": [], "balances": {}}));
    assert!(ledger.is_empty());
}

#[tokio::test]
async fn test_health_and_metrics() {
    let (app, _) = test_app();
    add(&app, "A", "B", json!(10)).await;
    add(&app, "A", "A", json!(10)).await;

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let response = app.clone().oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("cashflow_transactions_recorded 1"));
    assert!(text.contains("cashflow_transactions_rejected 1"));
}
