//! Route table for the HTTP API.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the application router with request tracing.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/transaction", post(handlers::add_transaction))
        .route("/api/transactions", get(handlers::list_transactions))
        .route("/api/minimize", get(handlers::minimize))
        .route("/api/clear", post(handlers::clear));

    let ops_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics));

    Router::new()
        .merge(api_routes)
        .merge(ops_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
