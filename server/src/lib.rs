//! Cashflow Server
//!
//! Thin HTTP boundary over the ledger: validates incoming IOUs, records
//! them, and serves the current balances and minimized settlements.

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
