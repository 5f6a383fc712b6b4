//! Shared application state handed to every request handler.

use std::sync::Arc;

use cashflow_ledger::Ledger;

use crate::metrics::{Metrics, SharedMetrics};

/// State injected into the router.
#[derive(Clone)]
pub struct AppState {
    /// The ledger served by this process.
    pub ledger: Arc<Ledger>,
    /// Request counters.
    pub metrics: SharedMetrics,
}

impl AppState {
    /// Create state around an existing ledger.
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self {
            ledger,
            metrics: Arc::new(Metrics::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(Ledger::new()))
    }
}
