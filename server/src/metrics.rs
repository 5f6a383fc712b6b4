//! Metrics collection for the HTTP API.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Server metrics.
pub struct Metrics {
    /// Transactions accepted into the ledger.
    pub transactions_recorded: AtomicU64,
    /// Transaction requests rejected by validation.
    pub transactions_rejected: AtomicU64,
    /// Minimization requests served.
    pub minimize_requests: AtomicU64,
    /// Settlements returned across all minimization requests.
    pub settlements_emitted: AtomicU64,
    /// Ledger clears.
    pub clears: AtomicU64,
}

impl Metrics {
    /// Create new metrics instance.
    pub fn new() -> Self {
        Self {
            transactions_recorded: AtomicU64::new(0),
            transactions_rejected: AtomicU64::new(0),
            minimize_requests: AtomicU64::new(0),
            settlements_emitted: AtomicU64::new(0),
            clears: AtomicU64::new(0),
        }
    }

    /// Record an accepted transaction.
    pub fn transaction_recorded(&self) {
        self.transactions_recorded.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a rejected transaction request.
    pub fn transaction_rejected(&self) {
        self.transactions_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a minimization request and how many settlements it produced.
    pub fn minimized(&self, settlements: usize) {
        self.minimize_requests.fetch_add(1, Ordering::Relaxed);
        self.settlements_emitted
            .fetch_add(settlements as u64, Ordering::Relaxed);
    }

    /// Record a ledger clear.
    pub fn cleared(&self) {
        self.clears.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            transactions_recorded: self.transactions_recorded.load(Ordering::Relaxed),
            transactions_rejected: self.transactions_rejected.load(Ordering::Relaxed),
            minimize_requests: self.minimize_requests.load(Ordering::Relaxed),
            settlements_emitted: self.settlements_emitted.load(Ordering::Relaxed),
            clears: self.clears.load(Ordering::Relaxed),
        }
    }

    /// Export metrics in Prometheus format.
    pub fn to_prometheus(&self) -> String {
        let snapshot = self.snapshot();
        format!(
            r#"# HELP cashflow_transactions_recorded Total transactions recorded
# TYPE cashflow_transactions_recorded counter
cashflow_transactions_recorded {}

# HELP cashflow_transactions_rejected Total transaction requests rejected
# TYPE cashflow_transactions_rejected counter
cashflow_transactions_rejected {}

# HELP cashflow_minimize_requests Total minimization requests
# TYPE cashflow_minimize_requests counter
cashflow_minimize_requests {}

# HELP cashflow_settlements_emitted Total settlements returned
# TYPE cashflow_settlements_emitted counter
cashflow_settlements_emitted {}

# HELP cashflow_clears Total ledger clears
# TYPE cashflow_clears counter
cashflow_clears {}
"#,
            snapshot.transactions_recorded,
            snapshot.transactions_rejected,
            snapshot.minimize_requests,
            snapshot.settlements_emitted,
            snapshot.clears,
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time.
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub transactions_recorded: u64,
    pub transactions_rejected: u64,
    pub minimize_requests: u64,
    pub settlements_emitted: u64,
    pub clears: u64,
}

/// Shared metrics instance.
pub type SharedMetrics = Arc<Metrics>;
