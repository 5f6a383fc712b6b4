//! Settlement plan summary.

use cashflow_common::Settlement;
use serde::{Deserialize, Serialize};

/// Minimized settlements together with the transaction count they replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPlan {
    /// Transfers that clear every balance.
    pub settlements: Vec<Settlement>,
    /// Number of raw transactions in the ledger when the plan was made.
    pub original_count: usize,
}

impl SettlementPlan {
    /// Create a new plan.
    pub fn new(settlements: Vec<Settlement>, original_count: usize) -> Self {
        Self {
            settlements,
            original_count,
        }
    }

    /// Number of settlements.
    pub fn count(&self) -> usize {
        self.settlements.len()
    }

    /// Transfers saved compared with paying every IOU individually.
    pub fn savings(&self) -> usize {
        self.original_count.saturating_sub(self.count())
    }

    /// Savings as a percentage of the original transaction count.
    pub fn savings_percent(&self) -> f64 {
        if self.original_count == 0 {
            return 0.0;
        }

        self.savings() as f64 * 100.0 / self.original_count as f64
    }

    /// True when nothing needs to be paid.
    pub fn is_settled(&self) -> bool {
        self.settlements.is_empty()
    }
}
