//! Simulation report.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use cashflow_common::EPSILON;

/// Outcome of one simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// Scenario name, or "random".
    pub scenario: String,
    /// IOUs accepted by the ledger.
    pub transactions_recorded: usize,
    /// IOUs the ledger rejected.
    pub transactions_rejected: usize,
    /// Parties holding a balance outside the tolerance, as (debtors, creditors).
    pub debtors: usize,
    pub creditors: usize,
    /// Settlements produced by the minimizer.
    pub settlements: usize,
    /// Transfers avoided compared to paying every IOU.
    pub savings: usize,
    pub savings_percent: f64,
    /// Largest absolute balance left after applying the settlements.
    pub residual: Decimal,
    /// Whether replaying the journal reproduces the balances.
    pub integrity: bool,
    /// Wall time spent.
    #[serde(with = "duration_ms")]
    pub elapsed: Duration,
}

impl SimulationReport {
    /// At most one transfer fewer than the number of unsettled parties.
    pub fn bound_holds(&self) -> bool {
        let unsettled = self.debtors + self.creditors;
        self.settlements <= unsettled.saturating_sub(1)
    }

    /// Whether applying the settlements left every balance within tolerance.
    pub fn fully_settled(&self) -> bool {
        self.residual <= EPSILON
    }

    /// Log the report.
    pub fn log(&self) {
        info!(
            scenario = %self.scenario,
            recorded = self.transactions_recorded,
            rejected = self.transactions_rejected,
            debtors = self.debtors,
            creditors = self.creditors,
            settlements = self.settlements,
            savings = self.savings,
            savings_percent = self.savings_percent,
            elapsed_ms = self.elapsed.as_millis() as u64,
            "Simulation complete"
        );

        if !self.bound_holds() {
            warn!(
                settlements = self.settlements,
                unsettled = self.debtors + self.creditors,
                "Settlement count exceeds party bound"
            );
        }
        if !self.fully_settled() {
            warn!(residual = %self.residual, "Balances remain after settlement");
        }
        if !self.integrity {
            warn!("Journal replay does not match balances");
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn report(debtors: usize, creditors: usize, settlements: usize) -> SimulationReport {
        SimulationReport {
            scenario: "test".to_string(),
            transactions_recorded: 5,
            transactions_rejected: 0,
            debtors,
            creditors,
            settlements,
            savings: 5usize.saturating_sub(settlements),
            savings_percent: 0.0,
            residual: Decimal::ZERO,
            integrity: true,
            elapsed: Duration::from_millis(3),
        }
    }

    #[test]
    fn test_bound() {
        assert!(report(2, 1, 2).bound_holds());
        assert!(!report(2, 1, 3).bound_holds());
        assert!(report(0, 0, 0).bound_holds());
    }

    #[test]
    fn test_fully_settled() {
        let mut r = report(1, 1, 1);
        assert!(r.fully_settled());

        r.residual = dec!(0.01);
        assert!(r.fully_settled());

        r.residual = dec!(0.02);
        assert!(!r.fully_settled());
    }

    #[test]
    fn test_serializes_elapsed_as_millis() {
        let json = serde_json::to_value(report(1, 1, 1)).unwrap();
        assert_eq!(json["elapsed"], 3);
        assert_eq!(json["scenario"], "test");
    }
}
