//! Simulation controller.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use cashflow_common::{parse_amount, PartyName};
use cashflow_ledger::{apply_settlements, count_roles, Ledger};

use crate::metrics::SimulationReport;
use crate::scenario::{ExpectCondition, Scenario, ScenarioStep};

/// Drives a ledger through scripted or random workloads.
pub struct SimulationController {
    /// Ledger under test.
    ledger: Ledger,
    /// Names used by random mode.
    parties: Vec<PartyName>,
    /// Random number generator.
    rng: StdRng,
    /// IOUs rejected since the last clear.
    rejected: usize,
}

impl SimulationController {
    /// Create a controller with `party_count` generated party names.
    pub fn new(party_count: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        let parties = (1..=party_count)
            .map(|i| PartyName::new(format!("P{:02}", i)))
            .collect();

        Self {
            ledger: Ledger::new(),
            parties,
            rng,
            rejected: 0,
        }
    }

    /// Ledger being driven.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Run a scenario.
    pub fn run_scenario(&mut self, scenario: &Scenario) -> anyhow::Result<SimulationReport> {
        info!("Running scenario: {} - {}", scenario.name, scenario.description);
        let start = Instant::now();

        for step in &scenario.steps {
            self.execute_step(step)?;
        }

        Ok(self.report(&scenario.name, start))
    }

    /// Record `count` random IOUs between distinct parties, each at most `max_amount`.
    pub fn run_random(
        &mut self,
        count: usize,
        max_amount: u32,
    ) -> anyhow::Result<SimulationReport> {
        if self.parties.len() < 2 {
            anyhow::bail!("Random mode needs at least two parties");
        }
        if max_amount == 0 {
            anyhow::bail!("Maximum amount must be positive");
        }

        info!(
            parties = self.parties.len(),
            transactions = count,
            max_amount,
            "Running random simulation"
        );
        let start = Instant::now();
        let max_cents = i64::from(max_amount) * 100;

        for _ in 0..count {
            let debtor = self.rng.gen_range(0..self.parties.len());
            let mut creditor = self.rng.gen_range(0..self.parties.len());
            while creditor == debtor {
                creditor = self.rng.gen_range(0..self.parties.len());
            }
            let amount = Decimal::new(self.rng.gen_range(1..=max_cents), 2);

            self.record(
                self.parties[debtor].clone(),
                self.parties[creditor].clone(),
                amount,
            );
        }

        Ok(self.report("random", start))
    }

    fn record(&mut self, debtor: PartyName, creditor: PartyName, amount: Decimal) {
        debug!(debtor = %debtor, creditor = %creditor, amount = %amount, "Recording IOU");
        if let Err(e) = self.ledger.add_transaction(debtor, creditor, amount) {
            warn!(error = %e, "IOU rejected");
            self.rejected += 1;
        }
    }

    /// Execute a single scenario step.
    fn execute_step(&mut self, step: &ScenarioStep) -> anyhow::Result<()> {
        match step {
            ScenarioStep::Record {
                debtor,
                creditor,
                amount,
            } => {
                let amount = parse_amount(amount)
                    .ok_or_else(|| anyhow::anyhow!("Invalid amount in scenario: {}", amount))?;
                self.record(
                    PartyName::new(debtor.as_str()),
                    PartyName::new(creditor.as_str()),
                    amount,
                );
            }
            ScenarioStep::Minimize => {
                let plan = self.ledger.settlement_plan();
                for settlement in &plan.settlements {
                    info!("  {}", settlement);
                }
                info!(
                    settlements = plan.count(),
                    original = plan.original_count,
                    "Minimized"
                );
            }
            ScenarioStep::Clear => {
                self.ledger.clear();
                self.rejected = 0;
            }
            ScenarioStep::Expect { condition } => self.check(condition)?,
        }

        Ok(())
    }

    fn check(&self, condition: &ExpectCondition) -> anyhow::Result<()> {
        match condition {
            ExpectCondition::SettlementCount { count } => {
                let actual = self.ledger.minimize().len();
                if actual != *count {
                    anyhow::bail!("Expected {} settlements, got {}", count, actual);
                }
            }
            ExpectCondition::Balance { party, amount } => {
                let expected = parse_amount(amount)
                    .ok_or_else(|| anyhow::anyhow!("Invalid amount in scenario: {}", amount))?;
                let actual = self
                    .ledger
                    .balances()
                    .get(&PartyName::new(party.as_str()))
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                if actual != expected {
                    anyhow::bail!("Expected {} to hold {}, got {}", party, expected, actual);
                }
            }
            ExpectCondition::TransactionCount { count } => {
                let actual = self.ledger.transaction_count();
                if actual != *count {
                    anyhow::bail!("Expected {} transactions, got {}", count, actual);
                }
            }
        }

        debug!(?condition, "Expectation met");
        Ok(())
    }

    fn report(&self, scenario: &str, start: Instant) -> SimulationReport {
        let balances = self.ledger.balances();
        let plan = self.ledger.settlement_plan();
        let (debtors, creditors) = count_roles(&balances);

        let residual = apply_settlements(&balances, &plan.settlements)
            .values()
            .map(|b| b.abs())
            .max()
            .unwrap_or(Decimal::ZERO);

        SimulationReport {
            scenario: scenario.to_string(),
            transactions_recorded: self.ledger.transaction_count(),
            transactions_rejected: self.rejected,
            debtors,
            creditors,
            settlements: plan.count(),
            savings: plan.savings(),
            savings_percent: plan.savings_percent(),
            residual,
            integrity: self.ledger.verify_integrity(),
            elapsed: start.elapsed(),
        }
    }
}
