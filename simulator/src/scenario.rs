//! Simulation scenarios.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// A scripted sequence of ledger operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Steps in the scenario.
    pub steps: Vec<ScenarioStep>,
}

/// A step in a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Record an IOU.
    Record {
        debtor: String,
        creditor: String,
        amount: String,
    },
    /// Compute settlements and report them.
    Minimize,
    /// Clear the ledger.
    Clear,
    /// Assert a condition.
    Expect { condition: ExpectCondition },
}

/// Conditions that can be asserted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpectCondition {
    /// Minimization yields this many settlements.
    SettlementCount { count: usize },
    /// A party's net balance equals the amount.
    Balance { party: String, amount: String },
    /// The ledger holds this many transactions.
    TransactionCount { count: usize },
}

impl Scenario {
    /// Load a built-in scenario by name, or a JSON scenario file by path.
    pub fn load(name: &str) -> anyhow::Result<Self> {
        match name {
            "chain" => Ok(Self::chain()),
            "hub" => Ok(Self::hub()),
            "triangle" => Ok(Self::triangle()),
            "equal-split" => Ok(Self::equal_split()),
            _ if name.ends_with(".json") => Self::from_file(name),
            _ => Err(anyhow::anyhow!("Unknown scenario: {}", name)),
        }
    }

    /// Read a scenario from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Names of the built-in scenarios.
    pub fn builtin_names() -> &'static [&'static str] {
        &["chain", "hub", "triangle", "equal-split"]
    }

    /// A owes B, B owes C: B drops out and A pays C directly.
    fn chain() -> Self {
        Self {
            name: "chain".to_string(),
            description: "Debt passed along a chain collapses to one transfer".to_string(),
            steps: vec![
                record("A", "B", "10"),
                record("B", "C", "10"),
                expect(ExpectCondition::Balance {
                    party: "B".to_string(),
                    amount: "0".to_string(),
                }),
                ScenarioStep::Minimize,
                expect(ExpectCondition::SettlementCount { count: 1 }),
            ],
        }
    }

    /// Two debtors owing one creditor.
    fn hub() -> Self {
        Self {
            name: "hub".to_string(),
            description: "Two debtors settle with a single creditor, largest first".to_string(),
            steps: vec![
                record("A", "B", "100"),
                record("C", "B", "50"),
                expect(ExpectCondition::Balance {
                    party: "B".to_string(),
                    amount: "150".to_string(),
                }),
                ScenarioStep::Minimize,
                expect(ExpectCondition::SettlementCount { count: 2 }),
            ],
        }
    }

    /// A cycle of equal debts cancels out entirely.
    fn triangle() -> Self {
        Self {
            name: "triangle".to_string(),
            description: "Circular debts cancel and need no transfers".to_string(),
            steps: vec![
                record("A", "B", "25"),
                record("B", "C", "25"),
                record("C", "A", "25"),
                ScenarioStep::Minimize,
                expect(ExpectCondition::SettlementCount { count: 0 }),
                ScenarioStep::Clear,
                expect(ExpectCondition::TransactionCount { count: 0 }),
            ],
        }
    }

    /// Shared dinner and taxi bills split evenly among four friends.
    fn equal_split() -> Self {
        Self {
            name: "equal-split".to_string(),
            description: "Group expenses split evenly across four people".to_string(),
            steps: vec![
                // Alice paid 120 for dinner.
                record("Bob", "Alice", "30"),
                record("Carol", "Alice", "30"),
                record("Dave", "Alice", "30"),
                // Bob paid 40 for the taxi.
                record("Alice", "Bob", "10"),
                record("Carol", "Bob", "10"),
                record("Dave", "Bob", "10"),
                expect(ExpectCondition::Balance {
                    party: "Alice".to_string(),
                    amount: "80".to_string(),
                }),
                expect(ExpectCondition::Balance {
                    party: "Bob".to_string(),
                    amount: "0".to_string(),
                }),
                ScenarioStep::Minimize,
                expect(ExpectCondition::SettlementCount { count: 2 }),
            ],
        }
    }
}

fn record(debtor: &str, creditor: &str, amount: &str) -> ScenarioStep {
    ScenarioStep::Record {
        debtor: debtor.to_string(),
        creditor: creditor.to_string(),
        amount: amount.to_string(),
    }
}

fn expect(condition: ExpectCondition) -> ScenarioStep {
    ScenarioStep::Expect { condition }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_builtins() {
        for name in Scenario::builtin_names() {
            let scenario = Scenario::load(name).unwrap();
            assert_eq!(&scenario.name, name);
            assert!(!scenario.steps.is_empty());
        }
    }

    #[test]
    fn test_unknown_scenario() {
        assert!(Scenario::load("nope").is_err());
    }

    #[test]
    fn test_json_round_trip_shape() {
        let json = r#"{
            "name": "custom",
            "description": "from json",
            "steps": [
                {"type": "record", "debtor": "A", "creditor": "B", "amount": "5"},
                {"type": "minimize"},
                {"type": "expect", "condition": {"kind": "settlement_count", "count": 1}}
            ]
        }"#;

        let scenario: Scenario = serde_json::from_str(json).unwrap();

        assert_eq!(scenario.steps.len(), 3);
        assert!(matches!(scenario.steps[1], ScenarioStep::Minimize));
    }
}
