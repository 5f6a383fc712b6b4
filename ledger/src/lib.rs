//! Cashflow Ledger Engine
//!
//! Append-only IOU ledger with incrementally maintained net balances, and
//! the greedy solver that turns those balances into a short list of
//! settlement transfers.

pub mod engine;
pub mod journal;
pub mod balance;
pub mod solver;
pub mod plan;

pub use engine::Ledger;
pub use journal::{replay, Journal};
pub use balance::{count_roles, positions, PartyPosition};
pub use solver::{apply_settlements, minimize};
pub use plan::SettlementPlan;
