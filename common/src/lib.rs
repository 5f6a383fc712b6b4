//! Cashflow Common Types
//!
//! Shared types for the debt-netting service: party and transaction
//! identifiers, IOU and settlement records, and monetary helpers.

pub mod identifiers;
pub mod monetary;
pub mod transaction;
pub mod settlement;
pub mod error;

pub use identifiers::*;
pub use monetary::*;
pub use transaction::*;
pub use settlement::*;
pub use error::*;
