//! Expense splitting: people, bills, and settlement planning.

pub mod engine;
pub mod error;
pub mod types;

#[cfg(test)]
mod props;

pub use engine::{SETTLED_EPSILON, SettlementEngine};
pub use error::SettlementError;
pub use types::{Bill, Person, PersonId, Settlement};
