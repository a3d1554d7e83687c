//! Settlement error types.

use billsplit_shared::AppError;
use thiserror::Error;

use super::types::PersonId;

/// Errors raised while computing balances.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    /// A running balance left the decimal range.
    #[error("Balance of person {person} is out of range after bill {bill}")]
    Overflow {
        /// Bill being applied.
        bill: i64,
        /// Person whose balance overflowed.
        person: PersonId,
    },
}

impl From<SettlementError> for AppError {
    fn from(err: SettlementError) -> Self {
        Self::Validation(err.to_string())
    }
}
