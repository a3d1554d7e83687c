//! Currency error types.

use billsplit_shared::AppError;
use thiserror::Error;

/// Errors raised while obtaining a rate table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateError {
    /// Transport failure or non-200 response.
    #[error("Rate provider request failed: {0}")]
    Network(String),

    /// Response body is not a usable rate document.
    #[error("Malformed rate response: {0}")]
    Parse(String),
}

/// Errors raised while converting bills into the base currency.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// No rate table could be obtained.
    #[error(transparent)]
    Rates(#[from] RateError),

    /// A bill uses a currency the rate table does not cover, or covers
    /// with a zero rate.
    #[error("Missing exchange rate for {currency}")]
    MissingRate {
        /// Offending currency code, upper-cased.
        currency: String,
        /// Date of the rate table that was consulted.
        rate_date: String,
    },

    /// Converting the amount overflowed the decimal range.
    #[error("Amount in {currency} is out of range after conversion")]
    Overflow {
        /// Currency code, upper-cased.
        currency: String,
        /// Date of the rate table that was consulted.
        rate_date: String,
    },
}

impl NormalizeError {
    /// Date of the rate table involved, when one was available.
    #[must_use]
    pub fn rate_date(&self) -> Option<&str> {
        match self {
            Self::Rates(_) => None,
            Self::MissingRate { rate_date, .. } | Self::Overflow { rate_date, .. } => {
                Some(rate_date.as_str())
            }
        }
    }
}

impl From<NormalizeError> for AppError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::Rates(e) => Self::ExternalService(e.to_string()),
            NormalizeError::MissingRate { currency, .. } => Self::MissingRate(currency),
            e @ NormalizeError::Overflow { .. } => Self::Validation(e.to_string()),
        }
    }
}
