//! Exchange rate tables and provider response parsing.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::error::RateError;

/// Snapshot of exchange rates relative to one base currency.
///
/// `amount_base = amount_foreign / rates[foreign]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    /// Base currency code, lower-cased.
    pub base: String,
    /// Currency code (lower-cased) to rate.
    pub rates: HashMap<String, Decimal>,
    /// Date reported by the provider, empty when absent.
    pub date: String,
    /// When the table was fetched.
    pub fetched_at: DateTime<Utc>,
}

impl RateTable {
    /// Creates a table fetched now. The base always maps to 1.
    pub fn new(
        base: &str,
        rates: impl IntoIterator<Item = (String, Decimal)>,
        date: impl Into<String>,
    ) -> Self {
        let base = normalize_code(base);
        let mut rates: HashMap<String, Decimal> = rates
            .into_iter()
            .map(|(code, rate)| (normalize_code(&code), rate))
            .collect();
        rates.insert(base.clone(), Decimal::ONE);

        Self {
            base,
            rates,
            date: date.into(),
            fetched_at: Utc::now(),
        }
    }

    /// Returns the table with a different fetch timestamp.
    #[must_use]
    pub fn with_fetched_at(mut self, at: DateTime<Utc>) -> Self {
        self.fetched_at = at;
        self
    }

    /// Looks up the rate for a currency code.
    #[must_use]
    pub fn rate(&self, code: &str) -> Option<Decimal> {
        self.rates.get(&normalize_code(code)).copied()
    }

    /// Whether the table is younger than `ttl` at `now`.
    ///
    /// A fetch timestamp in the future counts as fresh.
    #[must_use]
    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        match (now - self.fetched_at).to_std() {
            Ok(age) => age < ttl,
            Err(_) => true,
        }
    }

    /// Parses a provider response for `base`.
    ///
    /// Expects `{"date": "...", "<base>": {"<code>": <rate>, ...}}`. The
    /// date is optional; the base object is not.
    pub fn parse(base: &str, body: &[u8]) -> Result<Self, RateError> {
        let base_key = normalize_code(base);

        let document: Map<String, Value> =
            serde_json::from_slice(body).map_err(|e| RateError::Parse(e.to_string()))?;

        let date = document
            .get("date")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let raw_rates = document
            .get(&base_key)
            .ok_or_else(|| RateError::Parse(format!("no rate data for {base_key}")))?;

        let raw_rates: HashMap<String, f64> = serde_json::from_value(raw_rates.clone())
            .map_err(|e| RateError::Parse(e.to_string()))?;

        let rates = raw_rates
            .into_iter()
            .map(|(code, rate)| {
                Decimal::try_from(rate)
                    .map(|rate| (code.clone(), rate))
                    .map_err(|e| RateError::Parse(format!("rate for {code}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(&base_key, rates, date))
    }
}

/// Canonical form of a currency code: trimmed and lower-cased.
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.trim().to_lowercase()
}
