//! Bill normalization into a base currency.
//!
//! Rate tables are resolved through the cache with this policy:
//! - fresh entry: used as-is
//! - stale entry: one refresh is attempted; on failure the stale table is
//!   used and the error is swallowed
//! - no entry: fetched synchronously; on failure the error propagates

use std::sync::Arc;
use std::time::Duration;

use billsplit_shared::RatesConfig;
use chrono::Utc;
use tracing::{debug, info, warn};

use super::cache::RateCache;
use super::error::{NormalizeError, RateError};
use super::source::{RateSource, RetryPolicy, fetch_with_retry};
use super::table::{RateTable, normalize_code};
use crate::split::Bill;

/// Default freshness window for cached tables (30 minutes).
const DEFAULT_TTL_SECS: u64 = 30 * 60;

/// Bills with `amount_base` filled in, plus the date of the rates used.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBills {
    /// Converted bills, in input order.
    pub bills: Vec<Bill>,
    /// Date reported by the rate table.
    pub rate_date: String,
}

/// Converts bills into a base currency using cached or fetched rates.
pub struct CurrencyNormalizer {
    source: Arc<dyn RateSource>,
    cache: RateCache,
    ttl: Duration,
    retry: RetryPolicy,
}

impl CurrencyNormalizer {
    /// Creates a normalizer with the default TTL and retry policy.
    pub fn new(source: Arc<dyn RateSource>, cache: RateCache) -> Self {
        Self {
            source,
            cache,
            ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            retry: RetryPolicy::default(),
        }
    }

    /// Creates a normalizer configured from `RatesConfig`.
    pub fn from_config(source: Arc<dyn RateSource>, cache: RateCache, config: &RatesConfig) -> Self {
        Self::new(source, cache)
            .with_ttl(config.cache_ttl())
            .with_retry(RetryPolicy::from(config))
    }

    /// Sets the freshness window.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the retry policy used for fetches and refreshes.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The cache backing this normalizer.
    #[must_use]
    pub const fn cache(&self) -> &RateCache {
        &self.cache
    }

    /// Returns a usable rate table for `base`.
    pub async fn rate_table(&self, base: &str) -> Result<Arc<RateTable>, RateError> {
        let key = normalize_code(base);

        let Some(cached) = self.cache.get(&key) else {
            let table = fetch_with_retry(self.source.as_ref(), &key, self.retry).await?;
            info!(base = %key, date = %table.date, "Fetched exchange rates");
            return Ok(self.cache.set(&key, table));
        };

        if cached.is_fresh(self.ttl, Utc::now()) {
            debug!(base = %key, "Using cached exchange rates");
            return Ok(cached);
        }

        match fetch_with_retry(self.source.as_ref(), &key, self.retry).await {
            Ok(table) => {
                info!(base = %key, date = %table.date, "Refreshed exchange rates");
                Ok(self.cache.set(&key, table))
            }
            Err(e) => {
                warn!(
                    base = %key,
                    error = %e,
                    stale_date = %cached.date,
                    "Rate refresh failed, serving stale table"
                );
                Ok(cached)
            }
        }
    }

    /// Converts every bill into `base`.
    ///
    /// Fails without partial results if no table can be obtained or any
    /// bill's currency is missing from it.
    pub async fn normalize(
        &self,
        base: &str,
        bills: Vec<Bill>,
    ) -> Result<NormalizedBills, NormalizeError> {
        let table = self.rate_table(base).await?;
        let bills = convert_bills(&table, bills)?;

        Ok(NormalizedBills {
            bills,
            rate_date: table.date.clone(),
        })
    }
}

/// Converts bills with an already-resolved table.
///
/// Blank or base-currency bills keep their amount. Others are divided by
/// their rate; an absent or zero rate aborts the whole conversion.
pub fn convert_bills(table: &RateTable, bills: Vec<Bill>) -> Result<Vec<Bill>, NormalizeError> {
    bills
        .into_iter()
        .map(|mut bill| -> Result<Bill, NormalizeError> {
            let code = bill
                .currency
                .as_deref()
                .map(normalize_code)
                .filter(|code| !code.is_empty())
                .unwrap_or_else(|| table.base.clone());

            bill.amount_base = if code == table.base {
                bill.amount
            } else {
                let rate = table
                    .rate(&code)
                    .filter(|rate| !rate.is_zero())
                    .ok_or_else(|| NormalizeError::MissingRate {
                        currency: code.to_uppercase(),
                        rate_date: table.date.clone(),
                    })?;
                bill.amount
                    .checked_div(rate)
                    .ok_or_else(|| NormalizeError::Overflow {
                        currency: code.to_uppercase(),
                        rate_date: table.date.clone(),
                    })?
            };

            Ok(bill)
        })
        .collect()
}
