//! Rate source abstraction and retrying fetch.

use std::time::Duration;

use async_trait::async_trait;
use billsplit_shared::RatesConfig;
use chrono::Utc;
use tracing::warn;

use super::error::RateError;
use super::table::RateTable;

/// Remote provider of exchange rate tables.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetches the rate table for `base` with a single request.
    async fn fetch(&self, base: &str) -> Result<RateTable, RateError>;
}

/// How many times to try a fetch and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, at least one is always made.
    pub max_attempts: u32,
    /// Wait after attempt `n` fails is `n * backoff`.
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Creates a retry policy.
    #[must_use]
    pub const fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }

    /// Policy that retries immediately.
    #[must_use]
    pub const fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2, Duration::from_millis(200))
    }
}

impl From<&RatesConfig> for RetryPolicy {
    fn from(config: &RatesConfig) -> Self {
        Self::new(config.max_attempts, config.backoff())
    }
}

/// Fetches `base` from `source`, retrying with linear backoff.
///
/// The returned table is stamped with the time of the successful attempt.
/// When every attempt fails, the last error is returned.
pub async fn fetch_with_retry(
    source: &dyn RateSource,
    base: &str,
    policy: RetryPolicy,
) -> Result<RateTable, RateError> {
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match source.fetch(base).await {
            Ok(table) => return Ok(table.with_fetched_at(Utc::now())),
            Err(e) if attempt < attempts => {
                let delay = policy.backoff * attempt;
                warn!(base, attempt, error = %e, ?delay, "Rate fetch failed, retrying");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                warn!(base, attempt, error = %e, "Rate fetch failed, giving up");
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted rate source for tests.

    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Replays queued results, then fails with a network error.
    #[derive(Default)]
    pub struct ScriptedSource {
        responses: Mutex<VecDeque<Result<RateTable, RateError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        pub fn new(responses: impl IntoIterator<Item = Result<RateTable, RateError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RateSource for ScriptedSource {
        async fn fetch(&self, _base: &str) -> Result<RateTable, RateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(RateError::Network("script exhausted".into())))
        }
    }
}
