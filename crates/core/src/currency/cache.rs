//! Rate table caching using Moka.
//!
//! Entries never expire on their own: a stale table stays servable as a
//! fallback until a refresh replaces it. Freshness is judged by the caller
//! against `RateTable::fetched_at`.

use std::sync::Arc;

use moka::sync::Cache;

use super::table::{RateTable, normalize_code};

/// Thread-safe cache of rate tables keyed by lower-cased base currency.
///
/// Cloning is cheap and clones share the same storage.
#[derive(Clone)]
pub struct RateCache {
    cache: Cache<String, Arc<RateTable>>,
}

impl RateCache {
    /// Creates an empty rate cache.
    ///
    /// There is no size bound: the key space is the provider's currency
    /// list, and an evicted base would lose its stale fallback.
    #[must_use]
    pub fn new() -> Self {
        let cache = Cache::builder().build();
        Self { cache }
    }

    /// Returns the cached table for `base`, fresh or not.
    #[must_use]
    pub fn get(&self, base: &str) -> Option<Arc<RateTable>> {
        self.cache.get(&normalize_code(base))
    }

    /// Inserts or replaces the table for `base`.
    pub fn set(&self, base: &str, table: RateTable) -> Arc<RateTable> {
        let table = Arc::new(table);
        self.cache.insert(normalize_code(base), Arc::clone(&table));
        table
    }

    /// Removes the table for `base`.
    pub fn invalidate(&self, base: &str) {
        self.cache.invalidate(&normalize_code(base));
    }

    /// Removes every cached table.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Returns the number of entries currently in the cache.
    ///
    /// The count is eventually consistent; call `run_pending_tasks` first
    /// for an exact figure.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs cache maintenance tasks.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new()
    }
}
