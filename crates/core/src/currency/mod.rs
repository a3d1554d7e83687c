//! Multi-currency handling: rate tables, caching, and bill normalization.

pub mod cache;
pub mod error;
pub mod normalizer;
pub mod source;
pub mod table;

pub use cache::RateCache;
pub use error::{NormalizeError, RateError};
pub use normalizer::{CurrencyNormalizer, NormalizedBills, convert_bills};
pub use source::{RateSource, RetryPolicy, fetch_with_retry};
pub use table::RateTable;
