//! Application configuration management.

use std::time::Duration;

use serde::Deserialize;

/// Placeholder replaced by the lower-cased base currency in `rates.api_url`.
pub const BASE_PLACEHOLDER: &str = "{base}";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Exchange rate provider and cache configuration.
    pub rates: RatesConfig,
    /// Base currency used when a request leaves it blank.
    pub default_base_currency: DefaultCurrency,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Exchange rate configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RatesConfig {
    /// Provider URL template, `{base}` is the lower-cased base currency.
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Age after which a cached rate table is refreshed.
    pub cache_ttl_secs: u64,
    /// Total fetch attempts per refresh.
    pub max_attempts: u32,
    /// Backoff unit in milliseconds; attempt `n` waits `n * backoff_ms`.
    pub backoff_ms: u64,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            api_url: "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1/currencies/{base}.json"
                .to_string(),
            timeout_secs: 5,
            cache_ttl_secs: 30 * 60,
            max_attempts: 2,
            backoff_ms: 200,
        }
    }
}

impl RatesConfig {
    /// Builds the provider URL for a base currency.
    #[must_use]
    pub fn url_for(&self, base: &str) -> String {
        self.api_url.replace(BASE_PLACEHOLDER, &base.trim().to_lowercase())
    }

    /// Request timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Cache freshness window as a `Duration`.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Backoff unit as a `Duration`.
    #[must_use]
    pub const fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

/// Default base currency code.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct DefaultCurrency(pub String);

impl Default for DefaultCurrency {
    fn default() -> Self {
        Self("TWD".to_string())
    }
}

impl DefaultCurrency {
    /// Returns the code, trimmed and upper-cased.
    #[must_use]
    pub fn code(&self) -> String {
        self.0.trim().to_uppercase()
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BILLSPLIT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
