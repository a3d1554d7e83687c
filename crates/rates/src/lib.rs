//! HTTP exchange rate provider client.
//!
//! Implements `RateSource` against a JSON endpoint addressed by a URL
//! template such as
//! `https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1/currencies/{base}.json`.

use async_trait::async_trait;
use billsplit_core::currency::{RateError, RateSource, RateTable};
use billsplit_shared::RatesConfig;
use reqwest::{Client, StatusCode};
use tracing::debug;

/// Rate source backed by a remote JSON endpoint.
#[derive(Clone)]
pub struct HttpRateSource {
    client: Client,
    config: RatesConfig,
}

impl HttpRateSource {
    /// Creates a source whose requests time out after `config.timeout_secs`.
    pub fn new(config: RatesConfig) -> Result<Self, RateError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| RateError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch(&self, base: &str) -> Result<RateTable, RateError> {
        let url = self.config.url_for(base);
        debug!(%url, "Requesting exchange rates");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RateError::Network(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RateError::Network(format!("HTTP {}", status.as_u16())));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RateError::Network(e.to_string()))?;

        RateTable::parse(base, &body)
    }
}
