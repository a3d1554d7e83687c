//! Calculate orchestrator: normalization plus settlement behind one call.
//!
//! The boundary always yields a well-formed JSON document. Failures are
//! reported through the `error` field, never by panicking.

use billsplit_core::currency::{CurrencyNormalizer, RateCache};
use billsplit_core::split::{Bill, Person, Settlement, SettlementEngine};
use billsplit_shared::AppError;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Payload returned when the response itself cannot be encoded.
pub const FALLBACK_PAYLOAD: &str = r#"{"error":"internal"}"#;

/// Incoming calculate request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    /// Base currency code; blank means the configured default.
    #[serde(default)]
    pub base_currency: String,
    /// Group members.
    #[serde(default)]
    pub people: Vec<Person>,
    /// Shared expenses.
    #[serde(default)]
    pub bills: Vec<Bill>,
}

/// Outgoing calculate response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    /// Recommended transfers.
    #[serde(default)]
    pub settlements: Vec<Settlement>,
    /// Bills with converted base amounts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bills: Vec<Bill>,
    /// Resolved base currency.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base_currency: String,
    /// Date of the exchange rates used.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rate_date: String,
    /// Error message, when the calculation failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CalculateResponse {
    fn failure(err: &AppError) -> Self {
        Self {
            error: Some(err.to_string()),
            ..Self::default()
        }
    }
}

/// Composes currency normalization and settlement.
pub struct Calculator {
    normalizer: CurrencyNormalizer,
    default_base: String,
}

impl Calculator {
    /// Creates a calculator; blank request currencies fall back to `default_base`.
    pub fn new(normalizer: CurrencyNormalizer, default_base: impl Into<String>) -> Self {
        Self {
            normalizer,
            default_base: default_base.into().trim().to_uppercase(),
        }
    }

    /// The rate cache behind the normalizer.
    #[must_use]
    pub const fn cache(&self) -> &RateCache {
        self.normalizer.cache()
    }

    /// Resolves the request's base currency: trimmed, upper-cased, defaulted.
    #[must_use]
    pub fn resolve_base(&self, requested: &str) -> String {
        let base = requested.trim().to_uppercase();
        if base.is_empty() {
            self.default_base.clone()
        } else {
            base
        }
    }

    /// Runs a decoded request.
    pub async fn calculate(&self, request: CalculateRequest) -> CalculateResponse {
        let base = self.resolve_base(&request.base_currency);

        let normalized = match self.normalizer.normalize(&base, request.bills).await {
            Ok(normalized) => normalized,
            Err(e) => {
                warn!(base = %base, error = %e, "Bill normalization failed");
                let rate_date = e.rate_date().unwrap_or_default().to_string();
                return CalculateResponse {
                    base_currency: base,
                    rate_date,
                    ..CalculateResponse::failure(&AppError::from(e))
                };
            }
        };

        let settlements = match SettlementEngine::settle(&request.people, &normalized.bills) {
            Ok(settlements) => settlements,
            Err(e) => {
                warn!(base = %base, error = %e, "Settlement failed");
                return CalculateResponse {
                    base_currency: base,
                    rate_date: normalized.rate_date,
                    ..CalculateResponse::failure(&AppError::from(e))
                };
            }
        };
        info!(
            base = %base,
            people = request.people.len(),
            bills = normalized.bills.len(),
            settlements = settlements.len(),
            "Calculated settlements"
        );

        CalculateResponse {
            settlements,
            bills: normalized.bills,
            base_currency: base,
            rate_date: normalized.rate_date,
            error: None,
        }
    }

    /// Runs a raw JSON request and returns the JSON response.
    ///
    /// Bodies that are not UTF-8 or not valid JSON are decode errors.
    pub async fn process_json(&self, body: &[u8]) -> String {
        let response = match serde_json::from_slice::<CalculateRequest>(body) {
            Ok(request) => self.calculate(request).await,
            Err(e) => {
                warn!(error = %e, "Rejected malformed calculate request");
                CalculateResponse::failure(&AppError::Decode(e.to_string()))
            }
        };

        encode(&response)
    }
}

/// Encodes a response, falling back to `FALLBACK_PAYLOAD`.
pub fn encode<T: Serialize>(response: &T) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        error!(error = %e, "Failed to encode response");
        FALLBACK_PAYLOAD.to_string()
    })
}
