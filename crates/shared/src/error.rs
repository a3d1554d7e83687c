//! Application-wide error types.

use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body could not be decoded.
    #[error("Failed to decode request: {0}")]
    Decode(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A bill references a currency the rate table does not cover.
    #[error("Missing exchange rate for {0}")]
    MissingRate(String),

    /// External service error (rate provider unreachable or malformed).
    #[error("External service error: {0}")]
    ExternalService(String),

    /// HTTP method not supported by the endpoint.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Decode(_) | Self::Validation(_) => 400,
            Self::MethodNotAllowed(_) => 405,
            Self::MissingRate(_) => 422,
            Self::ExternalService(_) => 502,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "DECODE_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::MissingRate(_) => "MISSING_RATE",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
