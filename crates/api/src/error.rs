//! Conversion of `AppError` into HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use billsplit_shared::AppError;
use serde_json::json;

/// Builds the `{error, message}` body with the error's status code.
pub fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    #[tokio::test]
    async fn test_error_response_body() {
        let response = error_response(&AppError::Decode("expected value".into()));

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "DECODE_ERROR");
        assert_eq!(body["message"], "Failed to decode request: expected value");
    }

    #[test]
    fn test_error_response_status() {
        let response = error_response(&AppError::MethodNotAllowed("DELETE".into()));
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
