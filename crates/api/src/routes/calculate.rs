//! Calculate endpoint.

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{Method, header},
    response::{IntoResponse, Response},
    routing::post,
};
use billsplit_shared::AppError;

use crate::{AppState, error::error_response};

/// Creates the calculate routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/calculate", post(calculate).fallback(method_not_allowed))
}

/// POST `/calculate` - Normalize bills and compute settlements.
///
/// Always answers 200; failures travel in the body's `error` field.
async fn calculate(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let payload = state.calculator.process_json(&body).await;
    ([(header::CONTENT_TYPE, "application/json")], payload)
}

pub(crate) async fn method_not_allowed(method: Method) -> Response {
    error_response(&AppError::MethodNotAllowed(method.to_string()))
}
