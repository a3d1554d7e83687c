//! Session sync endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
    routing::get,
};
use billsplit_shared::AppError;
use tracing::{info, warn};

use super::calculate::method_not_allowed;
use crate::{AppState, error::error_response, session::SessionState};

/// Creates the sync routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/sync",
        get(get_session)
            .post(put_session)
            .fallback(method_not_allowed),
    )
}

/// GET `/sync` - Current shared session.
async fn get_session(State(state): State<AppState>) -> Json<SessionState> {
    Json(state.session.snapshot().await)
}

/// POST `/sync` - Replace the shared session.
async fn put_session(
    State(state): State<AppState>,
    payload: Result<Json<SessionState>, JsonRejection>,
) -> Response {
    let Json(next) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected session payload");
            return error_response(&AppError::Decode(rejection.body_text()));
        }
    };

    let stored = state.session.replace(next).await;
    info!(
        people = stored.people.len(),
        bills = stored.bills.len(),
        base = %stored.base_currency,
        "Session updated"
    );

    Json(stored).into_response()
}
