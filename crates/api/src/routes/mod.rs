//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod calculate;
pub mod health;
pub mod sync;

/// Versioned API routes.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(health::routes())
}

/// Routes used by the client bridge.
pub fn bridge_routes() -> Router<AppState> {
    Router::new()
        .merge(calculate::routes())
        .merge(sync::routes())
}
