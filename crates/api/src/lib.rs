//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - the calculate orchestrator
//! - the shared session store
//! - REST API routes

pub mod calculate;
pub mod error;
pub mod routes;
pub mod session;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use calculate::{CalculateRequest, CalculateResponse, Calculator};
pub use session::{SessionState, SessionStore};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Normalization plus settlement.
    pub calculator: Arc<Calculator>,
    /// Last synced group state.
    pub session: Arc<SessionStore>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .nest("/api", routes::bridge_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
