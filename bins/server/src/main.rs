//! Billsplit API Server
//!
//! Main entry point for the bill-splitting settlement service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use billsplit_api::{AppState, Calculator, SessionStore, create_router};
use billsplit_core::currency::{CurrencyNormalizer, RateCache};
use billsplit_rates::HttpRateSource;
use billsplit_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "billsplit=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let source = HttpRateSource::new(config.rates.clone())?;
    let cache = RateCache::new();
    let normalizer = CurrencyNormalizer::from_config(Arc::new(source), cache, &config.rates);
    info!(
        api_url = %config.rates.api_url,
        ttl_secs = config.rates.cache_ttl_secs,
        max_attempts = config.rates.max_attempts,
        "Rate provider configured"
    );

    let default_base = config.default_base_currency.code();
    let state = AppState {
        calculator: Arc::new(Calculator::new(normalizer, default_base.as_str())),
        session: Arc::new(SessionStore::new()),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(default_base = %default_base, "Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
