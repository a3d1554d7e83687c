//! Integration tests for HttpRateSource against a local provider stub.

use std::time::Duration;

use axum::{Router, http::StatusCode, routing::get};
use billsplit_core::currency::{RateError, RateSource};
use billsplit_rates::HttpRateSource;
use billsplit_shared::RatesConfig;
use rust_decimal_macros::dec;
use tokio::net::TcpListener;

/// Starts a stub provider and returns its URL template.
async fn spawn_provider() -> String {
    let app = Router::new()
        .route(
            "/currencies/twd.json",
            get(|| async { r#"{"date": "2025-12-06", "twd": {"usd": 0.03125, "jpy": 4.5}}"# }),
        )
        .route(
            "/currencies/eur.json",
            get(|| async { r#"{"date": "2025-12-06", "usd": {"eur": 0.9}}"# }),
        )
        .route(
            "/currencies/gbp.json",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        )
        .route(
            "/currencies/chf.json",
            get(|| async { "<html>not json</html>" }),
        )
        .route(
            "/currencies/nzd.json",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                r#"{"nzd": {}}"#
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/currencies/{{base}}.json")
}

fn source(api_url: String) -> HttpRateSource {
    HttpRateSource::new(RatesConfig {
        api_url,
        timeout_secs: 1,
        ..RatesConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_parses_rates() {
    let source = source(spawn_provider().await);

    let table = source.fetch("TWD").await.unwrap();

    assert_eq!(table.base, "twd");
    assert_eq!(table.date, "2025-12-06");
    assert_eq!(table.rate("usd"), Some(dec!(0.03125)));
    assert_eq!(table.rate("twd"), Some(dec!(1)));
}

#[tokio::test]
async fn test_missing_base_key_is_parse_error() {
    let source = source(spawn_provider().await);

    let err = source.fetch("eur").await.unwrap_err();

    assert_eq!(err, RateError::Parse("no rate data for eur".into()));
}

#[tokio::test]
async fn test_non_200_is_network_error() {
    let source = source(spawn_provider().await);

    let err = source.fetch("gbp").await.unwrap_err();

    assert_eq!(err, RateError::Network("HTTP 503".into()));
}

#[tokio::test]
async fn test_unknown_route_is_network_error() {
    let source = source(spawn_provider().await);

    let err = source.fetch("xyz").await.unwrap_err();

    assert_eq!(err, RateError::Network("HTTP 404".into()));
}

#[tokio::test]
async fn test_invalid_body_is_parse_error() {
    let source = source(spawn_provider().await);

    let err = source.fetch("chf").await.unwrap_err();

    assert!(matches!(err, RateError::Parse(_)));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let source = source(spawn_provider().await);

    let err = source.fetch("nzd").await.unwrap_err();

    assert!(matches!(err, RateError::Network(_)));
}

#[tokio::test]
async fn test_unreachable_provider_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = source(format!("http://{addr}/{{base}}.json"));
    let err = source.fetch("twd").await.unwrap_err();

    assert!(matches!(err, RateError::Network(_)));
}
