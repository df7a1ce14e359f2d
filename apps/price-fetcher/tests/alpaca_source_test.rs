//! Alpaca market data adapter tests against a mock HTTP server.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use std::time::Duration;

use chrono::NaiveDate;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use price_fetcher::{
    AlpacaConfig, AlpacaError, AlpacaHttpClient, AlpacaPriceSource, FetchError, FetchOptions,
    Fetcher, PriceSource, RetryConfig,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn source(server: &MockServer) -> AlpacaPriceSource {
    let config = AlpacaConfig::new("test-key".to_string(), "test-secret".to_string())
        .with_base_url(&server.uri())
        .with_timeout(Duration::from_secs(5))
        .with_retry(RetryConfig {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(5),
            multiplier: 2.0,
        });
    AlpacaPriceSource::new(AlpacaHttpClient::new(&config).unwrap())
}

fn bar(day: &str, close: f64, volume: u64) -> serde_json::Value {
    json!({
        "t": format!("{day}T04:00:00Z"),
        "o": close, "h": close, "l": close, "c": close,
        "v": volume, "n": 100, "vw": close
    })
}

#[tokio::test]
async fn bars_follow_pagination_with_auth_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/stocks/AAPL/bars"))
        .and(header("APCA-API-KEY-ID", "test-key"))
        .and(header("APCA-API-SECRET-KEY", "test-secret"))
        .and(query_param("timeframe", "1Day"))
        .and(query_param("adjustment", "split"))
        .and(query_param("start", "2024-05-01"))
        .and(query_param("end", "2024-05-06"))
        .and(query_param_is_missing("page_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bars": [bar("2024-05-01", 169.3, 50_000_000), bar("2024-05-02", 173.0, 94_000_000)],
            "symbol": "AAPL",
            "next_page_token": "page-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/stocks/AAPL/bars"))
        .and(query_param("page_token", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bars": [bar("2024-05-03", 183.4, 163_000_000)],
            "symbol": "AAPL",
            "next_page_token": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let bars = source(&server)
        .daily_bars("AAPL", date(2024, 5, 1), date(2024, 5, 6))
        .await
        .unwrap();

    assert_eq!(bars.len(), 3);
    assert_eq!(bars[0].date, date(2024, 5, 1));
    assert_eq!(bars[2].close, 183.4);
}

#[tokio::test]
async fn server_errors_are_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/stocks/SPY/trades/latest"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/stocks/SPY/trades/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "symbol": "SPY",
            "trade": {"t": "2024-05-06T19:59:59Z", "p": 513.25, "s": 100}
        })))
        .mount(&server)
        .await;

    let price = source(&server).latest_trade_price("SPY").await.unwrap();
    assert_eq!(price, 513.25);
}

#[tokio::test]
async fn throttled_request_waits_and_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/stocks/SPY/trades/latest"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/stocks/SPY/trades/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "symbol": "SPY",
            "trade": {"t": "2024-05-06T19:59:59Z", "p": 512.0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let price = source(&server).latest_trade_price("SPY").await.unwrap();
    assert_eq!(price, 512.0);
}

#[tokio::test]
async fn persistent_throttling_reports_rate_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(3)
        .mount(&server)
        .await;

    let err = source(&server).latest_trade_price("SPY").await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::Alpaca(AlpacaError::RateLimited { retry_after_secs: 0 })
    ));
}

#[tokio::test]
async fn persistent_server_errors_exhaust_retries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let err = source(&server).latest_trade_price("SPY").await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::Alpaca(AlpacaError::MaxRetriesExceeded { attempts: 3 })
    ));
}

#[tokio::test]
async fn unauthorized_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"code": 40_110_000, "message": "unauthorized."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = source(&server)
        .daily_bars("AAPL", date(2024, 5, 1), date(2024, 5, 6))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        FetchError::Alpaca(AlpacaError::AuthenticationFailed)
    ));
}

#[tokio::test]
async fn bad_request_surfaces_api_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({"code": 42_210_000, "message": "invalid symbol"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = source(&server).latest_trade_price("???").await.unwrap_err();
    match err {
        FetchError::Alpaca(AlpacaError::Api { code, message }) => {
            assert_eq!(code, "42210000");
            assert_eq!(message, "invalid symbol");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn fetcher_writes_window_from_mock_api() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/stocks/SPY/bars"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bars": [
                bar("2024-05-01", 500.0, 1_000),
                bar("2024-05-02", 501.0, 0),
                bar("2024-05-03", 502.0, 1_000),
            ],
            "symbol": "SPY",
            "next_page_token": null
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/stocks/SPY/trades/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "symbol": "SPY",
            "trade": {"t": "2024-05-06T15:00:00Z", "p": 503.5}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let options = FetchOptions {
        ndays: 3,
        data_dir: dir.path().to_path_buf(),
        ..FetchOptions::default()
    };
    let fetcher = Fetcher::new(source(&server), options, date(2024, 5, 6));

    let summary = fetcher.run(&["SPY".to_string()]).await;
    assert_eq!(summary.written, 1);

    let text = std::fs::read_to_string(dir.path().join("SPY.dat")).unwrap();
    assert_eq!(text, "2024-05-01 500\n2024-05-03 502\n2024-05-06 503.5\n");
}
