#![cfg(feature = "web")]
//! Web handler integration tests.
//!
//! Tests cover:
//! - Index form renders with every scan field
//! - Analyze submission writes a trade log and answers with JSON
//! - Empty scans, invalid parameters and short data
//! - Trade log download and rejected file names

mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use breakscan::adapters::csv_report_adapter::CsvReportAdapter;
use breakscan::adapters::web::{AppState, build_router};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use common::*;

const VALID_FORM: &str = "ticker=aapl&start_date=2024-01-01&end_date=2024-03-31\
&volume_threshold=150&price_change_threshold=5&holding_period=5";

fn router(port: MockDataPort, out: &TempDir) -> Router {
    build_router(AppState {
        data_port: Arc::new(port),
        report: CsvReportAdapter::new(),
        output_dir: out.path().to_path_buf(),
    })
}

fn default_router(out: &TempDir) -> Router {
    router(
        MockDataPort::new()
            .with_bars("AAPL", worked_example_bars())
            .with_bars("FLAT", flat_bars(40))
            .with_bars("TINY", flat_bars(5)),
        out,
    )
}

fn post_form(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

#[tokio::test]
async fn index_renders_form() {
    let out = TempDir::new().unwrap();
    let response = default_router(&out).oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    for field in [
        "ticker",
        "start_date",
        "end_date",
        "volume_threshold",
        "price_change_threshold",
        "holding_period",
    ] {
        assert!(html.contains(&format!("name=\"{}\"", field)), "missing {field}");
    }
    assert!(html.contains("action=\"/analyze\""));
}

#[tokio::test]
async fn analyze_writes_trade_log() {
    let out = TempDir::new().unwrap();
    let response = default_router(&out)
        .oneshot(post_form(VALID_FORM))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Analysis complete!");
    assert_eq!(json["file"], "trades/AAPL_breakout_trades.csv");
    assert_eq!(json["bars"], 40);
    assert_eq!(json["summary"]["total"], 1);
    assert_eq!(json["summary"]["closed"], 1);

    let content = std::fs::read_to_string(out.path().join("AAPL_breakout_trades.csv")).unwrap();
    assert!(content.contains("1,AAPL,2024-01-25,110.00,2024-01-30,115.00,4.55"));
}

#[tokio::test]
async fn analyze_without_breakouts() {
    let out = TempDir::new().unwrap();
    let form = VALID_FORM.replace("ticker=aapl", "ticker=FLAT");
    let response = default_router(&out).oneshot(post_form(&form)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No breakout trades found!");
    assert!(!out.path().join("FLAT_breakout_trades.csv").exists());
}

#[tokio::test]
async fn analyze_missing_field_is_bad_request() {
    let out = TempDir::new().unwrap();
    let form = VALID_FORM.replace("&holding_period=5", "");
    let response = default_router(&out).oneshot(post_form(&form)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("holding_period"));
}

#[tokio::test]
async fn analyze_invalid_threshold_is_bad_request() {
    let out = TempDir::new().unwrap();
    let form = VALID_FORM.replace("volume_threshold=150", "volume_threshold=0");
    let response = default_router(&out).oneshot(post_form(&form)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn analyze_short_data_is_bad_request() {
    let out = TempDir::new().unwrap();
    let form = VALID_FORM.replace("ticker=aapl", "ticker=TINY");
    let response = default_router(&out).oneshot(post_form(&form)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn analyze_unknown_ticker_is_bad_request() {
    let out = TempDir::new().unwrap();
    let form = VALID_FORM.replace("ticker=aapl", "ticker=NOPE");
    let response = default_router(&out).oneshot(post_form(&form)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn download_after_analyze() {
    let out = TempDir::new().unwrap();
    let app = default_router(&out);

    let response = app.clone().oneshot(post_form(VALID_FORM)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get("/trades/AAPL_breakout_trades.csv"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("AAPL_breakout_trades.csv"));

    let body = body_string(response).await;
    assert!(body.starts_with("Sr. No.,Ticker,Entry Date"));
}

#[tokio::test]
async fn download_missing_file_is_not_found() {
    let out = TempDir::new().unwrap();
    let response = default_router(&out)
        .oneshot(get("/trades/MSFT_breakout_trades.csv"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn download_rejects_traversal() {
    let out = TempDir::new().unwrap();
    let response = default_router(&out)
        .oneshot(get("/trades/..%2Fsecret.csv"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let out = TempDir::new().unwrap();
    let response = default_router(&out).oneshot(get("/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_analyses_complete() {
    let out = TempDir::new().unwrap();
    let app = default_router(&out);
    let flat_form = VALID_FORM.replace("ticker=aapl", "ticker=FLAT");

    let (a, b) = tokio::join!(
        app.clone().oneshot(post_form(VALID_FORM)),
        app.clone().oneshot(post_form(&flat_form)),
    );

    let a = body_json(a.unwrap()).await;
    let b = body_json(b.unwrap()).await;
    assert_eq!(a["message"], "Analysis complete!");
    assert_eq!(b["error"], "No breakout trades found!");
    assert!(out.path().join("AAPL_breakout_trades.csv").exists());
}
