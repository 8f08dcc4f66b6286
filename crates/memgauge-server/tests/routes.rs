//! HTTP surface tests against the in-process router.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use memgauge_server::app_state::AppState;
use memgauge_server::config::AppConfig;
use memgauge_server::router::build_router;
use memgauge_server::sampling::{ContainerInfo, StaticRuntime};

fn app() -> (AppState, Router) {
    let runtime = Arc::new(StaticRuntime::new(vec![ContainerInfo {
        id: "missing".into(),
        name: "ghost".into(),
    }]));
    let mut cfg = AppConfig::default();
    cfg.memory.root = std::env::temp_dir().join("memgauge-routes-no-such-root");
    let state = AppState::with_runtime(cfg, runtime).unwrap();
    (state.clone(), build_router(state))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let resp = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn metrics_counts_its_own_scrapes() {
    let (_, app) = app();

    let (status, ct, body) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ct.as_deref(), Some("text/plain; version=0.0.4; charset=utf-8"));
    assert!(body.starts_with("# HELP scraping_metrics_counter Counts prometheus scraping metrics.\n"));
    assert!(body.contains("scraping_metrics_counter 1\n"));

    let (_, _, body) = get(&app, "/metrics").await;
    assert!(body.contains("scraping_metrics_counter 2\n"));
}

#[tokio::test]
async fn index_is_counted_with_status_200() {
    let (_, app) = app();

    for _ in 0..3 {
        let (status, _, body) = get(&app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Hello World");
    }

    let (_, _, body) = get(&app, "/metrics").await;
    assert!(body.contains(
        "request_count{app_name=\"web-app\",method=\"GET\",endpoint=\"/\",http_status=\"200\"} 3\n"
    ));
    assert!(body.contains("request_processing_seconds_count 3\n"));
}

#[tokio::test]
async fn fail_returns_500_and_is_counted() {
    let (_, app) = app();

    let (status, _, body) = get(&app, "/fail/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "INTERNAL");

    let (_, _, body) = get(&app, "/metrics").await;
    assert!(body.contains(
        "request_count{app_name=\"web-app\",method=\"GET\",endpoint=\"/fail/\",http_status=\"500\"} 1\n"
    ));
}

#[tokio::test]
async fn unmatched_and_operational_routes_are_not_counted() {
    let (_, app) = app();

    let (status, _, _) = get(&app, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, body) = get(&app, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");

    let (_, _, body) = get(&app, "/metrics").await;
    assert!(!body.contains("request_count{"));
    assert!(body.contains("request_processing_seconds_count 0\n"));
}

#[tokio::test]
async fn memory_endpoint_survives_failed_reads() {
    let (state, app) = app();
    state.metrics().memory_usage.with_labels(&["ghost"]).unwrap().set(42.0);

    let (status, ct, body) = get(&app, "/memory/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ct.as_deref(), Some("text/plain; version=0.0.4; charset=utf-8"));
    assert!(body.contains("# TYPE memory_usage_mb gauge\n"));
    assert!(body.contains("memory_usage_mb{name=\"ghost\"} 42\n"));
    // /memory/ is not a scrape of /metrics
    assert!(body.contains("scraping_metrics_counter 0\n"));
}

#[tokio::test]
async fn time_route_reports_its_delay() {
    let mut cfg = AppConfig::default();
    cfg.time.max_secs = 1;
    let state = AppState::with_runtime(cfg, Arc::new(StaticRuntime::new(Vec::new()))).unwrap();
    let app = build_router(state.clone());

    let (status, _, body) = get(&app, "/time/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Time: 1");
    assert_eq!(state.metrics().request_time.count(), 1);
    assert!(state.metrics().request_time.sum() >= 1.0);
}
