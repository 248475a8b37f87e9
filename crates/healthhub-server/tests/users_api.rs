//! HTTP surface tests driven in-process through the router.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod support;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use healthhub_server::app_state::AppState;
use healthhub_server::router::build_router;
use healthhub_server::store::{InMemoryUserStore, UserStore};

use support::{test_state, three_month_store, FailingStore, StalledStore};

fn app(store: impl UserStore + 'static) -> (AppState, Router) {
    let state = test_state(Arc::new(store));
    let router = build_router(state.clone());
    (state, router)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn call(router: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = router.clone().oneshot(get(uri)).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn call_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = call(router, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn list_users_omits_credentials() {
    let (_, router) = app(three_month_store());
    let (status, body) = call_json(&router, "/users").await;

    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 3);
    for u in users {
        assert!(u.get("passwordHash").is_none());
        assert!(u.get("email").is_some());
    }
    assert_eq!(users[0]["id"], "aug");
    assert_eq!(users[0]["firstName"], "AUG");
    assert_eq!(users[1]["lastActiveAt"], Value::Null);
}

#[tokio::test]
async fn count_endpoints() {
    let (_, router) = app(three_month_store());

    for (uri, expected) in [
        ("/users/count", 3),
        ("/users/new-this-month", 1),
        ("/users/active-this-week", 1),
    ] {
        let (status, body) = call_json(&router, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, serde_json::json!({ "count": expected }), "{uri}");
    }
}

#[tokio::test]
async fn growth_series_shape() {
    let (_, router) = app(three_month_store());
    let (status, body) = call_json(&router, "/users/growth").await;

    assert_eq!(status, StatusCode::OK);
    let series = body["series"].as_array().unwrap();
    assert_eq!(series.len(), 6);
    assert_eq!(series[0], serde_json::json!({ "period": "2026-05", "count": 0 }));
    assert_eq!(series[3], serde_json::json!({ "period": "2026-08", "count": 1 }));
    assert_eq!(series[5], serde_json::json!({ "period": "2026-10", "count": 1 }));
}

#[tokio::test]
async fn activity_stats_composite() {
    let (_, router) = app(three_month_store());
    let (status, body) = call_json(&router, "/users/activity-stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalUsers"], 3);
    assert_eq!(body["newThisMonth"], 1);
    assert_eq!(body["activeThisWeek"], 1);
    assert_eq!(body["growth"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn empty_store_is_all_zeros() {
    let (_, router) = app(InMemoryUserStore::new());
    let (_, body) = call_json(&router, "/users/activity-stats").await;

    assert_eq!(body["totalUsers"], 0);
    assert_eq!(body["newThisMonth"], 0);
    assert_eq!(body["activeThisWeek"], 0);
    let growth = body["growth"].as_array().unwrap();
    assert!(growth.iter().all(|g| g["count"] == 0));
    assert_eq!(growth[5]["period"], "2026-10");
}

#[tokio::test]
async fn store_failure_is_503_with_message() {
    let (_, router) = app(FailingStore { fail: "count" });
    let (status, body) = call_json(&router, "/users/count").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "STORE_UNAVAILABLE");
    assert!(body["message"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn stalled_store_times_out_as_503() {
    let (_, router) = app(StalledStore);
    let (status, body) = call_json(&router, "/users/count").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["message"].as_str().unwrap().contains("timed out"));
}

#[tokio::test]
async fn aggregation_failure_is_500_naming_subquery() {
    let (_, router) = app(FailingStore { fail: "growth" });
    let (status, body) = call_json(&router, "/users/activity-stats").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "AGGREGATION_FAILURE");
    assert!(body["message"].as_str().unwrap().contains("growth"));
    assert!(body.get("totalUsers").is_none());
}

#[tokio::test]
async fn ops_endpoints() {
    let (state, router) = app(three_month_store());

    let (status, body) = call(&router, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");

    let (status, _) = call(&router, "/readyz").await;
    assert_eq!(status, StatusCode::OK);

    state.set_draining();
    let (status, body) = call(&router, "/readyz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, b"draining");
}

#[tokio::test]
async fn metrics_track_requests_and_queries() {
    let (_, router) = app(three_month_store());
    call(&router, "/users/count").await;
    call(&router, "/users/count").await;

    let (status, body) = call(&router, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();

    assert!(text.contains(r#"healthhub_http_requests_total{route="/users/count",status="200"} 2"#));
    assert!(text.contains(r#"healthhub_store_query_duration_micros_count{query="count"} 2"#));
    assert!(text.contains("healthhub_draining 0"));
    assert!(text.contains("healthhub_users_seeded 0"));
}
