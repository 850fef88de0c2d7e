//! HTTP integration tests for the Shiftdesk REST API.
//!
//! Uses Axum `oneshot` dispatch against the real router with in-memory
//! stores and a pinned clock, so the full handler path is exercised without
//! binding a socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveTime;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use shiftdesk_core::clock::ManualClock;
use shiftdesk_core::config::SchedulingConfig;
use shiftdesk_core::models::{Agent, Seniority, Shift, Team};

use shiftdesk_server::engine::{Engine, Stores};
use shiftdesk_server::http::{build_router, HttpState};

fn t(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap()
}

/// Router over one MidLevel agent on a 08:00-20:00 shift, clock pinned to
/// the given hour.
async fn make_app(hour: u32) -> axum::Router {
    let stores = Stores::in_memory();
    let team = stores.teams.add(Team::new("Day Team", false)).await.unwrap();
    let shift = stores
        .shifts
        .add(Shift::new(team.id, t(8), t(20)))
        .await
        .unwrap();
    let mut agent = Agent::new("Mid", Seniority::MidLevel, team.id);
    agent.shift_id = Some(shift.id);
    stores.agents.add(agent).await.unwrap();

    let clock = Arc::new(ManualClock::at_time_of_day(t(hour)));
    let engine = Arc::new(Engine::new(stores, clock, SchedulingConfig::default()));
    build_router(Arc::new(HttpState { engine }))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// ===========================================================================
// TEST 1: GET /health responds 200 with status and version
// ===========================================================================
#[tokio::test]
async fn test_health_endpoint() {
    let app = make_app(10).await;
    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

// ===========================================================================
// TEST 2: GET /version responds with the crate version
// ===========================================================================
#[tokio::test]
async fn test_version_endpoint() {
    let app = make_app(10).await;
    let response = app.oneshot(get("/version")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["service"], "shiftdesk");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

// ===========================================================================
// TEST 3: POST /sessions during office hours queues and returns 200
// ===========================================================================
#[tokio::test]
async fn test_create_session_queued() {
    let app = make_app(10).await;
    let response = app
        .oneshot(post_json("/sessions", json!({"user_id": "user-1"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "queued");
    assert_eq!(body["is_overflow"], false);
    assert_eq!(body["message"], "Chat session queued.");
}

// ===========================================================================
// TEST 4: POST /sessions off-hours refuses with 400
// ===========================================================================
#[tokio::test]
async fn test_create_session_refused_returns_400() {
    let app = make_app(22).await;
    let response = app
        .oneshot(post_json("/sessions", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], "refused");
    assert!(body["session_id"].is_string(), "refusals are still recorded");
}

// ===========================================================================
// TEST 5: GET /sessions/:id/poll for an unknown id returns 404
// ===========================================================================
#[tokio::test]
async fn test_poll_unknown_session_returns_404() {
    let app = make_app(10).await;
    let uri = format!("/sessions/{}/poll", Uuid::new_v4());
    let response = app.oneshot(get(&uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
}

// ===========================================================================
// TEST 6: create then poll through the router promotes the session
// ===========================================================================
#[tokio::test]
async fn test_create_then_poll_roundtrip() {
    let app = make_app(10).await;

    let response = app
        .clone()
        .oneshot(post_json("/sessions", json!({"user_id": "user-1"})))
        .await
        .unwrap();
    let created = body_json(response).await;
    let id = created["session_id"].as_str().unwrap();

    let response = app
        .oneshot(get(&format!("/sessions/{id}/poll")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["session_id"], created["session_id"]);
    assert_eq!(body["status"], "active");
}

// ===========================================================================
// TEST 7: GET /status reflects the roster and current queue
// ===========================================================================
#[tokio::test]
async fn test_status_endpoint() {
    let app = make_app(10).await;

    app.clone()
        .oneshot(post_json("/sessions", json!({})))
        .await
        .unwrap();

    let response = app.oneshot(get("/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["active_team"], "Day Team");
    assert_eq!(body["team_capacity"], 6);
    assert_eq!(body["queue_length"], 1);
    assert_eq!(body["is_office_hours"], true);
}
