//! Shiftdesk HTTP REST API
//!
//! Axum-based HTTP server exposing session intake, polling, and the status
//! board. Each endpoint has a thin axum handler that delegates to a pure
//! inner function returning `(StatusCode, serde_json::Value)`, so the
//! business responses are directly testable without axum dispatch machinery.
//!
//! Endpoints:
//! - GET  /health             — liveness check
//! - GET  /version            — server version info
//! - POST /sessions           — request a new chat session
//! - GET  /sessions/:id/poll  — customer poll (records liveness)
//! - GET  /status             — operational snapshot

use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use uuid::Uuid;

use shiftdesk_core::error::CoreError;
use shiftdesk_core::models::SessionStatus;
use shiftdesk_core::ShiftdeskConfig;

use crate::engine::Engine;

/// Shared state for all HTTP handlers
#[derive(Clone)]
pub struct HttpState {
    pub engine: Arc<Engine>,
}

/// Build the axum router with all endpoints
pub fn build_router(state: Arc<HttpState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/version", get(version_handler))
        .route("/sessions", post(create_session_handler))
        .route("/sessions/:id/poll", get(poll_session_handler))
        .route("/status", get(status_handler))
        .with_state(state)
}

/// Start the HTTP server on the configured address.
/// Gracefully shuts down when the broadcast shutdown signal fires.
pub async fn start_http_server(
    engine: Arc<Engine>,
    config: ShiftdeskConfig,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<()> {
    let addr = format!("{}:{}", config.http.host, config.http.port);
    let state = Arc::new(HttpState { engine });

    let app = build_router(state);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Shiftdesk HTTP API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!("HTTP server shutting down...");
        })
        .await?;

    Ok(())
}

// ============================================================================
// Request DTOs
// ============================================================================

#[derive(Debug, Deserialize, Default)]
pub struct CreateSessionRequest {
    pub user_id: Option<String>,
}

// ============================================================================
// Inner (directly testable) business logic functions
// ============================================================================

/// Inner health — the engine is in-process, so reachable means healthy.
pub fn health_inner() -> serde_json::Value {
    serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    })
}

/// Inner version — pure, no IO.
pub fn version_inner() -> serde_json::Value {
    serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "service": "shiftdesk",
    })
}

/// Inner session intake. A refusal is a first-class outcome and surfaces as
/// 400 with the full decision body, mirroring the refusal audit record.
pub async fn create_session_inner(
    engine: &Engine,
    req: CreateSessionRequest,
) -> (StatusCode, serde_json::Value) {
    match engine.create_session(req.user_id).await {
        Ok(response) => {
            let status = if response.status == SessionStatus::Refused {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::OK
            };
            (status, to_json(&response))
        }
        Err(e) => internal_error(e),
    }
}

/// Inner poll. Unknown ids are a 404, never retried internally.
pub async fn poll_session_inner(engine: &Engine, id: Uuid) -> (StatusCode, serde_json::Value) {
    match engine.poll_session(id).await {
        Ok(response) => (StatusCode::OK, to_json(&response)),
        Err(e @ CoreError::NotFound { .. }) => (
            StatusCode::NOT_FOUND,
            serde_json::json!({
                "error": e.to_string(),
                "status": "error",
            }),
        ),
        Err(e) => internal_error(e),
    }
}

/// Inner status snapshot.
pub async fn status_inner(engine: &Engine) -> (StatusCode, serde_json::Value) {
    match engine.status_snapshot().await {
        Ok(snapshot) => (StatusCode::OK, to_json(&snapshot)),
        Err(e) => internal_error(e),
    }
}

// ============================================================================
// Axum handler wrappers (thin — delegate to inner functions)
// ============================================================================

pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(health_inner()))
}

pub async fn version_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(version_inner()))
}

pub async fn create_session_handler(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<CreateSessionRequest>,
) -> impl IntoResponse {
    let (status, body) = create_session_inner(&state.engine, req).await;
    (status, Json(body))
}

pub async fn poll_session_handler(
    State(state): State<Arc<HttpState>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let (status, body) = poll_session_inner(&state.engine, id).await;
    (status, Json(body))
}

pub async fn status_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let (status, body) = status_inner(&state.engine).await;
    (status, Json(body))
}

// ============================================================================
// Helpers
// ============================================================================

fn to_json<T: serde::Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or_else(|_| serde_json::json!({}))
}

fn internal_error(e: CoreError) -> (StatusCode, serde_json::Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        serde_json::json!({
            "error": e.to_string(),
            "status": "error",
        }),
    )
}

// ============================================================================
// Unit Tests — call inner functions directly
// ============================================================================
