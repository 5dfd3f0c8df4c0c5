/**
 * Health Routes
 * Endpoints for checking backend health status
 */
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::AppState;

// Track server start time for uptime calculation
lazy_static::lazy_static! {
    static ref SERVER_START: Instant = Instant::now();
}

/// Initialize the server start time
pub fn init_start_time() {
    lazy_static::initialize(&SERVER_START);
}

/// Simple health response
#[derive(Debug, Serialize, Deserialize)]
pub struct SimpleHealthResponse {
    pub status: String,
}

/// Ready checks summary
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyChecks {
    pub content_store: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub articles: Option<usize>,
    pub active_sessions: usize,
}

/// Ready check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub uptime: u64,
    pub checks: ReadyChecks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// GET /health - Simple health ping
pub async fn health_ping() -> impl IntoResponse {
    Json(SimpleHealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /health/ready - Readiness check
pub async fn health_ready(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = SERVER_START.elapsed().as_secs();
    let active_sessions = state.sessions.len().await;

    let (status, checks, reason) = match state.store.snapshot() {
        Ok(snapshot) => (
            StatusCode::OK,
            ReadyChecks {
                content_store: "healthy".to_string(),
                articles: Some(snapshot.articles.len()),
                active_sessions,
            },
            None,
        ),
        Err(e) => {
            tracing::error!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ReadyChecks {
                    content_store: "unhealthy".to_string(),
                    articles: None,
                    active_sessions,
                },
                Some(e.to_string()),
            )
        }
    };

    let response = ReadyResponse {
        status: if status.is_success() {
            "ready".to_string()
        } else {
            "not ready".to_string()
        },
        timestamp: Utc::now(),
        uptime,
        checks,
        reason,
    };

    (status, Json(response))
}
