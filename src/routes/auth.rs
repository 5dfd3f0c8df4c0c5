/**
 * Authentication Routes
 * Session-based admin login, status check and logout
 */
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use bcrypt::verify;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{expired_cookie, session_cookie, token_from_headers};
use crate::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Admin profile returned on login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginUser {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub login_time: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<LoginUser>,
    /// Session token for clients that send `Authorization: Bearer`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
    pub login_time: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

fn login_failure(status: StatusCode, message: &str) -> axum::response::Response {
    (
        status,
        Json(LoginResponse {
            success: false,
            message: message.to_string(),
            user: None,
            token: None,
        }),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(payload) = match payload {
        Ok(p) => p,
        Err(e) => {
            tracing::debug!(error = %e, "rejected login body");
            return login_failure(StatusCode::BAD_REQUEST, "Invalid request data");
        }
    };

    let username = payload.username.trim().to_string();
    if username.is_empty() || payload.password.is_empty() {
        return login_failure(StatusCode::BAD_REQUEST, "Username and password are required");
    }

    // bcrypt is intentionally CPU-intensive; keep it off the async workers.
    let password_hash = state.config.admin_password_hash.clone();
    let password = payload.password;
    let password_ok = tokio::task::spawn_blocking(move || {
        verify(&password, &password_hash).unwrap_or(false)
    })
    .await
    .unwrap_or(false);

    if username != state.config.admin_username || !password_ok {
        tracing::warn!(username = %username, "failed admin login");
        // Slow down credential guessing
        tokio::time::sleep(std::time::Duration::from_millis(
            state.config.login_failure_delay_ms,
        ))
        .await;
        return login_failure(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }

    let ttl = Duration::hours(state.config.session_ttl_hours);
    let (token, session) = state.sessions.create(&username, ttl).await;
    tracing::info!(username = %username, "admin logged in");

    let cookie = session_cookie(&token, ttl.num_seconds(), state.config.secure_cookies());
    let response = LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        user: Some(LoginUser {
            id: 1,
            name: username.clone(),
            username,
            email: state.config.admin_email.clone(),
            role: "admin".to_string(),
            login_time: session.login_time,
        }),
        token: Some(token),
    };

    (StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(response)).into_response()
}

/// GET /api/auth/login - Current session status
pub async fn status(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let session = match token_from_headers(&headers) {
        Some(token) => state.sessions.touch(&token).await,
        None => None,
    };

    let response = match session {
        Some(session) => StatusResponse {
            success: true,
            logged_in: true,
            user: Some(SessionUser {
                username: session.username,
                login_time: session.login_time,
                last_activity: session.last_activity,
            }),
            message: None,
        },
        None => StatusResponse {
            success: true,
            logged_in: false,
            user: None,
            message: Some("Not logged in".to_string()),
        },
    };

    (StatusCode::OK, Json(response))
}

/// DELETE /api/auth/login - Logout (idempotent)
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = token_from_headers(&headers) {
        if state.sessions.revoke(&token).await {
            tracing::info!("admin logged out");
        }
    }

    (
        StatusCode::OK,
        [(header::SET_COOKIE, expired_cookie(state.config.secure_cookies()))],
        Json(LogoutResponse {
            success: true,
            message: "Logout successful".to_string(),
        }),
    )
}
