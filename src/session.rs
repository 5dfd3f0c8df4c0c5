/**
 * Admin Sessions
 * In-memory session table plus the extractor guarding admin routes
 */
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use chrono::{DateTime, Duration, Utc};
use rand::distr::{Alphanumeric, SampleString};
use sha2::{Digest, Sha256};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use crate::error::AppError;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "boganto_session";

/// Logged-in admin
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub username: String,
    pub login_time: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Session table keyed by the SHA-256 digest of the token. The raw token
/// only ever lives in the client's cookie.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, AdminSession>>>,
}

fn generate_token() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), 64)
}

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session and return its token. Expired sessions are evicted on
    /// every login so the table stays proportional to active admins.
    pub async fn create(&self, username: &str, ttl: Duration) -> (String, AdminSession) {
        let token = generate_token();
        let now = Utc::now();
        let session = AdminSession {
            username: username.to_string(),
            login_time: now,
            last_activity: now,
            expires_at: now + ttl,
        };

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| s.expires_at > now);
        sessions.insert(hash_token(&token), session.clone());

        (token, session)
    }

    /// Look up a live session and record activity on it.
    pub async fn touch(&self, token: &str) -> Option<AdminSession> {
        let key = hash_token(token);
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;

        let expired = match sessions.get_mut(&key) {
            Some(session) if session.expires_at > now => {
                session.last_activity = now;
                return Some(session.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            sessions.remove(&key);
        }
        None
    }

    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions
            .write()
            .await
            .remove(&hash_token(token))
            .is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Session token from the cookie, or from `Authorization: Bearer`.
/// An empty cookie (as left by logout) does not count.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string());

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|s| s.to_string())
    })
}

pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn expired_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}

/// Extractor for admin-only handlers; rejects with 401 without a live session.
pub struct RequireAdmin(pub AdminSession);

impl<S> FromRequestParts<S> for RequireAdmin
where
    SessionStore: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = SessionStore::from_ref(state);
        let token = token_from_headers(&parts.headers).ok_or(AppError::Unauthorized)?;

        match sessions.touch(&token).await {
            Some(session) => Ok(RequireAdmin(session)),
            None => {
                tracing::warn!("admin request with unknown or expired session");
                Err(AppError::Unauthorized)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn test_create_then_touch() {
        let store = SessionStore::new();
        let (token, session) = store.create("admin", Duration::hours(1)).await;
        assert_eq!(token.len(), 64);
        assert_eq!(session.username, "admin");

        let touched = store.touch(&token).await.unwrap();
        assert!(touched.last_activity >= session.last_activity);
        assert!(store.touch("not-a-token").await.is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_dropped() {
        let store = SessionStore::new();
        let (token, _) = store.create("admin", Duration::seconds(-1)).await;
        assert!(store.touch(&token).await.is_none());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_revoke() {
        let store = SessionStore::new();
        let (token, _) = store.create("admin", Duration::hours(1)).await;
        assert!(store.revoke(&token).await);
        assert!(!store.revoke(&token).await);
        assert!(store.touch(&token).await.is_none());
    }

    #[test]
    fn test_token_stored_as_digest() {
        let digest = hash_token("abc");
        assert_eq!(digest.len(), 64);
        assert_ne!(digest, "abc");
    }

    #[test]
    fn test_token_from_cookie_or_bearer() {
        let mut headers = HeaderMap::new();
        assert!(token_from_headers(&headers).is_none());

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer bearer-token"),
        );
        assert_eq!(token_from_headers(&headers).as_deref(), Some("bearer-token"));

        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; boganto_session=cookie-token"),
        );
        assert_eq!(token_from_headers(&headers).as_deref(), Some("cookie-token"));
    }

    #[test]
    fn test_empty_cookie_falls_back_to_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("boganto_session="));
        assert!(token_from_headers(&headers).is_none());

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer bearer-token"),
        );
        assert_eq!(token_from_headers(&headers).as_deref(), Some("bearer-token"));
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("tok", 3600, true);
        assert!(cookie.starts_with("boganto_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(cookie.ends_with("; Secure"));
        assert!(expired_cookie(false).contains("Max-Age=0"));
    }
}
