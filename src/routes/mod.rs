/**
 * Routes Module
 * API route handlers
 */

pub mod admin;
pub mod auth;
pub mod banner;
pub mod blogs;
pub mod categories;
pub mod health;

use axum::{http::StatusCode, http::Uri, response::IntoResponse, Json};

use crate::error::ErrorResponse;

/// Fallback for unmatched paths
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Route not found: {}", uri.path()),
            message: None,
        }),
    )
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::{Body, Bytes};
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;

    use crate::{create_app, test_state, AppState};

    pub fn app() -> (Router, AppState) {
        let state = test_state();
        (create_app(state.clone()), state)
    }

    pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Bytes) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes)
    }

    pub async fn get_json<T: serde::de::DeserializeOwned>(
        app: &Router,
        uri: &str,
    ) -> (StatusCode, T) {
        let req = Request::get(uri).body(Body::empty()).unwrap();
        let (status, bytes) = send(app, req).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    pub fn json_request(
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: &serde_json::Value,
    ) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    /// `multipart/form-data` request as the admin panel builds it, with an
    /// optional file part given as `(field, file_name, contents)`.
    pub fn multipart_request(
        method: &str,
        uri: &str,
        token: Option<&str>,
        fields: &[(&str, &str)],
        file: Option<(&str, &str, &str)>,
    ) -> Request<Body> {
        let boundary = "boganto-form-boundary";
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                boundary, name, value
            ));
        }
        if let Some((name, file_name, contents)) = file {
            body.push_str(&format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n{}\r\n",
                boundary, name, file_name, contents
            ));
        }
        body.push_str(&format!("--{}--\r\n", boundary));

        let mut builder = Request::builder().method(method).uri(uri).header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        );
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body)).unwrap()
    }

    /// Log in with the default test credentials and return the session token.
    pub async fn login(app: &Router) -> String {
        let req = json_request(
            "POST",
            "/api/auth/login",
            None,
            &serde_json::json!({ "username": "admin", "password": "admin123" }),
        );
        let (status, bytes) = send(app, req).await;
        assert_eq!(status, StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        body["token"].as_str().unwrap().to_string()
    }
}
