//! Boganto Backend - library for app logic and testing

pub mod config;
pub mod error;
pub mod listing;
pub mod logging;
pub mod routes;
pub mod session;
pub mod slug;
pub mod store;

use axum::{
    extract::FromRef,
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::session::SessionStore;
use crate::store::{ContentStore, MemoryStore};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub sessions: SessionStore,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn ContentStore>, config: AppConfig) -> Self {
        Self {
            store,
            sessions: SessionStore::new(),
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

/// Configure CORS from the configured origin allow-list.
/// Credentials are allowed so the admin session cookie travels.
pub fn configure_cors(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(true)
}

/// Create and configure the application router.
pub fn create_app(state: AppState) -> Router {
    let cors = configure_cors(&state.config);
    tracing::info!(origins = ?state.config.allowed_origins, "CORS configured");

    Router::new()
        .route("/api/blogs", get(routes::blogs::list_blogs))
        .route("/api/blogs/{id}", get(routes::blogs::get_blog_by_id))
        .route("/api/blogs/slug/{slug}", get(routes::blogs::get_blog_by_slug))
        .route("/api/categories", get(routes::categories::list_categories))
        .route("/api/banner", get(routes::banner::list_banners))
        .route(
            "/api/auth/login",
            post(routes::auth::login)
                .get(routes::auth::status)
                .delete(routes::auth::logout),
        )
        .route(
            "/api/admin/blogs",
            post(routes::admin::create_blog)
                .put(routes::admin::update_blog)
                .delete(routes::admin::delete_blog_by_query),
        )
        .route(
            "/api/admin/blogs/{id}",
            delete(routes::admin::delete_blog_by_path),
        )
        .route("/health", get(routes::health::health_ping))
        .route("/health/ready", get(routes::health::health_ready))
        .fallback(routes::not_found)
        .with_state(state)
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        // Global 2 MB request body cap
        .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024))
        .layer(cors)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down backend server...");
}

/// Run the server (used by main).
pub async fn run() {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    // Guards MUST be held for the programme's lifetime; dropping them early
    // shuts down background log-writer threads and loses buffered log lines.
    let _log_guards = logging::init(&config);

    routes::health::init_start_time();

    if config.is_production() && config.uses_default_password {
        tracing::warn!(
            "SECURITY: Neither ADMIN_PASSWORD_HASH nor ADMIN_PASSWORD is set. \
             The fallback default password is insecure. \
             Set ADMIN_PASSWORD_HASH to a bcrypt hash of a strong password."
        );
    }

    let store = MemoryStore::with_fixture();
    let addr: SocketAddr = config
        .bind_addr()
        .parse()
        .expect("Invalid HOST/PORT configuration");
    let app = create_app(AppState::new(Arc::new(store), config));

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server closed");
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    AppState::new(Arc::new(MemoryStore::with_fixture()), config::test_config())
}
