//! Runtime configuration, read from the environment (after `.env`).

use bcrypt::{hash, DEFAULT_COST};
use std::str::FromStr;

pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub admin_username: String,
    pub admin_email: String,
    pub admin_password_hash: String,
    /// True when neither ADMIN_PASSWORD_HASH nor ADMIN_PASSWORD was set
    pub uses_default_password: bool,
    pub session_ttl_hours: i64,
    pub login_failure_delay_ms: u64,
    pub default_page_size: u32,
    pub max_page_size: u32,
    pub log_dir: String,
}

fn env_or<T: FromStr>(key: &str, fallback: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(fallback)
}

fn env_string(key: &str, fallback: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| fallback.to_string())
}

impl Default for AppConfig {
    fn default() -> Self {
        let (admin_password_hash, uses_default_password) =
            if let Ok(hashed) = std::env::var("ADMIN_PASSWORD_HASH") {
                (hashed, false)
            } else if let Ok(plain) = std::env::var("ADMIN_PASSWORD") {
                (hash(&plain, DEFAULT_COST).unwrap_or_default(), false)
            } else {
                (
                    hash(DEFAULT_ADMIN_PASSWORD, DEFAULT_COST).unwrap_or_default(),
                    true,
                )
            };

        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(|| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ]
            });

        let max_page_size = env_or("MAX_PAGE_SIZE", 100u32).max(1);

        Self {
            environment: env_string("ENVIRONMENT", "development"),
            host: env_string("HOST", "127.0.0.1"),
            port: env_or("PORT", 8000),
            allowed_origins,
            admin_username: env_string("ADMIN_USERNAME", "admin"),
            admin_email: env_string("ADMIN_EMAIL", "admin@example.com"),
            admin_password_hash,
            uses_default_password,
            session_ttl_hours: env_or("SESSION_TTL_HOURS", 24i64).max(1),
            login_failure_delay_ms: env_or("LOGIN_FAILURE_DELAY_MS", 1000),
            default_page_size: env_or("DEFAULT_PAGE_SIZE", 10u32).clamp(1, max_page_size),
            max_page_size,
            log_dir: env_string("LOG_DIR", "logs"),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Session cookies carry `Secure` in production
    pub fn secure_cookies(&self) -> bool {
        self.is_production()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> AppConfig {
    AppConfig {
        environment: "test".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        allowed_origins: vec!["http://localhost:3000".to_string()],
        admin_username: "admin".to_string(),
        admin_email: "admin@example.com".to_string(),
        admin_password_hash: hash(DEFAULT_ADMIN_PASSWORD, 4).unwrap(),
        uses_default_password: true,
        session_ttl_hours: 24,
        login_failure_delay_ms: 0,
        default_page_size: 10,
        max_page_size: 100,
        log_dir: "logs".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_sane() {
        let config = AppConfig::default();
        assert!(!config.allowed_origins.is_empty());
        assert!(config.max_page_size >= 1);
        assert!(config.default_page_size >= 1 && config.default_page_size <= config.max_page_size);
        assert!(config.session_ttl_hours >= 1);
        assert!(!config.admin_password_hash.is_empty());
    }

    #[test]
    fn test_test_config_accepts_default_password() {
        let config = test_config();
        assert!(bcrypt::verify(DEFAULT_ADMIN_PASSWORD, &config.admin_password_hash).unwrap());
        assert!(!config.secure_cookies());
        assert_eq!(config.bind_addr(), "127.0.0.1:0");
    }
}
