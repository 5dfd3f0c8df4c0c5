/*!
 * Logging Module
 * Subscriber setup and HTTP request logging
 */
pub mod middleware;

use std::io;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::AppConfig;

/// Default directive when neither RUST_LOG nor LOG_LEVEL narrows it
fn default_directive(level: &str) -> String {
    format!("boganto_backend={},tower_http=debug,axum=debug", level)
}

/// Initialize the logging system.
///
/// The returned guards flush the background writers when dropped.
pub fn init(config: &AppConfig) -> Vec<WorkerGuard> {
    let is_production = config.is_production();

    std::fs::create_dir_all(&config.log_dir).ok();

    // File appender for all logs
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (file_writer, file_guard) = non_blocking(file_appender);

    // Console writer
    let (console_writer, console_guard) = non_blocking(io::stdout());

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| {
        if is_production {
            "info".to_string()
        } else {
            "debug".to_string()
        }
    });

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&log_level)));

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let mut guards = vec![file_guard, console_guard];

    if is_production {
        // Errors also go to their own file
        let error_appender = rolling::daily(&config.log_dir, "error.log");
        let (error_writer, error_guard) = non_blocking(error_appender);
        guards.push(error_guard);

        let file_layer = fmt::layer()
            .json()
            .with_writer(file_writer)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        let error_layer = fmt::layer()
            .json()
            .with_writer(error_writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(tracing_subscriber::filter::LevelFilter::ERROR);

        let console_layer = fmt::layer()
            .json()
            .with_writer(console_writer)
            .with_target(false);

        subscriber
            .with(file_layer)
            .with(error_layer)
            .with(console_layer)
            .init();
    } else {
        let file_layer = fmt::layer()
            .with_writer(file_writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false);

        let console_layer = fmt::layer()
            .with_writer(console_writer)
            .with_target(true)
            .pretty();

        subscriber.with(file_layer).with(console_layer).init();
    }

    tracing::info!("Logging initialized for {} environment", config.environment);

    guards
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_targets_crate() {
        let directive = default_directive("info");
        assert!(directive.starts_with("boganto_backend=info"));
        assert!(EnvFilter::try_new(directive).is_ok());
    }
}
