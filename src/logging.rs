//! # Structured Logging Module
//!
//! Environment-aware structured logging for registration and resolution
//! activity. The core only emits `tracing` events; installing a subscriber is
//! left to the embedding application or to [`init_structured_logging`].

use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration.
///
/// `RUST_LOG` wins over the environment default when set. JSON output is
/// selected with `TYPE_HANDLER_LOG_FORMAT=json`.
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = current_environment();
        let default_level = default_level_for(&environment);
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        let json = std::env::var("TYPE_HANDLER_LOG_FORMAT")
            .is_ok_and(|format| format.eq_ignore_ascii_case("json"));

        let base = fmt::layer().with_target(true).with_thread_ids(true);
        let layer = if json {
            base.json().with_filter(filter).boxed()
        } else {
            base.with_filter(filter).boxed()
        };

        // try_init: an embedding application may already own the global subscriber
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already set, keeping it");
        }

        tracing::info!(
            environment = %environment,
            default_level,
            json,
            "Type handler logging initialized"
        );
    });
}

/// `TYPE_HANDLER_ENV`, then `APP_ENV`, then `development`
fn current_environment() -> String {
    ["TYPE_HANDLER_ENV", "APP_ENV"]
        .iter()
        .find_map(|name| std::env::var(name).ok())
        .unwrap_or_else(|| "development".to_string())
}

/// Filter used when `RUST_LOG` is unset
fn default_level_for(environment: &str) -> &'static str {
    match environment {
        "production" | "staging" => "info",
        _ => "debug",
    }
}

/// Log structured data for registry operations
pub fn log_registry_operation(operation: &str, key: &str, handler: &str, status: &str) {
    tracing::info!(
        operation = %operation,
        key = %key,
        handler = %handler,
        status = %status,
        timestamp = %Utc::now().to_rfc3339(),
        "REGISTRY_OPERATION"
    );
}

/// Log structured data for a completed resolution
pub fn log_resolution(declared_type: &str, format_tag: Option<&str>, source: &str, handler: &str) {
    tracing::debug!(
        declared_type = %declared_type,
        format_tag = format_tag,
        source = %source,
        handler = %handler,
        "RESOLUTION"
    );
}
