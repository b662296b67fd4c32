//! # Structured Logging Module
//!
//! Environment-aware structured logging for the discovery core. Output goes to
//! stderr so that stdout stays reserved for query results.
//!
//! The environment name comes from [`DiscoveryConfig::environment`], so
//! configuration has to be loaded before logging is initialized.
//!
//! [`DiscoveryConfig::environment`]: crate::config::DiscoveryConfig::environment

use crate::constants::env;
use chrono::Utc;
use std::process;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration.
///
/// `RUST_LOG` wins over the environment-derived level when present.
pub fn init_structured_logging(environment: &str) {
    install(environment, get_log_level(environment));
}

/// Initialize logging for the command line tool, where `-v` flags pick the
/// level and the default stays quiet.
pub fn init_cli_logging(environment: &str, verbosity: u8) {
    install(environment, cli_log_level(verbosity).to_string());
}

fn cli_log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn install(environment: &str, default_level: String) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

        let layer = if use_json_format() {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(false)
                .json()
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_filter(filter)
                .boxed()
        };

        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            // An embedding caller already installed a subscriber
            tracing::debug!("Global tracing subscriber already initialized");
        }

        tracing::debug!(
            pid = process::id(),
            environment = %environment,
            "Structured logging initialized"
        );
    });
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> String {
    match environment {
        "test" => "debug".to_string(),
        "development" => "debug".to_string(),
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

fn use_json_format() -> bool {
    std::env::var(env::LOG_FORMAT)
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Log structured data for a generation lifecycle step
pub fn log_generation_operation(
    operation: &str,
    generation_id: Option<&str>,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        generation_id = generation_id,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "GENERATION_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "ERROR"
    );
}
