//! Structured logging infrastructure for Tailseal.
//!
//! This module provides centralized logging initialization with support
//! for structured JSON output and environment-based configuration.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Initialize the logging system with structured output.
///
/// Log level can be configured via the `RUST_LOG` environment variable.
/// If not set, defaults to `info` level.
///
/// # Example
/// ```no_run
/// use tailseal_core::logging;
///
/// logging::init().expect("failed to initialise logging");
/// tracing::info!("Document signed");
/// ```
pub fn init() -> anyhow::Result<()> {
    init_from_config(&LoggingConfig::default())
}

/// Initialize the logging system with JSON output for production environments.
///
/// This format is suitable for log aggregation systems and structured log analysis.
/// Log level can be configured via the `RUST_LOG` environment variable.
pub fn init_json() -> anyhow::Result<()> {
    init_from_config(&LoggingConfig {
        format: LogFormat::Json,
        ..LoggingConfig::default()
    })
}

/// Initialize logging from a [`LoggingConfig`].
///
/// Returns an error instead of panicking when a global subscriber is
/// already installed.
pub fn init_from_config(config: &LoggingConfig) -> anyhow::Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(&config.level));

    match config.format {
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(true))
            .try_init()?,
    }

    Ok(())
}

/// `RUST_LOG` wins over the configured default.
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
