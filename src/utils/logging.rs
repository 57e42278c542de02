//! Logging utilities for schema_docgen
//!
//! This module provides logging setup and configuration.

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::Result;

/// Initialize logging based on configuration
pub fn init_logging(config: &Option<LoggingConfig>) -> Result<()> {
    let (level, format, stdout) = match config {
        Some(cfg) => (cfg.level.as_str(), cfg.format.as_str(), cfg.stdout),
        None => ("info", "text", true),
    };

    if !stdout {
        return Ok(());
    }

    // Parse log level
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("schema_docgen={}", level)));

    if format.to_lowercase() == "json" {
        let subscriber = fmt::Subscriber::builder()
            .json()
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| crate::error::Error::Unknown(e.to_string()))?;
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| crate::error::Error::Unknown(e.to_string()))?;
    }

    Ok(())
}
