//! Logging configuration and initialization.
//!
//! Structured logging via `tracing` for every component; never `println!`.
//! Embedding applications call [`init_logging`] once at startup; the library
//! itself only emits events.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Output format for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON lines, for log aggregation.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is not set (e.g. `info`,
    /// `msd=debug`).
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: LogFormat::Text }
    }
}

impl LogConfig {
    /// Reads `MSD_LOG_LEVEL` and `MSD_LOG_FORMAT`, falling back to defaults.
    pub fn from_env() -> Self {
        let level = std::env::var("MSD_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let format = match std::env::var("MSD_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };
        Self { level, format }
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured level. Fails when a subscriber is
/// already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|error| anyhow::anyhow!(error))?,
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
            .map_err(|error| anyhow::anyhow!(error))?,
    }
    Ok(())
}
