//! Logging System
//!
//! Structured logging via the `tracing` crate. Configurable log level and
//! output format; the `SAMPLEKIT_LOG` environment variable takes precedence
//! over configured levels.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            color: default_true(),
        }
    }
}

/// Initialize the logging system.
///
/// Priority order (highest to lowest): the `SAMPLEKIT_LOG` environment
/// variable, then the passed configuration, then defaults.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), ConfigError> {
    let directive = std::env::var("SAMPLEKIT_LOG")
        .ok()
        .or_else(|| config.map(|c| c.level.clone()))
        .unwrap_or_else(default_log_level);
    let filter = EnvFilter::try_new(directive)
        .map_err(|e| ConfigError::Logging(format!("Invalid log level directive: {}", e)))?;

    let format = config
        .map(|c| c.format.clone())
        .unwrap_or_else(default_format);
    let use_color = config.map(|c| c.color).unwrap_or(true);

    let base_subscriber = Registry::default().with(filter);
    let result = if format == "json" {
        base_subscriber
            .with(fmt::layer().json().with_target(true))
            .try_init()
    } else {
        base_subscriber
            .with(fmt::layer().with_target(true).with_ansi(use_color))
            .try_init()
    };
    result.map_err(|e| ConfigError::Logging(e.to_string()))
}
