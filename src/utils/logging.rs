// Tracing subscriber setup for the curator-risk binary
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use crate::error::{CuratorError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl LoggingSettings {
    pub fn from_env() -> Self {
        let defaults = LoggingSettings::default();
        LoggingSettings {
            level: env::var("CURATOR_LOG_LEVEL").unwrap_or(defaults.level),
            format: env::var("CURATOR_LOG_FORMAT")
                .ok()
                .and_then(|f| parse_format(&f))
                .unwrap_or(defaults.format),
        }
    }
}

fn parse_format(raw: &str) -> Option<LogFormat> {
    match raw.trim().to_lowercase().as_str() {
        "json" => Some(LogFormat::Json),
        "pretty" => Some(LogFormat::Pretty),
        "compact" => Some(LogFormat::Compact),
        _ => None,
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(settings: &LoggingSettings) -> Result<()> {
    let level = settings.level.parse::<Level>().unwrap_or(Level::INFO);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("morpho_curator_risk={},curator_risk={}", level, level).into());

    let installed = match settings.format {
        LogFormat::Json => tracing_subscriber::fmt().with_env_filter(env_filter).json().try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(env_filter).pretty().try_init(),
        LogFormat::Compact => tracing_subscriber::fmt().with_env_filter(env_filter).compact().try_init(),
    };
    installed.map_err(|e| CuratorError::Logging { message: e.to_string() })?;

    info!("Logging initialized with level: {}", level);
    Ok(())
}
