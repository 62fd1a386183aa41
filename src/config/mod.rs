//! Configuration handling for the application.
//!
//! Everything is read from environment variables with development
//! defaults, so the service starts with no configuration at all. The
//! `Config::from_env` method performs that loading and validates the few
//! values that need parsing.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

use crate::translator::DEFAULT_TRANSLATE_API_URL;

/// Environment variable names.
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_TRANSLATE_API_URL: &str = "TRANSLATE_API_URL";
pub const ENV_TRANSLATE_ONLINE: &str = "TRANSLATE_ONLINE";
pub const ENV_TRANSLATE_FALLBACK: &str = "TRANSLATE_FALLBACK";
pub const ENV_SUMMARIZER_API_URL: &str = "SUMMARIZER_API_URL";
pub const ENV_SUMMARIZER_API_TOKEN: &str = "SUMMARIZER_API_TOKEN";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

/// Default development values used when environment variables are absent.
const DEFAULT_DATABASE_URL: &str = "sqlite://app_data.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    database_url: String,
    bind_addr: String,
    translate_api_url: String,
    translate_online: bool,
    translate_fallback: bool,
    summarizer_api_url: Option<String>,
    summarizer_api_token: Option<String>,
    http_timeout: Duration,
    log_format: LogFormat,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_timeout_secs = match non_empty(ENV_HTTP_TIMEOUT_SECS) {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    field: ENV_HTTP_TIMEOUT_SECS,
                    reason: format!("expected a positive number of seconds, got '{raw}'"),
                })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let log_format = match non_empty(ENV_LOG_FORMAT).as_deref().map(str::to_ascii_lowercase) {
            None => LogFormat::Text,
            Some(f) if f == "text" => LogFormat::Text,
            Some(f) if f == "json" => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    field: ENV_LOG_FORMAT,
                    reason: format!("expected 'text' or 'json', got '{other}'"),
                });
            }
        };

        Ok(Self {
            database_url: non_empty(ENV_DATABASE_URL)
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            bind_addr: non_empty(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            translate_api_url: non_empty(ENV_TRANSLATE_API_URL)
                .unwrap_or_else(|| DEFAULT_TRANSLATE_API_URL.to_string()),
            translate_online: parse_flag(ENV_TRANSLATE_ONLINE, true)?,
            translate_fallback: parse_flag(ENV_TRANSLATE_FALLBACK, true)?,
            summarizer_api_url: non_empty(ENV_SUMMARIZER_API_URL),
            summarizer_api_token: non_empty(ENV_SUMMARIZER_API_TOKEN),
            http_timeout: Duration::from_secs(http_timeout_secs),
            log_format,
        })
    }

    /// SQLite connection string.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    pub fn translate_api_url(&self) -> &str {
        &self.translate_api_url
    }
    /// Whether to call the translation API at all.
    pub fn translate_online(&self) -> bool {
        self.translate_online
    }
    /// Whether to transliterate when the translation API fails.
    pub fn translate_fallback(&self) -> bool {
        self.translate_fallback
    }
    /// Summarization model endpoint; the extractive heuristic is used when unset.
    pub fn summarizer_api_url(&self) -> Option<&str> {
        self.summarizer_api_url.as_deref()
    }
    pub fn summarizer_api_token(&self) -> Option<&str> {
        self.summarizer_api_token.as_deref()
    }
    /// Timeout applied to outbound API calls.
    pub fn http_timeout(&self) -> Duration {
        self.http_timeout
    }
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Development defaults (mirrors `from_env` with no env overrides).
    pub fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            translate_api_url: DEFAULT_TRANSLATE_API_URL.to_string(),
            translate_online: true,
            translate_fallback: true,
            summarizer_api_url: None,
            summarizer_api_token: None,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            log_format: LogFormat::Text,
        }
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_flag(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = non_empty(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: key,
            reason: format!("expected a boolean, got '{raw}'"),
        }),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
