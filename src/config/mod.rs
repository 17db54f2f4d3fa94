pub mod parser;
pub mod validator;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable that overrides the configured API endpoint.
pub const ENDPOINT_ENV: &str = "WAF_CONSOLE_ENDPOINT";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the WAF backend. Required: requests are never issued
    /// against an unresolved origin.
    #[serde(default)]
    pub endpoint: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Auto-refresh period for the dashboard, in seconds.
    #[serde(default = "default_refresh_seconds")]
    pub refresh_seconds: u64,
    /// Lifetime of transient alert banners, in seconds.
    #[serde(default = "default_alert_ttl_seconds")]
    pub alert_ttl_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

fn default_refresh_seconds() -> u64 {
    5
}

fn default_alert_ttl_seconds() -> u64 {
    15
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_seconds: default_refresh_seconds(),
            alert_ttl_seconds: default_alert_ttl_seconds(),
        }
    }
}

impl Config {
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        parser::parse_config(path)
    }

    /// Loads the config file when present, otherwise starts from defaults.
    /// A missing file is fine as long as the endpoint is supplied by flag or
    /// environment; validation catches the unresolved case.
    pub fn load_or_default(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            parser::parse_config(path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn validate(&self) -> Result<Vec<String>> {
        validator::validate_config(self)
    }

    /// Resolution order: explicit flag > environment > config file.
    /// Resolved once at startup; the result is injected into the gateway.
    pub fn resolve_endpoint(&self, flag: Option<&str>) -> Option<String> {
        if let Some(endpoint) = flag {
            return Some(endpoint.to_string());
        }
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                return Some(endpoint);
            }
        }
        if self.api.endpoint.trim().is_empty() {
            None
        } else {
            Some(self.api.endpoint.clone())
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds)
    }
}
