//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$MAILCAT_CONFIG` (environment variable)
//! 2. `~/.config/mailcat/config.toml` (Linux/macOS)
//!    `%APPDATA%\mailcat\config.toml` (Windows)
//! 3. Built-in defaults
//!
//! Command-line flags always override configuration values.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::deliver::{RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
    /// Retry budget for delivery.
    pub delivery: DeliveryConfig,
    /// Default values for SMTP flags.
    pub smtp: SmtpConfig,
    /// Extra provider name → URL entries; override builtins on conflict.
    pub providers: HashMap<String, String>,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
    /// Override cache directory for logs.
    pub cache_dir: Option<PathBuf>,
}

/// Retry budget for delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Total submission attempts, first one included.
    pub max_attempts: u32,
    /// Seconds to wait between attempts.
    pub retry_delay_secs: u64,
}

/// Default values for SMTP flags, so recurring sends need fewer arguments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    /// Default `--smtp-server` (name or URL).
    pub server: Option<String>,
    /// Default `--user-account`.
    pub user_account: Option<String>,
    /// Default `--from` address.
    pub from: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            cache_dir: None,
        }
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_secs: DEFAULT_RETRY_DELAY.as_secs(),
        }
    }
}

impl DeliveryConfig {
    /// Translate into the driver's retry policy.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            retry_delay: Duration::from_secs(self.retry_delay_secs),
        }
    }
}

// ── Load ────────────────────────────────────────────────────────

/// Load configuration, searching standard locations.
///
/// Returns the default configuration if no file is found or on parse error.
pub fn load_config() -> Config {
    if let Some(path) = config_file_path() {
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<Config>(&contents) {
                    Ok(cfg) => {
                        tracing::info!(path = %path.display(), "Loaded config");
                        return cfg;
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to parse config, using defaults"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read config file, using defaults"
                    );
                }
            }
        }
    }
    Config::default()
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    // 1. Environment variable override
    if let Ok(env_path) = std::env::var("MAILCAT_CONFIG") {
        return Some(PathBuf::from(env_path));
    }

    // 2. Standard config directory
    dirs::config_dir().map(|d| d.join("mailcat").join("config.toml"))
}

/// Return the cache directory for logs.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.cache_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mailcat")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.general.log_level, "warn");
        assert_eq!(cfg.delivery.max_attempts, 3);
        assert_eq!(cfg.delivery.retry_delay_secs, 10);
        assert!(cfg.smtp.server.is_none());
        assert!(cfg.providers.is_empty());
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.general.log_level, cfg.general.log_level);
        assert_eq!(parsed.delivery.max_attempts, cfg.delivery.max_attempts);
        assert_eq!(parsed.delivery.retry_delay_secs, cfg.delivery.retry_delay_secs);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let partial = r#"
[delivery]
max_attempts = 5

[smtp]
from = "cat@example.com"

[providers]
work = "smtps://smtp.corp.example:465"
"#;
        let cfg: Config = toml::from_str(partial).expect("parse partial");
        assert_eq!(cfg.delivery.max_attempts, 5);
        assert_eq!(cfg.smtp.from.as_deref(), Some("cat@example.com"));
        assert_eq!(
            cfg.providers.get("work").map(String::as_str),
            Some("smtps://smtp.corp.example:465")
        );
        // Other fields use defaults
        assert_eq!(cfg.delivery.retry_delay_secs, 10);
        assert_eq!(cfg.general.log_level, "warn");
    }

    #[test]
    fn test_retry_policy_translation() {
        let delivery = DeliveryConfig {
            max_attempts: 2,
            retry_delay_secs: 1,
        };
        let policy = delivery.retry_policy();
        assert_eq!(policy.max_attempts, 2);
        assert_eq!(policy.retry_delay, Duration::from_secs(1));
    }
}
