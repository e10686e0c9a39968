//! Configuration module for attic.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{AtticError, Result};

/// Storage path configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Application root directory.
    #[serde(default = "default_content_root")]
    pub content_root: String,
    /// Public web root for served assets. Empty means `<content_root>/wwwroot`.
    #[serde(default)]
    pub web_root: String,
}

fn default_content_root() -> String {
    ".".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            content_root: default_content_root(),
            web_root: String::new(),
        }
    }
}

impl StorageConfig {
    /// Resolve the effective web root path.
    ///
    /// Falls back to `<content_root>/wwwroot` when `web_root` is unset.
    pub fn web_root_path(&self) -> PathBuf {
        if self.web_root.is_empty() {
            Path::new(&self.content_root).join("wwwroot")
        } else {
            PathBuf::from(&self.web_root)
        }
    }
}

/// Remote fetch configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Read timeout in seconds.
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,
    /// Total request timeout in seconds.
    #[serde(default = "default_total_timeout")]
    pub total_timeout_secs: u64,
    /// Maximum number of redirects.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    /// Maximum remote file size in bytes.
    #[serde(default = "default_max_download_size")]
    pub max_download_size_bytes: u64,
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_read_timeout() -> u64 {
    20
}

fn default_total_timeout() -> u64 {
    30
}

fn default_max_redirects() -> usize {
    5
}

fn default_max_download_size() -> u64 {
    50 * 1024 * 1024 // 50MB
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout(),
            read_timeout_secs: default_read_timeout(),
            total_timeout_secs: default_total_timeout(),
            max_redirects: default_max_redirects(),
            max_download_size_bytes: default_max_download_size(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/attic.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Storage path configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Remote fetch configuration.
    #[serde(default)]
    pub http: HttpConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(AtticError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| AtticError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `ATTIC_CONTENT_ROOT`: Override the application root
    /// - `ATTIC_WEB_ROOT`: Override the public web root
    pub fn apply_env_overrides(&mut self) {
        if let Ok(content_root) = std::env::var("ATTIC_CONTENT_ROOT") {
            if !content_root.is_empty() {
                self.storage.content_root = content_root;
            }
        }
        if let Ok(web_root) = std::env::var("ATTIC_WEB_ROOT") {
            if !web_root.is_empty() {
                self.storage.web_root = web_root;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if a timeout is zero or the redirect limit is absurd.
    pub fn validate(&self) -> Result<()> {
        if self.http.total_timeout_secs == 0 {
            return Err(AtticError::Config(
                "http.total_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.storage.content_root.is_empty() {
            return Err(AtticError::Config(
                "storage.content_root must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
