//! Configuration for the TorBox dashboard.
//!
//! TOML file + `TORBOX_*` environment layering (figment), platform path
//! resolution, and translation to `torbox_core::DashboardConfig`. The API
//! key is deliberately absent: it is entered at runtime and never stored.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use torbox_core::{DEFAULT_API_PREFIX, DEFAULT_BASE_URL, DashboardConfig};

/// Prefix for environment overrides (`TORBOX_BASE_URL`, `TORBOX_TIMEOUT_SECS`, ...).
pub const ENV_PREFIX: &str = "TORBOX_";

const APP_NAME: &str = "torbox-dash";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Service root URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Versioned path prefix, e.g. `/v1/api`.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Seconds a notification stays on screen.
    #[serde(default = "default_toast")]
    pub toast_secs: u64,

    /// Log destination. Falls back to [`default_log_file`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            timeout_secs: default_timeout(),
            toast_secs: default_toast(),
            log_file: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_api_prefix() -> String {
    DEFAULT_API_PREFIX.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_toast() -> u64 {
    5
}

impl Config {
    /// Validate and convert into the runtime configuration.
    pub fn to_dashboard_config(&self) -> Result<DashboardConfig, ConfigError> {
        let base_url: url::Url = self
            .base_url
            .trim()
            .parse()
            .map_err(|e| ConfigError::invalid("base_url", format!("{e}: {}", self.base_url)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "base_url",
                format!("expected an http(s) URL, got '{}'", self.base_url),
            ));
        }

        let api_prefix = self.api_prefix.trim();
        if !api_prefix.starts_with('/') {
            return Err(ConfigError::invalid(
                "api_prefix",
                format!("must start with '/', got '{api_prefix}'"),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("timeout_secs", "must be at least 1"));
        }
        if self.toast_secs == 0 {
            return Err(ConfigError::invalid("toast_secs", "must be at least 1"));
        }

        Ok(DashboardConfig {
            base_url,
            api_prefix: api_prefix.to_owned(),
            timeout: Duration::from_secs(self.timeout_secs),
            toast_duration: Duration::from_secs(self.toast_secs),
        })
    }

    /// Configured log file, or the platform default.
    pub fn log_file(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(default_log_file)
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("app", "torbox", APP_NAME)
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default log file: the platform data dir, or the temp dir without one.
pub fn default_log_file() -> PathBuf {
    let file = format!("{APP_NAME}.log");
    project_dirs().map_or_else(
        || std::env::temp_dir().join(&file),
        |dirs| dirs.data_local_dir().join(&file),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push(APP_NAME);
    p
}

// ── Loading ─────────────────────────────────────────────────────────

/// Layered sources: defaults, then the TOML file, then the environment.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX))
}

/// Load the config from `path` (or the platform path) plus environment.
///
/// A missing file is not an error; defaults and environment still apply.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    let config: Config = figment(&path).extract()?;
    Ok(config)
}

// ── Saving ──────────────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`, creating parent dirs.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
