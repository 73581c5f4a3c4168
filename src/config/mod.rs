//! Configuration management.

mod file_config;

pub use file_config::{ConfigFile, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::sources::PUBPEER_SEARCH_ENDPOINT;

/// Environment variable prefix, e.g. `PUBPEER_CHECK_CHECKER__DELAY_MS=500`
pub const ENV_PREFIX: &str = "PUBPEER_CHECK";

/// File name looked up in the working directory
pub const LOCAL_CONFIG_NAME: &str = "pubpeer-check.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Batch checker settings
    #[serde(default)]
    pub checker: CheckerConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Batch checker settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Pause before every API request, in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Search endpoint; the identifier is appended as `?q=`
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extension of input files picked up by discovery
    #[serde(default = "default_input_extension")]
    pub input_extension: String,

    /// Suffix replacing the extension on report files
    #[serde(default = "default_result_suffix")]
    pub result_suffix: String,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            input_extension: default_input_extension(),
            result_suffix: default_result_suffix(),
            user_agent: None,
        }
    }
}

impl CheckerConfig {
    /// Inter-request delay as a [`Duration`]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

fn default_delay_ms() -> u64 {
    2000
}

fn default_endpoint() -> String {
    PUBPEER_SEARCH_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_input_extension() -> String {
    ".txt".to_string()
}

fn default_result_suffix() -> String {
    " result.txt".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load configuration from a file, with environment overrides on top
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(env_source())
        .build()?
        .try_deserialize()
}

/// Get configuration from defaults and environment variables only
pub fn get_config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(env_source())
        .build()?
        .try_deserialize()
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Find a config file in the default locations
///
/// Checks `./pubpeer-check.toml` first, then
/// `<config dir>/pubpeer-check/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    default_config_paths().into_iter().find(|p| p.is_file())
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(env!("CARGO_PKG_NAME")).join("config.toml"));
    }
    paths
}
