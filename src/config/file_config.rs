//! Configuration file support for pubpeer-check.
//!
//! # Configuration File Format
//!
//! ```toml
//! [checker]
//! delay_ms = 2000
//! endpoint = "https://pubpeer.com/api/search/"
//! timeout_secs = 30
//! input_extension = ".txt"
//! result_suffix = " result.txt"
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{CheckerConfig, Config, LoggingConfig};

/// Configuration file structure
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Checker section
    #[serde(default)]
    pub checker: CheckerConfig,

    /// Logging section
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigFileError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigFileError::Parse(e.to_string()))
    }

    /// Save configuration to a TOML file
    ///
    /// Missing parent directories are created.
    pub fn save(&self, path: &Path) -> Result<(), ConfigFileError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
        }

        std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
    }
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        Self {
            checker: file.checker,
            logging: file.logging,
        }
    }
}

impl From<&Config> for ConfigFile {
    fn from(config: &Config) -> Self {
        Self {
            checker: config.checker.clone(),
            logging: config.logging.clone(),
        }
    }
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_file_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let toml_content = r#"
[checker]
delay_ms = 500
endpoint = "http://localhost:8080/api/search/"
user_agent = "lab-batch/1.0"

[logging]
level = "debug"
"#;
        std::fs::write(&path, toml_content).unwrap();

        let config = ConfigFile::load(&path).unwrap();

        assert_eq!(config.checker.delay_ms, 500);
        assert_eq!(config.checker.endpoint, "http://localhost:8080/api/search/");
        assert_eq!(config.checker.user_agent, Some("lab-batch/1.0".to_string()));
        assert_eq!(config.checker.result_suffix, " result.txt");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_config_file_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = ConfigFile::default();
        config.checker.delay_ms = 0;
        config.logging.level = "warn".to_string();

        config.save(&path).unwrap();

        let loaded: Config = ConfigFile::load(&path).unwrap().into();
        assert_eq!(loaded.checker.delay_ms, 0);
        assert_eq!(loaded.logging.level, "warn");
        assert_eq!(loaded.checker.input_extension, ".txt");
    }

    #[test]
    fn test_config_file_nonexistent() {
        let result = ConfigFile::load(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigFileError::Io(_))));
    }

    #[test]
    fn test_config_file_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.toml");

        std::fs::write(&path, "invalid = toml = content").unwrap();

        let result = ConfigFile::load(&path);
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }
}
