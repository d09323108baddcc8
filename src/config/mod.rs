//! Configuration management.
//!
//! Supports configuration from:
//! - TOML config files
//! - Environment variables
//! - CLI arguments (for the `compass` binary)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codec::DEFAULT_MAX_OUTPUT;
use crate::error::{CompassError, Result};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Codec configuration
    #[serde(default)]
    pub codec: CodecConfig,

    /// Social service configuration
    #[serde(default)]
    pub social: SocialConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| CompassError::Config(format!("Failed to read config file: {e}")))?;

        Ok(toml::from_str(&content)?)
    }

    /// Default config file location (`<config_dir>/compass/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("compass").join("config.toml"))
    }

    /// Load the config file at `path` (or the default location) if it exists,
    /// then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|p| p.exists()),
        };

        let base = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.apply_env())
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::default().apply_env()
    }

    fn apply_env(mut self) -> Self {
        // Codec settings
        if let Ok(val) = std::env::var("COMPASS_EAGER_INIT") {
            if let Ok(val) = val.parse() {
                self.codec.eager_init = val;
            }
        }
        if let Ok(val) = std::env::var("COMPASS_MAX_OUTPUT_BYTES") {
            if let Ok(val) = val.parse() {
                self.codec.max_output_bytes = val;
            }
        }

        // Social settings
        if let Ok(endpoint) = std::env::var("COMPASS_SOCIAL_ENDPOINT") {
            self.social.endpoint = endpoint;
        }
        if let Ok(val) = std::env::var("COMPASS_SOCIAL_TIMEOUT_SECS") {
            if let Ok(val) = val.parse() {
                self.social.timeout_secs = val;
            }
        }

        // Logging settings
        if let Ok(level) = std::env::var("COMPASS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(val) = std::env::var("COMPASS_LOG_JSON") {
            if let Ok(val) = val.parse() {
                self.logging.json = val;
            }
        }

        self
    }
}

/// Codec configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Start loading the backend as soon as the compressor is built
    pub eager_init: bool,

    /// Maximum decompressed size in bytes. Compression input is not limited.
    pub max_output_bytes: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            eager_init: true,
            max_output_bytes: DEFAULT_MAX_OUTPUT,
        }
    }
}

/// Social service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    /// Base URL of the remote procedure endpoint
    pub endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Page size used for offsets when only a page number is given
    pub default_page_size: u32,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:3210/trpc/lambda".to_string(),
            timeout_secs: 30,
            default_page_size: 10,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.codec.eager_init);
        assert_eq!(config.codec.max_output_bytes, 16 * 1024 * 1024);
        assert_eq!(config.social.default_page_size, 10);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            [codec]
            eager_init = false

            [social]
            endpoint = "https://market.example.com/trpc"
            timeout_secs = 5

            [logging]
            json = true
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.codec.eager_init);
        assert_eq!(config.codec.max_output_bytes, DEFAULT_MAX_OUTPUT);
        assert_eq!(config.social.endpoint, "https://market.example.com/trpc");
        assert_eq!(config.social.timeout_secs, 5);
        assert_eq!(config.social.default_page_size, 10);
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[codec]\nmax_output_bytes = 1024").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.codec.max_output_bytes, 1024);
    }

    #[test]
    fn test_config_from_missing_file() {
        let err = Config::from_file("/nonexistent/compass.toml").unwrap_err();
        assert!(matches!(err, CompassError::Config(_)));
    }

    #[test]
    fn test_config_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[codec\nmax_output_bytes = ").unwrap();

        assert!(matches!(
            Config::from_file(file.path()),
            Err(CompassError::Config(ref m)) if m.starts_with("Failed to parse config")
        ));
    }
}
