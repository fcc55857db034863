//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides; the CLI
//! applies its own flags on top of the result.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::endpoint::{ApiBase, DEFAULT_API_URL};
use crate::session::LIFETIME_DAYS_RANGE;

/// Environment variable overriding the backend base URL
pub const ENV_API_URL: &str = "FRIENDLOG_API_URL";
/// Environment variable overriding the session token file
pub const ENV_TOKEN_FILE: &str = "FRIENDLOG_TOKEN_FILE";
/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "FRIENDLOG_LOG_LEVEL";
/// Environment variable overriding the log format
pub const ENV_LOG_FORMAT: &str = "FRIENDLOG_LOG_FORMAT";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Session persistence configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,

    #[serde(default = "default_lifetime_days")]
    pub lifetime_days: i64,
}

fn default_token_file() -> PathBuf {
    dirs::config_dir()
        .map(|p| p.join("friendlog").join("session.json"))
        .unwrap_or_else(|| PathBuf::from("./.friendlog_session.json"))
}

fn default_lifetime_days() -> i64 {
    7
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
            lifetime_days: default_lifetime_days(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that parse but cannot be used
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LIFETIME_DAYS_RANGE.contains(&self.session.lifetime_days) {
            return Err(ConfigError::Invalid {
                field: "session.lifetime_days",
                reason: format!(
                    "must be between {} and {}, got {}",
                    LIFETIME_DAYS_RANGE.start(),
                    LIFETIME_DAYS_RANGE.end(),
                    self.session.lifetime_days
                ),
            });
        }
        if self.api.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "api.request_timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment.
    ///
    /// A config file that exists but cannot be read or parsed is an error;
    /// only a missing file falls back to the defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("friendlog").join("config.toml")),
            Some(PathBuf::from("./friendlog.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first of `paths` that exists, or the environment-only config
    fn load_first(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => {
                let config = Self::load_with_env(path)?;
                tracing::debug!("Loaded config from {:?}", path);
                Ok(config)
            }
            None => {
                tracing::debug!("Using default config with environment overrides");
                Ok(Self::from_env())
            }
        }
    }

    /// The backend base URL, validated
    pub fn api_base(&self) -> Result<ApiBase, ConfigError> {
        ApiBase::parse(&self.api.url)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api.url = url;
        }
        if let Some(path) = lookup(ENV_TOKEN_FILE).filter(|v| !v.trim().is_empty()) {
            self.session.token_file = PathBuf::from(path);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid config value {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Invalid API URL {url:?}: {reason}")]
    InvalidApiUrl { url: String, reason: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Friendlog Configuration
#
# Environment variables override these settings:
# - FRIENDLOG_API_URL
# - FRIENDLOG_TOKEN_FILE
# - FRIENDLOG_LOG_LEVEL
# - FRIENDLOG_LOG_FORMAT

[api]
# Base URL of the friendlog backend (a path prefix is allowed)
url = "http://localhost:8000"

# Request timeout in seconds
request_timeout_secs = 30

[session]
# Where the login token is kept between runs
# token_file = "~/.config/friendlog/session.json"

# Days a login stays valid on this machine (1 to 3650)
lifetime_days = 7

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty or json
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.url, "http://localhost:8000");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.session.lifetime_days, 7);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_default_config_file_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.url, "http://localhost:8000");
        assert_eq!(config.session.lifetime_days, 7);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("[api]\nurl = \"https://friends.example.com/api\"\n").unwrap();
        assert_eq!(config.api.url, "https://friends.example.com/api");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.session.lifetime_days, 7);
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::parse("[api\nurl = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_API_URL, "https://api.example.com/"),
            (ENV_TOKEN_FILE, "/tmp/friendlog-token.json"),
            (ENV_LOG_LEVEL, "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.url, "https://api.example.com/");
        assert_eq!(
            config.session.token_file,
            PathBuf::from("/tmp/friendlog-token.json")
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.api_base().unwrap().as_str(), "https://api.example.com");
    }

    #[test]
    fn test_blank_env_url_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == ENV_API_URL).then(|| "  ".to_string()));
        assert_eq!(config.api.url, DEFAULT_API_URL);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("friendlog.toml");
        std::fs::write(&path, "[logging]\nformat = \"json\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_lifetime_days_bounds() {
        for days in ["0", "-3", "3651", "9223372036854775807"] {
            let err = Config::parse(&format!("[session]\nlifetime_days = {}\n", days)).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { field: "session.lifetime_days", .. }),
                "lifetime_days = {} accepted",
                days
            );
        }

        for days in [1, 3650] {
            let config = Config::parse(&format!("[session]\nlifetime_days = {}\n", days)).unwrap();
            assert_eq!(config.session.lifetime_days, days);
        }
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = Config::parse("[api]\nrequest_timeout_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "api.request_timeout_secs", .. }));
    }

    #[test]
    fn test_load_first_reports_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let broken = dir.path().join("friendlog.toml");
        std::fs::write(&broken, "[api]\nrequest_timeout_secs = \"ten\"\n").unwrap();

        let err = Config::load_first(&[missing.clone(), broken.clone()]).unwrap_err();
        match err {
            ConfigError::Parse { path, .. } => assert_eq!(path, broken),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_load_first_without_files_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_first(&[dir.path().join("missing.toml")]).unwrap();
        assert_eq!(config.session.lifetime_days, 7);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/friendlog.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
