//! Layered client configuration.
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. `lockwallet.toml` in the working directory, or the file given explicitly
//! 3. Environment variables such as `LOCKWALLET__API__BASE_URL`

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use url::Url;

/// Base name of the optional config file in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "lockwallet";

/// Prefix of the environment variables that override config values.
pub const ENV_PREFIX: &str = "LOCKWALLET";

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the expected shape.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// `api.base_url` is not an absolute http(s) URL.
    #[error("invalid api.base_url '{url}': {message}")]
    InvalidBaseUrl {
        /// The configured value.
        url: String,
        /// Why it was rejected.
        message: String,
    },

    /// No storage directory was configured and the platform has no data dir.
    #[error("no storage directory configured and no platform data directory found")]
    NoDataDir,
}

/// Remote API settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Root URL the API paths are appended to.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: format!("lockwallet/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiConfig {
    /// Parses and checks `base_url`.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidBaseUrl` unless the URL is absolute http or https.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            message,
        };
        let url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(format!("unsupported scheme '{other}'"))),
        }
    }

    /// The request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Where the session is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the session file; the platform data dir if unset.
    pub dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolves the storage directory.
    ///
    /// # Errors
    /// Returns `ConfigError::NoDataDir` if nothing is configured and the
    /// platform has no data directory.
    pub fn resolve_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join("lockwallet"))
                .ok_or(ConfigError::NoDataDir),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. `info` or `lockwallet_application=debug`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote API settings.
    pub api: ApiConfig,
    /// Session persistence settings.
    pub storage: StorageConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads configuration from all sources.
    ///
    /// An explicit `path` must exist; the default `lockwallet.toml` is optional.
    ///
    /// # Errors
    /// Returns an error if a source cannot be read or the result is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config: Self = Config::builder()
            .add_source(file)
            .add_source(env.prefix_separator("__").separator("__").try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.api.base_url()?;
        Ok(config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::load_with_env(Some(Path::new("missing.toml")), env(&[]));
        assert!(matches!(config, Err(ConfigError::Load(_))));

        let config = AppConfig::default();
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.api.base_url().is_ok());
    }

    #[test]
    fn test_file_then_env() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lockwallet.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"https://api.example.com\"\ntimeout_ms = 5000\n\n[logging]\nformat = \"json\"\n",
        )
        .unwrap();

        let config = AppConfig::load_with_env(
            Some(&path),
            env(&[("LOCKWALLET__API__TIMEOUT_MS", "750"), ("LOCKWALLET__STORAGE__DIR", "/tmp/lw")]),
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.timeout_ms, 750);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.storage.resolve_dir().unwrap(), PathBuf::from("/tmp/lw"));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let err = AppConfig::load_with_env(
            None,
            env(&[("LOCKWALLET__API__BASE_URL", "ftp://files.example.com")]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));

        let api = ApiConfig {
            base_url: "not a url".to_string(),
            ..ApiConfig::default()
        };
        assert!(api.base_url().is_err());
    }
}
