//! Configuration management for docqa.
//!
//! Loads configuration from ${DOCQA_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `server.base_url`.
pub const SERVER_URL_ENV: &str = "DOCQA_SERVER_URL";

/// Policy for responses that settle after the session they were issued
/// against has been replaced or reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StalePolicy {
    /// Apply every settlement to the latest state (last write wins).
    #[default]
    Apply,
    /// Discard settlements stamped with an older session epoch.
    Drop,
}

impl StalePolicy {
    pub fn display_name(&self) -> &'static str {
        match self {
            StalePolicy::Apply => "apply",
            StalePolicy::Drop => "drop",
        }
    }
}

/// Remote service connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the question-answering service.
    pub base_url: String,
    /// Request timeout in seconds (0 disables).
    pub timeout_secs: u64,
    /// Connect timeout in seconds (0 disables).
    pub connect_timeout_secs: u64,
}

impl ServerConfig {
    pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
    const DEFAULT_TIMEOUT_SECS: u64 = 120;
    const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        (self.connect_timeout_secs > 0).then(|| Duration::from_secs(self.connect_timeout_secs))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: Self::DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Session lifecycle settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    /// How to treat settlements that arrive after a newer upload or a reset.
    pub stale_responses: StalePolicy,
    /// Ignore conflicting intents while an upload runs or a reset is pending.
    pub guard_controls: bool,
}

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive (`EnvFilter` syntax).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Write logs to stderr instead of the log file.
    pub stderr: bool,
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub log: LogConfig,
}

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for docqa configuration and data directories.
    //!
    //! DOCQA_HOME resolution order:
    //! 1. DOCQA_HOME environment variable (if set)
    //! 2. ~/.config/docqa (default)
    //! 3. ./.docqa when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the docqa home directory.
    pub fn docqa_home() -> PathBuf {
        if let Ok(home) = std::env::var("DOCQA_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".docqa"),
            |h| h.join(".config").join("docqa"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        docqa_home().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        docqa_home().join("logs")
    }
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Applies `DOCQA_SERVER_URL` on top of the file values.
    pub fn apply_env_overrides(&mut self) {
        if let Some(url) = std::env::var(SERVER_URL_ENV)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
        {
            self.server.base_url = url;
        }
    }

    /// Creates a config file with the commented default template.
    ///
    /// Fails if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Serializes the effective configuration.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize config to TOML")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server.base_url, "http://localhost:8000");
        assert_eq!(config.session.stale_responses, StalePolicy::Apply);
        assert!(!config.session.guard_controls);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(
            &config_path,
            "[session]\nstale_responses = \"drop\"\n\n[server]\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.session.stale_responses, StalePolicy::Drop);
        assert_eq!(config.server.timeout_secs, 5);
        assert_eq!(config.server.base_url, ServerConfig::DEFAULT_BASE_URL);
        assert_eq!(config.server.connect_timeout_secs, 10);
    }

    #[test]
    fn test_load_rejects_unknown_stale_policy() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "[session]\nstale_responses = \"maybe\"\n").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let config: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("base_url = \"http://localhost:8000\""));
        assert!(contents.contains("# level = \"info\""));
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        assert!(Config::init(&config_path).is_err());
    }

    #[test]
    fn test_zero_timeouts_disable() {
        let server = ServerConfig {
            timeout_secs: 0,
            connect_timeout_secs: 3,
            ..ServerConfig::default()
        };
        assert_eq!(server.timeout(), None);
        assert_eq!(server.connect_timeout(), Some(Duration::from_secs(3)));
    }
}
