//! Client config load/save for `~/.ai-chat/config.yaml`.
//! Resolves the backend endpoints the chat session talks to.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Backend base URL used when neither the config file nor the CLI sets one.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Backend section (base_url, per-endpoint overrides, timeout_secs).
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BackendSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ask_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Full config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendSection,
}

/// Fully resolved URLs for the endpoints the client consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub ask_url: String,
    pub history_url: String,
    pub health_url: String,
}

impl Endpoints {
    /// Derive `/ask`, `/history` and `/health` from a base URL.
    pub fn from_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            ask_url: format!("{base}/ask"),
            history_url: format!("{base}/history"),
            health_url: format!("{base}/health"),
        }
    }
}

impl Config {
    /// Endpoints with per-endpoint overrides applied on top of the base URL.
    pub fn endpoints(&self) -> Endpoints {
        let base = self.backend.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let derived = Endpoints::from_base_url(base);
        Endpoints {
            ask_url: self.backend.ask_url.clone().unwrap_or(derived.ask_url),
            history_url: self
                .backend
                .history_url
                .clone()
                .unwrap_or(derived.history_url),
            health_url: self.backend.health_url.clone().unwrap_or(derived.health_url),
        }
    }

    /// Per-request timeout; `None` means requests may wait forever.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.backend.timeout_secs.map(Duration::from_secs)
    }
}

/// Returns the default config file path: `~/.ai-chat/config.yaml` (platform-specific).
pub fn default_config_path() -> Option<PathBuf> {
    let home = home_dir()?;
    Some(home.join(".ai-chat").join("config.yaml"))
}

#[cfg(unix)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

#[cfg(windows)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE").map(PathBuf::from)
}

#[cfg(not(any(unix, windows)))]
fn home_dir() -> Option<PathBuf> {
    None
}

/// Load config from a YAML file.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&contents)?)
}

/// Load `path` if it exists, otherwise fall back to built-in defaults.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        load(path)
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        Ok(Config::default())
    }
}

/// Save config to a YAML file. Creates parent directory if missing.
pub fn save(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let contents = serde_yaml::to_string(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_default_to_local_backend() {
        let endpoints = Config::default().endpoints();
        assert_eq!(endpoints.ask_url, "http://127.0.0.1:8000/ask");
        assert_eq!(endpoints.history_url, "http://127.0.0.1:8000/history");
        assert_eq!(endpoints.health_url, "http://127.0.0.1:8000/health");
    }

    #[test]
    fn overrides_win_over_base_url() {
        let mut config = Config::default();
        config.backend.base_url = Some("https://chat.example.com/api/".into());
        config.backend.history_url = Some("https://other.example.com/h".into());

        let endpoints = config.endpoints();
        assert_eq!(endpoints.ask_url, "https://chat.example.com/api/ask");
        assert_eq!(endpoints.history_url, "https://other.example.com/h");
    }

    #[test]
    fn timeout_is_unset_by_default() {
        assert_eq!(Config::default().request_timeout(), None);
    }
}
