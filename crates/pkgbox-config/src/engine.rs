//! Engine connection settings
//!
//! Defaults target a local Docker socket. Persisted at
//! `~/.config/pkgbox/config.toml`; a missing file means defaults.

use crate::{ConfigError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Connection settings for the container engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Engine endpoint: a unix socket path, `unix://...` or `http(s)://...`
    pub endpoint: String,
    /// Engine API version, `"auto"` to negotiate
    pub api_version: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Use TLS for the connection
    pub tls: bool,
    /// Directory holding `key.pem`, `cert.pem` and `ca.pem` when TLS is on
    pub cert_path: Option<PathBuf>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            endpoint: default_engine_endpoint(),
            api_version: "auto".to_string(),
            timeout_secs: 120,
            tls: false,
            cert_path: None,
        }
    }
}

#[cfg(windows)]
fn default_engine_endpoint() -> String {
    "//./pipe/docker_engine".to_string()
}

#[cfg(not(windows))]
fn default_engine_endpoint() -> String {
    "/var/run/docker.sock".to_string()
}

impl EngineSettings {
    /// Load settings from the default path, falling back to defaults when
    /// no config file exists
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load settings from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Engine config not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        let settings: Self =
            toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
                path: path.clone(),
                source: e,
            })?;

        Ok(settings)
    }

    /// Save settings to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save settings to a specific path
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.clone(),
                source: e,
            })?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.clone(),
            source: e,
        })
    }

    /// Default config file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "pkgbox").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Holds the engine settings a process is currently using.
///
/// Replacement swaps the whole value; a manager reads the settings once
/// at connect time, so replacing them never affects a live connection.
#[derive(Debug, Default)]
pub struct SettingsStore {
    current: EngineSettings,
}

impl SettingsStore {
    pub fn new(settings: EngineSettings) -> Self {
        Self { current: settings }
    }

    /// Current settings
    pub fn get(&self) -> EngineSettings {
        self.current.clone()
    }

    /// Replace the settings wholesale
    pub fn replace(&mut self, settings: EngineSettings) {
        self.current = settings;
    }
}
