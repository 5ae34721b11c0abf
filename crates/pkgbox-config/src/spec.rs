//! Container spec documents
//!
//! A spec is a small YAML document: `os_type` and `os_version` are
//! required, everything else is optional. Unknown keys are ignored on
//! read; the writer omits optional fields that are empty.

use crate::{ConfigError, OsFamily, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A validated container specification
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSpec {
    pub os_type: OsFamily,
    pub os_version: String,
    /// Container name; identity for already-exists checks
    pub name: Option<String>,
    /// Host path → container path bind mounts (read-write)
    pub volumes: HashMap<String, String>,
    /// Environment variables set in the container
    pub environment: HashMap<String, String>,
    pub working_dir: Option<String>,
    /// Override for the placeholder process the container runs
    pub command: Option<String>,
}

/// On-disk shape of a spec document.
///
/// Everything is optional here so that required-field checks produce
/// [`ConfigError::MissingField`] rather than an opaque YAML error.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct RawSpec {
    os_type: Option<String>,
    os_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    volumes: HashMap<String, String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    environment: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    working_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<String>,
}

impl ContainerSpec {
    /// Create a minimal spec for a family and version
    pub fn new(os_type: OsFamily, os_version: impl Into<String>) -> Self {
        Self {
            os_type,
            os_version: os_version.into(),
            name: None,
            volumes: HashMap::new(),
            environment: HashMap::new(),
            working_dir: None,
            command: None,
        }
    }

    /// Image reference for this spec, e.g. `ubuntu:22.04`
    pub fn image(&self) -> String {
        format!("{}:{}", self.os_type, self.os_version)
    }

    /// Parse a spec from a YAML document
    pub fn from_yaml(doc: &str) -> Result<Self> {
        let raw: RawSpec = serde_yaml::from_str(doc)?;
        Self::from_raw(raw)
    }

    /// Load a spec from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    fn from_raw(raw: RawSpec) -> Result<Self> {
        let os_type = raw.os_type.ok_or(ConfigError::MissingField("os_type"))?;
        let os_version = raw
            .os_version
            .ok_or(ConfigError::MissingField("os_version"))?;

        Ok(Self {
            os_type: os_type.parse()?,
            os_version,
            name: raw.name,
            volumes: raw.volumes,
            environment: raw.environment,
            working_dir: raw.working_dir,
            command: raw.command,
        })
    }

    /// Serialize to a YAML document, omitting empty optional fields
    pub fn to_yaml(&self) -> Result<String> {
        let raw = RawSpec {
            os_type: Some(self.os_type.to_string()),
            os_version: Some(self.os_version.clone()),
            name: self.name.clone(),
            volumes: self.volumes.clone(),
            environment: self.environment.clone(),
            working_dir: self.working_dir.clone(),
            command: self.command.clone(),
        };
        Ok(serde_yaml::to_string(&raw)?)
    }

    /// Save the spec to a YAML file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = self.to_yaml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
