//! Common types for container engines

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Container ID wrapper
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(pub String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn short(&self) -> &str {
        if self.0.len() > 12 {
            &self.0[..12]
        } else {
            &self.0
        }
    }
}

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContainerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Image ID wrapper
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageId(pub String);

impl ImageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Container status as reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerStatus {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Exited,
    Dead,
    Unknown,
}

impl std::fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Running => write!(f, "running"),
            Self::Paused => write!(f, "paused"),
            Self::Restarting => write!(f, "restarting"),
            Self::Removing => write!(f, "removing"),
            Self::Exited => write!(f, "exited"),
            Self::Dead => write!(f, "dead"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl From<&str> for ContainerStatus {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "created" => Self::Created,
            "running" => Self::Running,
            "paused" => Self::Paused,
            "restarting" => Self::Restarting,
            "removing" => Self::Removing,
            "exited" => Self::Exited,
            "dead" => Self::Dead,
            _ => Self::Unknown,
        }
    }
}

/// Configuration for creating a container
#[derive(Debug, Clone, Default)]
pub struct CreateConfig {
    /// Image to use
    pub image: String,
    /// Container name
    pub name: Option<String>,
    /// Command to run
    pub cmd: Option<Vec<String>>,
    /// Environment variables
    pub env: HashMap<String, String>,
    /// Working directory
    pub working_dir: Option<String>,
    /// Bind mounts
    pub mounts: Vec<MountSpec>,
}

/// Bind mount configuration
#[derive(Debug, Clone)]
pub struct MountSpec {
    /// Source path on the host
    pub source: String,
    /// Target path in the container
    pub target: String,
    /// Read-only
    pub read_only: bool,
}

/// Result of an exec, with stdout and stderr captured separately
#[derive(Debug, Clone, Default)]
pub struct ExecOutput {
    pub exit_code: i64,
    pub stdout: String,
    pub stderr: String,
}

/// Basic container info for name lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerSummary {
    pub id: ContainerId,
    pub name: String,
    pub image: String,
    pub status: ContainerStatus,
    pub created: i64,
}

/// Detailed container information
#[derive(Debug, Clone)]
pub struct ContainerDetails {
    pub id: ContainerId,
    pub name: String,
    pub image: String,
    pub image_id: String,
    pub status: ContainerStatus,
    pub created: i64,
    pub ports: Vec<PortInfo>,
    pub network_settings: NetworkSettings,
}

/// Port information
#[derive(Debug, Clone)]
pub struct PortInfo {
    pub container_port: u16,
    pub host_port: Option<u16>,
    pub protocol: String,
    pub host_ip: Option<String>,
}

/// Network settings
#[derive(Debug, Clone, Default)]
pub struct NetworkSettings {
    pub ip_address: Option<String>,
    pub gateway: Option<String>,
    pub networks: HashMap<String, NetworkInfo>,
}

/// Network information
#[derive(Debug, Clone)]
pub struct NetworkInfo {
    pub network_id: String,
    pub ip_address: Option<String>,
    pub gateway: Option<String>,
}
