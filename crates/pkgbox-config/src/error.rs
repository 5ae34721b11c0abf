//! Error types for configuration parsing

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field `{0}`")]
    MissingField(&'static str),

    #[error("Unsupported OS type: {0}")]
    UnsupportedOs(String),

    #[error("Invalid spec document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to read config file at {}: {source}", .path.display())]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file at {}: {source}", .path.display())]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config at {}: {source}", .path.display())]
    TomlParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to determine config directory")]
    NoConfigDir,

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
