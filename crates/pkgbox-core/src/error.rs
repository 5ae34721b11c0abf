//! Error types for pkgbox-core
//!
//! Engine faults are wrapped into the operation-specific variants at the
//! manager boundary; the raw engine error never crosses it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] pkgbox_config::ConfigError),

    #[error("Engine initialization failed: {0}")]
    InitFailed(String),

    #[error("Container creation failed: {0}")]
    CreateFailed(String),

    #[error("Container start failed: {0}")]
    StartFailed(String),

    #[error("Container stop failed: {0}")]
    StopFailed(String),

    #[error("Container removal failed: {0}")]
    RemoveFailed(String),

    #[error("No container bound to this manager")]
    ContainerNotFound,

    #[error("Command failed with exit code {exit_code}: {message}")]
    CommandFailed { exit_code: i64, message: String },

    #[error("Command execution failed: {0}")]
    ExecFailed(String),

    #[error("No active container configuration")]
    NoActiveConfiguration,
}

pub type Result<T> = std::result::Result<T, CoreError>;
