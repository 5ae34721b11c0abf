//! Error types for container engines

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to connect to container engine: {0}")]
    Connection(String),

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Image not found: {0}")]
    ImageNotFound(String),

    #[error("Exec failed: {0}")]
    Exec(String),

    #[error("Container engine error: {0}")]
    Runtime(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Timeout waiting for the engine")]
    Timeout,

    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

impl From<bollard::errors::Error> for EngineError {
    fn from(e: bollard::errors::Error) -> Self {
        match e {
            bollard::errors::Error::DockerResponseServerError {
                status_code: 404,
                message,
            } => Self::ContainerNotFound(message),
            bollard::errors::Error::RequestTimeoutError => Self::Timeout,
            other => Self::Runtime(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
