//! Container engine trait and implementations for pkgbox
//!
//! This crate provides an abstraction over Docker-compatible container
//! engines with the operations the lifecycle manager needs.

mod docker;
mod error;
mod types;

pub use docker::DockerEngine;
pub use error::*;
pub use types::*;

use async_trait::async_trait;
use pkgbox_config::EngineSettings;

/// Trait for container engines (Docker, Podman via the compatible API)
#[async_trait]
pub trait ContainerEngine: Send + Sync {
    /// Check that the engine is reachable
    async fn ping(&self) -> Result<()>;

    /// Pull an image from a registry
    async fn pull(&self, image: &str) -> Result<ImageId>;

    /// Create a container from an image
    async fn create(&self, config: &CreateConfig) -> Result<ContainerId>;

    /// Start a container
    async fn start(&self, id: &ContainerId) -> Result<()>;

    /// Stop a container
    async fn stop(&self, id: &ContainerId, timeout: Option<u32>) -> Result<()>;

    /// Remove a container
    async fn remove(&self, id: &ContainerId, force: bool) -> Result<()>;

    /// Execute a command in a running container, capturing stdout and
    /// stderr separately
    async fn exec(&self, id: &ContainerId, cmd: &[String]) -> Result<ExecOutput>;

    /// Get detailed information about a container
    async fn inspect(&self, id: &ContainerId) -> Result<ContainerDetails>;

    /// Get accumulated container logs
    async fn logs(&self, id: &ContainerId) -> Result<String>;

    /// Find a container by exact name
    async fn find_by_name(&self, name: &str) -> Result<Option<ContainerSummary>>;
}

/// Connect to the engine described by the settings.
///
/// Fails fast: the connection is pinged before this returns.
pub async fn connect_engine(settings: &EngineSettings) -> Result<Box<dyn ContainerEngine>> {
    let engine = DockerEngine::connect(settings).await?;
    Ok(Box::new(engine))
}
