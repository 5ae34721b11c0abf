//! Container lifecycle states

use pkgbox_provider::ContainerStatus;

/// Lifecycle state of the managed container.
///
/// Derived from the engine's reported status on demand, never cached
/// across operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Absent,
    Created,
    Running,
    Stopped,
    Removing,
    Failed,
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absent => write!(f, "absent"),
            Self::Created => write!(f, "created"),
            Self::Running => write!(f, "running"),
            Self::Stopped => write!(f, "stopped"),
            Self::Removing => write!(f, "removing"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl From<ContainerStatus> for LifecycleState {
    fn from(status: ContainerStatus) -> Self {
        match status {
            ContainerStatus::Created => Self::Created,
            // Paused and restarting containers are live as far as the
            // engine is concerned
            ContainerStatus::Running | ContainerStatus::Paused | ContainerStatus::Restarting => {
                Self::Running
            }
            ContainerStatus::Exited => Self::Stopped,
            ContainerStatus::Removing => Self::Removing,
            ContainerStatus::Dead | ContainerStatus::Unknown => Self::Failed,
        }
    }
}
