//! Container lifecycle manager
//!
//! Owns at most one container handle and drives it through the engine:
//! create (with same-name adoption), start, stop, execute (with
//! auto-start), remove (with courtesy stop), plus the read-only accessors
//! `status`, `info` and `logs` which degrade instead of failing.

use crate::{CoreError, LifecycleState, Result};
use pkgbox_config::{ContainerSpec, EngineSettings};
use pkgbox_provider::{
    connect_engine, ContainerDetails, ContainerEngine, ContainerId, ContainerStatus, CreateConfig,
    MountSpec,
};

/// Live binding between this process and one container in the engine
#[derive(Debug, Clone)]
pub struct ContainerHandle {
    pub id: ContainerId,
    /// Spec the container was created (or adopted) from
    pub spec: ContainerSpec,
    /// Last status observed; informational only, every state-dependent
    /// decision re-queries the engine
    pub last_status: ContainerStatus,
}

/// Main container lifecycle manager
pub struct LifecycleManager {
    engine: Box<dyn ContainerEngine>,
    handle: Option<ContainerHandle>,
}

impl LifecycleManager {
    /// Connect to the engine described by the settings.
    ///
    /// The settings are read once here; replacing them later in a
    /// [`pkgbox_config::SettingsStore`] does not affect this manager.
    pub async fn connect(settings: &EngineSettings) -> Result<Self> {
        let engine = connect_engine(settings)
            .await
            .map_err(|e| CoreError::InitFailed(e.to_string()))?;
        tracing::info!("Container engine client initialized successfully");
        Ok(Self::with_engine(engine))
    }

    /// Create a manager around an already-connected engine
    pub fn with_engine(engine: Box<dyn ContainerEngine>) -> Self {
        Self {
            engine,
            handle: None,
        }
    }

    /// Spec of the bound container, if any
    pub fn spec(&self) -> Option<&ContainerSpec> {
        self.handle.as_ref().map(|h| &h.spec)
    }

    /// Id of the bound container, if any
    pub fn container_id(&self) -> Option<&ContainerId> {
        self.handle.as_ref().map(|h| &h.id)
    }

    fn require_handle(&self) -> Result<&ContainerHandle> {
        self.handle.as_ref().ok_or(CoreError::ContainerNotFound)
    }

    /// Bind to an existing container carrying the spec's name without
    /// creating anything. Returns `None` when no such container exists
    /// (or the spec is unnamed).
    pub async fn adopt(&mut self, spec: &ContainerSpec) -> Result<Option<ContainerId>> {
        let Some(name) = spec.name.as_deref() else {
            return Ok(None);
        };

        let existing = self
            .engine
            .find_by_name(name)
            .await
            .map_err(|e| CoreError::CreateFailed(e.to_string()))?;

        Ok(match existing {
            Some(summary) => {
                tracing::warn!("Container {} already exists, adopting it", name);
                let id = summary.id.clone();
                self.handle = Some(ContainerHandle {
                    id: id.clone(),
                    spec: spec.clone(),
                    last_status: summary.status,
                });
                Some(id)
            }
            None => None,
        })
    }

    /// Create a container from a spec.
    ///
    /// Idempotent by name: when a container with the spec's name already
    /// exists in the engine, its handle is adopted and its id returned
    /// without a second pull or create.
    pub async fn create(&mut self, spec: &ContainerSpec) -> Result<ContainerId> {
        if let Some(id) = self.adopt(spec).await? {
            return Ok(id);
        }

        let image = spec.image();
        tracing::info!("Pulling image: {}", image);
        self.engine
            .pull(&image)
            .await
            .map_err(|e| CoreError::CreateFailed(e.to_string()))?;

        tracing::info!("Creating container from {}", image);
        let config = create_config(spec);
        let id = self
            .engine
            .create(&config)
            .await
            .map_err(|e| CoreError::CreateFailed(e.to_string()))?;
        tracing::info!("Container created successfully: {}", id.short());

        self.handle = Some(ContainerHandle {
            id: id.clone(),
            spec: spec.clone(),
            last_status: ContainerStatus::Created,
        });

        Ok(id)
    }

    /// Start the bound container. Already running is a no-op, not an error.
    pub async fn start(&mut self) -> Result<()> {
        let id = self.require_handle()?.id.clone();
        tracing::info!("Starting container...");

        match self.engine.inspect(&id).await {
            Ok(details) if details.status == ContainerStatus::Running => {
                tracing::info!("Container is already running");
                return Ok(());
            }
            Ok(_) => {}
            Err(e) => return Err(CoreError::StartFailed(e.to_string())),
        }

        self.engine
            .start(&id)
            .await
            .map_err(|e| CoreError::StartFailed(e.to_string()))?;
        tracing::info!("Container started successfully");
        Ok(())
    }

    /// Stop the bound container unconditionally
    pub async fn stop(&mut self) -> Result<()> {
        let id = self.require_handle()?.id.clone();
        tracing::info!("Stopping container...");

        self.engine
            .stop(&id, None)
            .await
            .map_err(|e| CoreError::StopFailed(e.to_string()))?;
        tracing::info!("Container stopped successfully");
        Ok(())
    }

    /// Run a shell command inside the bound container and return its
    /// trimmed stdout.
    ///
    /// A container that is not currently running is started first, so a
    /// sequence of commands keeps working without manual state checks.
    /// A non-zero exit raises [`CoreError::CommandFailed`] carrying the
    /// captured stderr (stdout when stderr is empty) and the exit code.
    pub async fn execute(&mut self, command: &str) -> Result<String> {
        let id = self.require_handle()?.id.clone();

        let status = self
            .engine
            .inspect(&id)
            .await
            .map_err(|e| CoreError::ExecFailed(e.to_string()))?
            .status;
        if status != ContainerStatus::Running {
            tracing::warn!("Container is {}, attempting to start...", status);
            self.engine
                .start(&id)
                .await
                .map_err(|e| CoreError::ExecFailed(e.to_string()))?;
            tracing::info!("Container started successfully");
        }

        tracing::debug!("Executing command: {}", command);
        let cmd = shell_command(command);
        let output = self
            .engine
            .exec(&id, &cmd)
            .await
            .map_err(|e| CoreError::ExecFailed(e.to_string()))?;

        if output.exit_code != 0 {
            let message = if output.stderr.is_empty() {
                output.stdout
            } else {
                output.stderr
            };
            return Err(CoreError::CommandFailed {
                exit_code: output.exit_code,
                message,
            });
        }

        let result = output.stdout.trim().to_string();
        tracing::debug!("Command output: {}", result);
        Ok(result)
    }

    /// Remove the bound container.
    ///
    /// Without `force` the live status is re-checked and a running
    /// container is stopped first; with `force` the engine removes it
    /// regardless of state. On success the manager holds no handle.
    pub async fn remove(&mut self, force: bool) -> Result<()> {
        let id = self.require_handle()?.id.clone();
        tracing::info!("Removing container: {}", id.short());

        if !force {
            let status = self
                .engine
                .inspect(&id)
                .await
                .map_err(|e| CoreError::RemoveFailed(e.to_string()))?
                .status;
            if status == ContainerStatus::Running {
                tracing::info!("Stopping container before removal...");
                self.engine
                    .stop(&id, None)
                    .await
                    .map_err(|e| CoreError::RemoveFailed(e.to_string()))?;
                tracing::info!("Container stopped successfully");
            }
        }

        self.engine
            .remove(&id, force)
            .await
            .map_err(|e| CoreError::RemoveFailed(e.to_string()))?;
        tracing::info!("Container removed successfully");

        self.handle = None;
        Ok(())
    }

    /// Current lifecycle state.
    ///
    /// Never fails: an unbound manager or an engine fault reports as
    /// `Failed`, so callers can use this in cleanup paths.
    pub async fn status(&mut self) -> LifecycleState {
        let Some(handle) = self.handle.as_mut() else {
            return LifecycleState::Failed;
        };

        match self.engine.inspect(&handle.id).await {
            Ok(details) => {
                handle.last_status = details.status;
                details.status.into()
            }
            Err(e) => {
                tracing::debug!("Status query failed: {}", e);
                LifecycleState::Failed
            }
        }
    }

    /// Detailed information about the bound container.
    ///
    /// Engine faults are logged and reported as `None` rather than raised;
    /// this accessor exists for diagnostics.
    pub async fn info(&self) -> Result<Option<ContainerDetails>> {
        let handle = self.require_handle()?;
        match self.engine.inspect(&handle.id).await {
            Ok(details) => Ok(Some(details)),
            Err(e) => {
                tracing::error!("Failed to get container info: {}", e);
                Ok(None)
            }
        }
    }

    /// Accumulated log text of the bound container.
    ///
    /// Best effort: engine faults are logged and yield empty text.
    pub async fn logs(&self) -> Result<String> {
        let handle = self.require_handle()?;
        match self.engine.logs(&handle.id).await {
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::error!("Failed to get logs: {}", e);
                Ok(String::new())
            }
        }
    }
}

/// Wrap a command line for the container's shell
fn shell_command(command: &str) -> Vec<String> {
    vec![
        "/bin/sh".to_string(),
        "-c".to_string(),
        command.to_string(),
    ]
}

/// Translate a spec into an engine create config.
///
/// The container runs an indefinite placeholder process so it stays alive
/// between execs; the spec's `command` overrides it.
fn create_config(spec: &ContainerSpec) -> CreateConfig {
    let mounts = spec
        .volumes
        .iter()
        .map(|(host, target)| MountSpec {
            source: shellexpand::tilde(host).into_owned(),
            target: target.clone(),
            read_only: false,
        })
        .collect();

    let cmd = match &spec.command {
        Some(command) => shell_command(command),
        None => vec!["sleep".to_string(), "infinity".to_string()],
    };

    CreateConfig {
        image: spec.image(),
        name: spec.name.clone(),
        cmd: Some(cmd),
        env: spec.environment.clone(),
        working_dir: spec.working_dir.clone(),
        mounts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use pkgbox_config::OsFamily;
    use pkgbox_provider::EngineError;

    fn test_manager(mock: MockEngine) -> LifecycleManager {
        LifecycleManager::with_engine(Box::new(mock))
    }

    fn named_spec(name: &str) -> ContainerSpec {
        let mut spec = ContainerSpec::new(OsFamily::Ubuntu, "22.04");
        spec.name = Some(name.to_string());
        spec
    }

    // ==================== Create ====================

    #[tokio::test]
    async fn test_create_pulls_and_creates() {
        let mock = MockEngine::new();
        let calls = mock.calls.clone();
        let mut mgr = test_manager(mock);

        let id = mgr.create(&named_spec("t1")).await.unwrap();
        assert_eq!(id.0, "mock_container_id");
        assert_eq!(mgr.container_id().unwrap().0, "mock_container_id");

        let recorded = calls.lock().unwrap();
        assert!(recorded
            .iter()
            .any(|c| matches!(c, EngineCall::Pull { image } if image == "ubuntu:22.04")));
        assert!(recorded
            .iter()
            .any(|c| matches!(c, EngineCall::Create { image, .. } if image == "ubuntu:22.04")));
    }

    #[tokio::test]
    async fn test_create_translates_spec_fields() {
        let mock = MockEngine::new();
        let calls = mock.calls.clone();
        let mut mgr = test_manager(mock);

        let mut spec = named_spec("t1");
        spec.environment
            .insert("APP_ENV".to_string(), "test".to_string());
        spec.working_dir = Some("/srv".to_string());
        mgr.create(&spec).await.unwrap();

        let recorded = calls.lock().unwrap();
        let create = recorded
            .iter()
            .find_map(|c| match c {
                EngineCall::Create { name, .. } => Some(name.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(create.as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn test_create_twice_same_name_is_idempotent() {
        let mock = MockEngine::new();
        let calls = mock.calls.clone();
        let mut mgr = test_manager(mock);

        let spec = named_spec("t1");
        let first = mgr.create(&spec).await.unwrap();
        let second = mgr.create(&spec).await.unwrap();
        assert_eq!(first, second);

        // The second create adopted the existing container: one pull, one
        // create in total
        let recorded = calls.lock().unwrap();
        let pulls = recorded
            .iter()
            .filter(|c| matches!(c, EngineCall::Pull { .. }))
            .count();
        let creates = recorded
            .iter()
            .filter(|c| matches!(c, EngineCall::Create { .. }))
            .count();
        assert_eq!(pulls, 1);
        assert_eq!(creates, 1);
    }

    #[tokio::test]
    async fn test_create_adopts_preexisting_container() {
        let mock = MockEngine::new();
        mock.register_container("t1", "preexisting_id", pkgbox_provider::ContainerStatus::Exited);
        let calls = mock.calls.clone();
        let mut mgr = test_manager(mock);

        let id = mgr.create(&named_spec("t1")).await.unwrap();
        assert_eq!(id.0, "preexisting_id");

        let recorded = calls.lock().unwrap();
        assert!(!recorded.iter().any(|c| matches!(c, EngineCall::Pull { .. })));
        assert!(!recorded
            .iter()
            .any(|c| matches!(c, EngineCall::Create { .. })));
    }

    #[tokio::test]
    async fn test_create_wraps_pull_failure() {
        let mock = MockEngine::new();
        *mock.pull_result.lock().unwrap() =
            Err(EngineError::ImageNotFound("no such image".into()));
        let mut mgr = test_manager(mock);

        let err = mgr.create(&named_spec("t1")).await.unwrap_err();
        assert!(matches!(err, CoreError::CreateFailed(_)));
        assert!(mgr.container_id().is_none());
    }

    // ==================== Start / Stop ====================

    #[tokio::test]
    async fn test_start_noop_when_already_running() {
        let mock = MockEngine::new();
        *mock.inspect_status.lock().unwrap() = pkgbox_provider::ContainerStatus::Running;
        let calls = mock.calls.clone();
        let mut mgr = test_manager(mock);

        mgr.create(&named_spec("t1")).await.unwrap();
        mgr.start().await.unwrap();

        let recorded = calls.lock().unwrap();
        assert!(!recorded.iter().any(|c| matches!(c, EngineCall::Start { .. })));
    }

    #[tokio::test]
    async fn test_start_issues_start_when_stopped() {
        let mock = MockEngine::new();
        *mock.inspect_status.lock().unwrap() = pkgbox_provider::ContainerStatus::Exited;
        let calls = mock.calls.clone();
        let mut mgr = test_manager(mock);

        mgr.create(&named_spec("t1")).await.unwrap();
        mgr.start().await.unwrap();

        let recorded = calls.lock().unwrap();
        assert!(recorded.iter().any(|c| matches!(c, EngineCall::Start { .. })));
    }

    #[tokio::test]
    async fn test_start_without_handle_fails() {
        let mut mgr = test_manager(MockEngine::new());
        let err = mgr.start().await.unwrap_err();
        assert!(matches!(err, CoreError::ContainerNotFound));
    }

    #[tokio::test]
    async fn test_stop_issues_stop() {
        let mock = MockEngine::new();
        let calls = mock.calls.clone();
        let mut mgr = test_manager(mock);

        mgr.create(&named_spec("t1")).await.unwrap();
        mgr.stop().await.unwrap();

        let recorded = calls.lock().unwrap();
        assert!(recorded.iter().any(|c| matches!(c, EngineCall::Stop { .. })));
    }

    #[tokio::test]
    async fn test_stop_wraps_engine_fault() {
        let mock = MockEngine::new();
        *mock.stop_result.lock().unwrap() = Err(EngineError::Runtime("boom".into()));
        let mut mgr = test_manager(mock);

        mgr.create(&named_spec("t1")).await.unwrap();
        let err = mgr.stop().await.unwrap_err();
        assert!(matches!(err, CoreError::StopFailed(_)));
    }

    // ==================== Execute ====================

    #[tokio::test]
    async fn test_execute_returns_trimmed_stdout() {
        let mock = MockEngine::new();
        *mock.exec_stdout.lock().unwrap() = "hi\n".to_string();
        let mut mgr = test_manager(mock);

        mgr.create(&named_spec("t1")).await.unwrap();
        let out = mgr.execute("echo hi").await.unwrap();
        assert_eq!(out, "hi");
    }

    #[tokio::test]
    async fn test_execute_autostarts_stopped_container() {
        let mock = MockEngine::new();
        *mock.inspect_status.lock().unwrap() = pkgbox_provider::ContainerStatus::Exited;
        let calls = mock.calls.clone();
        let mut mgr = test_manager(mock);

        mgr.create(&named_spec("t1")).await.unwrap();
        mgr.execute("true").await.unwrap();

        let recorded = calls.lock().unwrap();
        let starts = recorded
            .iter()
            .filter(|c| matches!(c, EngineCall::Start { .. }))
            .count();
        assert_eq!(starts, 1);

        let start_pos = recorded
            .iter()
            .position(|c| matches!(c, EngineCall::Start { .. }))
            .unwrap();
        let exec_pos = recorded
            .iter()
            .position(|c| matches!(c, EngineCall::Exec { .. }))
            .unwrap();
        assert!(start_pos < exec_pos);
    }

    #[tokio::test]
    async fn test_execute_skips_start_when_running() {
        let mock = MockEngine::new();
        let calls = mock.calls.clone();
        let mut mgr = test_manager(mock);

        mgr.create(&named_spec("t1")).await.unwrap();
        mgr.execute("true").await.unwrap();

        let recorded = calls.lock().unwrap();
        assert!(!recorded.iter().any(|c| matches!(c, EngineCall::Start { .. })));
    }

    #[tokio::test]
    async fn test_execute_runs_command_through_shell() {
        let mock = MockEngine::new();
        let calls = mock.calls.clone();
        let mut mgr = test_manager(mock);

        mgr.create(&named_spec("t1")).await.unwrap();
        mgr.execute("echo hi").await.unwrap();

        let recorded = calls.lock().unwrap();
        let cmd = recorded
            .iter()
            .find_map(|c| match c {
                EngineCall::Exec { cmd, .. } => Some(cmd.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(cmd, vec!["/bin/sh", "-c", "echo hi"]);
    }

    #[tokio::test]
    async fn test_execute_nonzero_exit_carries_stderr_and_code() {
        let mock = MockEngine::new();
        *mock.exec_exit_code.lock().unwrap() = 2;
        *mock.exec_stdout.lock().unwrap() = "partial".to_string();
        *mock.exec_stderr.lock().unwrap() = "command exploded".to_string();
        let mut mgr = test_manager(mock);

        mgr.create(&named_spec("t1")).await.unwrap();
        let err = mgr.execute("false").await.unwrap_err();
        match err {
            CoreError::CommandFailed { exit_code, message } => {
                assert_eq!(exit_code, 2);
                assert_eq!(message, "command exploded");
            }
            other => panic!("Expected CommandFailed, got: {other}"),
        }
    }

    #[tokio::test]
    async fn test_execute_nonzero_exit_falls_back_to_stdout() {
        let mock = MockEngine::new();
        *mock.exec_exit_code.lock().unwrap() = 1;
        *mock.exec_stdout.lock().unwrap() = "only stdout".to_string();
        let mut mgr = test_manager(mock);

        mgr.create(&named_spec("t1")).await.unwrap();
        let err = mgr.execute("false").await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("only stdout"), "unexpected message: {msg}");
        assert!(msg.contains('1'), "exit code missing from: {msg}");
    }

    #[tokio::test]
    async fn test_execute_without_handle_fails() {
        let mut mgr = test_manager(MockEngine::new());
        let err = mgr.execute("true").await.unwrap_err();
        assert!(matches!(err, CoreError::ContainerNotFound));
    }

    #[tokio::test]
    async fn test_execute_wraps_engine_fault() {
        let mock = MockEngine::new();
        *mock.exec_error.lock().unwrap() = Some(EngineError::Exec("socket closed".into()));
        let mut mgr = test_manager(mock);

        mgr.create(&named_spec("t1")).await.unwrap();
        let err = mgr.execute("true").await.unwrap_err();
        assert!(matches!(err, CoreError::ExecFailed(_)));
    }

    // ==================== Remove ====================

    #[tokio::test]
    async fn test_remove_stops_running_container_first() {
        let mock = MockEngine::new();
        *mock.inspect_status.lock().unwrap() = pkgbox_provider::ContainerStatus::Running;
        let calls = mock.calls.clone();
        let mut mgr = test_manager(mock);

        mgr.create(&named_spec("t1")).await.unwrap();
        mgr.remove(false).await.unwrap();

        let recorded = calls.lock().unwrap();
        let stop_pos = recorded
            .iter()
            .position(|c| matches!(c, EngineCall::Stop { .. }))
            .expect("no stop call recorded");
        let remove_pos = recorded
            .iter()
            .position(|c| matches!(c, EngineCall::Remove { .. }))
            .expect("no remove call recorded");
        assert!(stop_pos < remove_pos);
        assert!(mgr.container_id().is_none());
    }

    #[tokio::test]
    async fn test_remove_skips_stop_when_not_running() {
        let mock = MockEngine::new();
        *mock.inspect_status.lock().unwrap() = pkgbox_provider::ContainerStatus::Exited;
        let calls = mock.calls.clone();
        let mut mgr = test_manager(mock);

        mgr.create(&named_spec("t1")).await.unwrap();
        mgr.remove(false).await.unwrap();

        let recorded = calls.lock().unwrap();
        assert!(!recorded.iter().any(|c| matches!(c, EngineCall::Stop { .. })));
    }

    #[tokio::test]
    async fn test_remove_force_skips_status_check_and_stop() {
        let mock = MockEngine::new();
        *mock.inspect_status.lock().unwrap() = pkgbox_provider::ContainerStatus::Running;
        let calls = mock.calls.clone();
        let mut mgr = test_manager(mock);

        mgr.create(&named_spec("t1")).await.unwrap();
        mgr.remove(true).await.unwrap();

        let recorded = calls.lock().unwrap();
        assert!(!recorded.iter().any(|c| matches!(c, EngineCall::Stop { .. })));
        assert!(recorded
            .iter()
            .any(|c| matches!(c, EngineCall::Remove { force: true, .. })));
        assert!(mgr.container_id().is_none());
    }

    #[tokio::test]
    async fn test_remove_without_handle_fails() {
        let mut mgr = test_manager(MockEngine::new());
        let err = mgr.remove(false).await.unwrap_err();
        assert!(matches!(err, CoreError::ContainerNotFound));
    }

    #[tokio::test]
    async fn test_remove_failure_keeps_handle() {
        let mock = MockEngine::new();
        *mock.remove_result.lock().unwrap() = Err(EngineError::Runtime("in use".into()));
        let mut mgr = test_manager(mock);

        mgr.create(&named_spec("t1")).await.unwrap();
        let err = mgr.remove(true).await.unwrap_err();
        assert!(matches!(err, CoreError::RemoveFailed(_)));
        assert!(mgr.container_id().is_some());
    }

    // ==================== Read-only accessors ====================

    #[tokio::test]
    async fn test_status_without_handle_is_failed() {
        let mut mgr = test_manager(MockEngine::new());
        assert_eq!(mgr.status().await, LifecycleState::Failed);
    }

    #[tokio::test]
    async fn test_status_maps_engine_status() {
        let mock = MockEngine::new();
        *mock.inspect_status.lock().unwrap() = pkgbox_provider::ContainerStatus::Exited;
        let mut mgr = test_manager(mock);

        mgr.create(&named_spec("t1")).await.unwrap();
        assert_eq!(mgr.status().await, LifecycleState::Stopped);
    }

    #[tokio::test]
    async fn test_status_never_errors_on_engine_fault() {
        let mock = MockEngine::new();
        *mock.inspect_error.lock().unwrap() =
            Some(EngineError::Runtime("engine went away".into()));
        let mut mgr = test_manager(mock);

        mgr.create(&named_spec("t1")).await.unwrap();
        assert_eq!(mgr.status().await, LifecycleState::Failed);
    }

    #[tokio::test]
    async fn test_info_without_handle_fails() {
        let mgr = test_manager(MockEngine::new());
        let err = mgr.info().await.unwrap_err();
        assert!(matches!(err, CoreError::ContainerNotFound));
    }

    #[tokio::test]
    async fn test_info_reports_engine_fault_as_absent() {
        let mock = MockEngine::new();
        *mock.inspect_error.lock().unwrap() = Some(EngineError::Runtime("gone".into()));
        let mut mgr = test_manager(mock);

        mgr.create(&named_spec("t1")).await.unwrap();
        assert!(mgr.info().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logs_degrade_to_empty_on_fault() {
        let mock = MockEngine::new();
        *mock.logs_result.lock().unwrap() = Err(EngineError::Runtime("no log driver".into()));
        let mut mgr = test_manager(mock);

        mgr.create(&named_spec("t1")).await.unwrap();
        assert_eq!(mgr.logs().await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_logs_without_handle_fails() {
        let mgr = test_manager(MockEngine::new());
        assert!(matches!(
            mgr.logs().await.unwrap_err(),
            CoreError::ContainerNotFound
        ));
    }

    // ==================== Full scenario ====================

    #[tokio::test]
    async fn test_full_lifecycle_scenario() {
        let mock = MockEngine::new();
        *mock.exec_stdout.lock().unwrap() = "hi\n".to_string();
        let containers = mock.containers.clone();
        let mut mgr = test_manager(mock);

        let spec = named_spec("t1");
        mgr.create(&spec).await.unwrap();
        mgr.start().await.unwrap();

        let out = mgr.execute("echo hi").await.unwrap();
        assert_eq!(out, "hi");

        mgr.remove(false).await.unwrap();
        assert!(mgr.container_id().is_none());
        assert!(mgr.spec().is_none());
        assert_eq!(mgr.status().await, LifecycleState::Failed);
        assert!(containers.lock().unwrap().is_empty());
    }
}
