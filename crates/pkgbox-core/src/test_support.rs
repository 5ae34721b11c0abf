//! Test support utilities for pkgbox-core
//!
//! Provides MockEngine and helpers for unit testing the LifecycleManager
//! without requiring a real container engine.

use async_trait::async_trait;
use pkgbox_provider::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Records which methods were called on the mock
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Ping,
    Pull { image: String },
    Create { image: String, name: Option<String> },
    Start { id: String },
    Stop { id: String },
    Remove { id: String, force: bool },
    Exec { id: String, cmd: Vec<String> },
    Inspect { id: String },
    Logs { id: String },
    FindByName { name: String },
}

/// Configurable mock container engine for testing.
///
/// Keeps a small name-keyed container table so that create/find_by_name/
/// remove behave consistently across a scenario.
pub struct MockEngine {
    pub calls: Arc<Mutex<Vec<EngineCall>>>,
    /// Containers the engine "knows", keyed by name
    pub containers: Arc<Mutex<HashMap<String, ContainerSummary>>>,
    /// Status reported by inspect
    pub inspect_status: Arc<Mutex<ContainerStatus>>,
    /// Error for inspect calls (if Some, inspect returns this error)
    pub inspect_error: Arc<Mutex<Option<EngineError>>>,
    pub pull_result: Arc<Mutex<Result<ImageId>>>,
    pub create_result: Arc<Mutex<Result<ContainerId>>>,
    pub start_result: Arc<Mutex<Result<()>>>,
    pub stop_result: Arc<Mutex<Result<()>>>,
    pub remove_result: Arc<Mutex<Result<()>>>,
    pub exec_exit_code: Arc<Mutex<i64>>,
    pub exec_stdout: Arc<Mutex<String>>,
    pub exec_stderr: Arc<Mutex<String>>,
    /// Error for exec calls (if Some, exec returns this error)
    pub exec_error: Arc<Mutex<Option<EngineError>>>,
    pub logs_result: Arc<Mutex<Result<String>>>,
}

impl MockEngine {
    /// Create a new mock engine with default success results
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            containers: Arc::new(Mutex::new(HashMap::new())),
            inspect_status: Arc::new(Mutex::new(ContainerStatus::Running)),
            inspect_error: Arc::new(Mutex::new(None)),
            pull_result: Arc::new(Mutex::new(Ok(ImageId::new("sha256:mock_image_id")))),
            create_result: Arc::new(Mutex::new(Ok(ContainerId::new("mock_container_id")))),
            start_result: Arc::new(Mutex::new(Ok(()))),
            stop_result: Arc::new(Mutex::new(Ok(()))),
            remove_result: Arc::new(Mutex::new(Ok(()))),
            exec_exit_code: Arc::new(Mutex::new(0)),
            exec_stdout: Arc::new(Mutex::new(String::new())),
            exec_stderr: Arc::new(Mutex::new(String::new())),
            exec_error: Arc::new(Mutex::new(None)),
            logs_result: Arc::new(Mutex::new(Ok(String::new()))),
        }
    }

    /// Pre-register a container the engine should already know about
    pub fn register_container(&self, name: &str, id: &str, status: ContainerStatus) {
        self.containers.lock().unwrap().insert(
            name.to_string(),
            ContainerSummary {
                id: ContainerId::new(id),
                name: name.to_string(),
                image: "mock_image:latest".to_string(),
                status,
                created: 0,
            },
        );
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().unwrap().push(call);
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper to clone a Result<T> from an Arc<Mutex<Result<T>>>
fn clone_result<T: Clone>(r: &Arc<Mutex<Result<T>>>) -> Result<T> {
    let guard = r.lock().unwrap();
    match &*guard {
        Ok(v) => Ok(v.clone()),
        Err(e) => Err(clone_engine_error(e)),
    }
}

/// Clone an EngineError (thiserror types don't implement Clone)
fn clone_engine_error(e: &EngineError) -> EngineError {
    match e {
        EngineError::Connection(s) => EngineError::Connection(s.clone()),
        EngineError::ContainerNotFound(s) => EngineError::ContainerNotFound(s.clone()),
        EngineError::ImageNotFound(s) => EngineError::ImageNotFound(s.clone()),
        EngineError::Exec(s) => EngineError::Exec(s.clone()),
        EngineError::Runtime(s) => EngineError::Runtime(s.clone()),
        EngineError::Unsupported(s) => EngineError::Unsupported(s.clone()),
        EngineError::Timeout => EngineError::Timeout,
        EngineError::Io(_) => EngineError::Runtime("IO error (cloned)".into()),
    }
}

/// Create a mock ContainerDetails
pub fn mock_container_details(id: &str, status: ContainerStatus) -> ContainerDetails {
    ContainerDetails {
        id: ContainerId::new(id),
        name: "mock_container".to_string(),
        image: "mock_image:latest".to_string(),
        image_id: "sha256:mock_image_id".to_string(),
        status,
        created: 0,
        ports: Vec::new(),
        network_settings: NetworkSettings::default(),
    }
}

#[async_trait]
impl ContainerEngine for MockEngine {
    async fn ping(&self) -> Result<()> {
        self.record(EngineCall::Ping);
        Ok(())
    }

    async fn pull(&self, image: &str) -> Result<ImageId> {
        self.record(EngineCall::Pull {
            image: image.to_string(),
        });
        clone_result(&self.pull_result)
    }

    async fn create(&self, config: &CreateConfig) -> Result<ContainerId> {
        self.record(EngineCall::Create {
            image: config.image.clone(),
            name: config.name.clone(),
        });
        let id = clone_result(&self.create_result)?;
        if let Some(name) = &config.name {
            self.containers.lock().unwrap().insert(
                name.clone(),
                ContainerSummary {
                    id: id.clone(),
                    name: name.clone(),
                    image: config.image.clone(),
                    status: ContainerStatus::Created,
                    created: 0,
                },
            );
        }
        Ok(id)
    }

    async fn start(&self, id: &ContainerId) -> Result<()> {
        self.record(EngineCall::Start { id: id.0.clone() });
        clone_result(&self.start_result)
    }

    async fn stop(&self, id: &ContainerId, _timeout: Option<u32>) -> Result<()> {
        self.record(EngineCall::Stop { id: id.0.clone() });
        clone_result(&self.stop_result)
    }

    async fn remove(&self, id: &ContainerId, force: bool) -> Result<()> {
        self.record(EngineCall::Remove {
            id: id.0.clone(),
            force,
        });
        clone_result(&self.remove_result)?;
        self.containers
            .lock()
            .unwrap()
            .retain(|_, summary| summary.id != *id);
        Ok(())
    }

    async fn exec(&self, id: &ContainerId, cmd: &[String]) -> Result<ExecOutput> {
        self.record(EngineCall::Exec {
            id: id.0.clone(),
            cmd: cmd.to_vec(),
        });
        if let Some(err) = self.exec_error.lock().unwrap().as_ref() {
            return Err(clone_engine_error(err));
        }
        Ok(ExecOutput {
            exit_code: *self.exec_exit_code.lock().unwrap(),
            stdout: self.exec_stdout.lock().unwrap().clone(),
            stderr: self.exec_stderr.lock().unwrap().clone(),
        })
    }

    async fn inspect(&self, id: &ContainerId) -> Result<ContainerDetails> {
        self.record(EngineCall::Inspect { id: id.0.clone() });
        if let Some(err) = self.inspect_error.lock().unwrap().as_ref() {
            return Err(clone_engine_error(err));
        }
        Ok(mock_container_details(
            &id.0,
            *self.inspect_status.lock().unwrap(),
        ))
    }

    async fn logs(&self, id: &ContainerId) -> Result<String> {
        self.record(EngineCall::Logs { id: id.0.clone() });
        clone_result(&self.logs_result)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ContainerSummary>> {
        self.record(EngineCall::FindByName {
            name: name.to_string(),
        });
        Ok(self.containers.lock().unwrap().get(name).cloned())
    }
}
