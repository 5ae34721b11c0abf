//! Docker engine implementation using bollard

use crate::{
    ContainerDetails, ContainerEngine, ContainerId, ContainerStatus, ContainerSummary,
    CreateConfig, EngineError, ExecOutput, ImageId, NetworkInfo, NetworkSettings, PortInfo,
    Result,
};
use async_trait::async_trait;
use bollard::container::{
    Config, CreateContainerOptions, ListContainersOptions, LogsOptions, RemoveContainerOptions,
    StartContainerOptions, StopContainerOptions,
};
use bollard::exec::{CreateExecOptions, StartExecOptions, StartExecResults};
use bollard::service::{HostConfig, Mount, MountTypeEnum};
use bollard::{ClientVersion, Docker};
use futures::StreamExt;
use pkgbox_config::EngineSettings;
use std::collections::HashMap;

/// Docker-compatible engine using the bollard crate
pub struct DockerEngine {
    client: Docker,
}

impl DockerEngine {
    /// Connect to the engine described by the settings and ping it
    pub async fn connect(settings: &EngineSettings) -> Result<Self> {
        let timeout = settings.timeout_secs;
        let version_owned;
        let version: &ClientVersion = if settings.api_version == "auto" {
            bollard::API_DEFAULT_VERSION
        } else {
            version_owned = parse_api_version(&settings.api_version)?;
            &version_owned
        };

        let endpoint = settings.endpoint.as_str();
        let client = if settings.tls {
            let certs = settings.cert_path.as_ref().ok_or_else(|| {
                EngineError::Connection(
                    "TLS is enabled but no certificate path is configured".to_string(),
                )
            })?;
            Docker::connect_with_ssl(
                endpoint,
                &certs.join("key.pem"),
                &certs.join("cert.pem"),
                &certs.join("ca.pem"),
                timeout,
                version,
            )
            .map_err(|e| EngineError::Connection(e.to_string()))?
        } else if endpoint.starts_with("unix://") || endpoint.starts_with('/') {
            let path = endpoint.trim_start_matches("unix://");
            Docker::connect_with_socket(path, timeout, version)
                .map_err(|e| EngineError::Connection(e.to_string()))?
        } else if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            Docker::connect_with_http(endpoint, timeout, version)
                .map_err(|e| EngineError::Connection(e.to_string()))?
        } else {
            // Assume it's a unix socket path
            Docker::connect_with_socket(endpoint, timeout, version)
                .map_err(|e| EngineError::Connection(e.to_string()))?
        };

        // Test connection
        client
            .ping()
            .await
            .map_err(|e| EngineError::Connection(e.to_string()))?;

        Ok(Self { client })
    }

    /// Get the underlying Docker client
    pub fn client(&self) -> &Docker {
        &self.client
    }
}

/// Parse an explicit API version like "1.43"
fn parse_api_version(version: &str) -> Result<ClientVersion> {
    let mut parts = version.splitn(2, '.');
    let major = parts.next().and_then(|p| p.parse().ok());
    let minor = parts.next().and_then(|p| p.parse().ok());
    match (major, minor) {
        (Some(major_version), Some(minor_version)) => Ok(ClientVersion {
            major_version,
            minor_version,
        }),
        _ => Err(EngineError::Connection(format!(
            "Invalid API version: {}",
            version
        ))),
    }
}

#[async_trait]
impl ContainerEngine for DockerEngine {
    async fn ping(&self) -> Result<()> {
        self.client
            .ping()
            .await
            .map_err(|e| EngineError::Connection(e.to_string()))?;
        Ok(())
    }

    async fn pull(&self, image: &str) -> Result<ImageId> {
        use bollard::image::CreateImageOptions;

        let options = CreateImageOptions {
            from_image: image,
            ..Default::default()
        };

        let mut stream = self.client.create_image(Some(options), None, None);

        while let Some(result) = stream.next().await {
            match result {
                Ok(info) => {
                    if let Some(error) = info.error {
                        return Err(EngineError::ImageNotFound(error));
                    }
                    if let Some(status) = info.status {
                        tracing::debug!("{}", status);
                    }
                }
                Err(e) => return Err(EngineError::Runtime(e.to_string())),
            }
        }

        // Get the image ID
        let inspect = self
            .client
            .inspect_image(image)
            .await
            .map_err(|e| EngineError::ImageNotFound(e.to_string()))?;

        Ok(ImageId::new(inspect.id.unwrap_or_else(|| image.to_string())))
    }

    async fn create(&self, config: &CreateConfig) -> Result<ContainerId> {
        let options = config.name.as_ref().map(|name| CreateContainerOptions {
            name: name.as_str(),
            platform: None,
        });

        let mounts: Vec<Mount> = config
            .mounts
            .iter()
            .map(|m| Mount {
                target: Some(m.target.clone()),
                source: Some(m.source.clone()),
                typ: Some(MountTypeEnum::BIND),
                read_only: Some(m.read_only),
                ..Default::default()
            })
            .collect();

        let host_config = HostConfig {
            mounts: if mounts.is_empty() {
                None
            } else {
                Some(mounts)
            },
            ..Default::default()
        };

        let env: Vec<String> = config
            .env
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();

        let container_config = Config {
            image: Some(config.image.clone()),
            cmd: config.cmd.clone(),
            env: if env.is_empty() { None } else { Some(env) },
            working_dir: config.working_dir.clone(),
            host_config: Some(host_config),
            ..Default::default()
        };

        let response = self
            .client
            .create_container(options, container_config)
            .await?;

        Ok(ContainerId::new(response.id))
    }

    async fn start(&self, id: &ContainerId) -> Result<()> {
        self.client
            .start_container(&id.0, None::<StartContainerOptions<String>>)
            .await?;
        Ok(())
    }

    async fn stop(&self, id: &ContainerId, timeout: Option<u32>) -> Result<()> {
        let options = StopContainerOptions {
            t: timeout.unwrap_or(10) as i64,
        };
        self.client.stop_container(&id.0, Some(options)).await?;
        Ok(())
    }

    async fn remove(&self, id: &ContainerId, force: bool) -> Result<()> {
        let options = RemoveContainerOptions {
            force,
            ..Default::default()
        };
        self.client.remove_container(&id.0, Some(options)).await?;
        Ok(())
    }

    async fn exec(&self, id: &ContainerId, cmd: &[String]) -> Result<ExecOutput> {
        let options = CreateExecOptions {
            cmd: Some(cmd.to_vec()),
            attach_stdout: Some(true),
            attach_stderr: Some(true),
            ..Default::default()
        };

        let exec = self.client.create_exec(&id.0, options).await?;

        let start_options = StartExecOptions {
            detach: false,
            ..Default::default()
        };

        let result = self.client.start_exec(&exec.id, Some(start_options)).await?;

        let mut stdout = String::new();
        let mut stderr = String::new();

        match result {
            StartExecResults::Attached { mut output, .. } => {
                while let Some(chunk) = output.next().await {
                    match chunk {
                        Ok(bollard::container::LogOutput::StdOut { message }) => {
                            stdout.push_str(&String::from_utf8_lossy(&message));
                        }
                        Ok(bollard::container::LogOutput::StdErr { message }) => {
                            stderr.push_str(&String::from_utf8_lossy(&message));
                        }
                        Ok(_) => {}
                        Err(e) => return Err(EngineError::Exec(e.to_string())),
                    }
                }
            }
            StartExecResults::Detached => {}
        }

        // Get exit code
        let inspect = self.client.inspect_exec(&exec.id).await?;
        let exit_code = inspect.exit_code.unwrap_or(0);

        Ok(ExecOutput {
            exit_code,
            stdout,
            stderr,
        })
    }

    async fn inspect(&self, id: &ContainerId) -> Result<ContainerDetails> {
        let info = self.client.inspect_container(&id.0, None).await?;

        let state = info.state.as_ref();
        let status = state
            .and_then(|s| s.status)
            .map(|s| ContainerStatus::from(format!("{:?}", s).to_lowercase().as_str()))
            .unwrap_or(ContainerStatus::Unknown);

        let config = info.config.as_ref();

        // Parse ports
        let mut ports = Vec::new();
        if let Some(network) = &info.network_settings {
            if let Some(port_map) = &network.ports {
                for (container_port, bindings) in port_map {
                    let parts: Vec<&str> = container_port.split('/').collect();
                    let port_num: u16 = parts[0].parse().unwrap_or(0);
                    let protocol = parts.get(1).unwrap_or(&"tcp").to_string();

                    if let Some(bindings) = bindings {
                        for binding in bindings {
                            ports.push(PortInfo {
                                container_port: port_num,
                                host_port: binding.host_port.as_ref().and_then(|p| p.parse().ok()),
                                protocol: protocol.clone(),
                                host_ip: binding.host_ip.clone(),
                            });
                        }
                    } else {
                        ports.push(PortInfo {
                            container_port: port_num,
                            host_port: None,
                            protocol,
                            host_ip: None,
                        });
                    }
                }
            }
        }

        // Parse network settings
        let network_settings = info
            .network_settings
            .as_ref()
            .map(|ns| NetworkSettings {
                ip_address: ns.ip_address.clone(),
                gateway: ns.gateway.clone(),
                networks: ns
                    .networks
                    .as_ref()
                    .map(|nets| {
                        nets.iter()
                            .map(|(name, net)| {
                                (
                                    name.clone(),
                                    NetworkInfo {
                                        network_id: net.network_id.clone().unwrap_or_default(),
                                        ip_address: net.ip_address.clone(),
                                        gateway: net.gateway.clone(),
                                    },
                                )
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .unwrap_or_default();

        Ok(ContainerDetails {
            id: id.clone(),
            name: info
                .name
                .unwrap_or_default()
                .trim_start_matches('/')
                .to_string(),
            image: config.and_then(|c| c.image.clone()).unwrap_or_default(),
            image_id: info.image.unwrap_or_default(),
            status,
            created: info
                .created
                .and_then(|s| chrono::DateTime::parse_from_rfc3339(&s).ok())
                .map(|dt| dt.timestamp())
                .unwrap_or(0),
            ports,
            network_settings,
        })
    }

    async fn logs(&self, id: &ContainerId) -> Result<String> {
        let options = LogsOptions::<String> {
            follow: false,
            stdout: true,
            stderr: true,
            tail: "all".to_string(),
            ..Default::default()
        };

        let mut stream = self.client.logs(&id.0, Some(options));

        let mut text = String::new();
        while let Some(chunk) = stream.next().await {
            let output = chunk?;
            text.push_str(&String::from_utf8_lossy(&output.into_bytes()));
        }

        Ok(text)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ContainerSummary>> {
        let options = ListContainersOptions {
            all: true,
            filters: HashMap::from([("name".to_string(), vec![name.to_string()])]),
            ..Default::default()
        };

        let containers = self.client.list_containers(Some(options)).await?;

        // The engine's name filter is a substring match; require exact
        let slash_name = format!("/{}", name);
        Ok(containers
            .into_iter()
            .find(|c| {
                c.names
                    .as_ref()
                    .map(|names| names.iter().any(|n| n == &slash_name || n == name))
                    .unwrap_or(false)
            })
            .map(|c| ContainerSummary {
                id: ContainerId::new(c.id.unwrap_or_default()),
                name: name.to_string(),
                image: c.image.unwrap_or_default(),
                status: c
                    .state
                    .as_deref()
                    .map(ContainerStatus::from)
                    .unwrap_or(ContainerStatus::Unknown),
                created: c.created.unwrap_or(0),
            }))
    }
}
