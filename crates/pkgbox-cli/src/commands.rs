//! CLI command implementations

use crate::PkgCommand;
use anyhow::{bail, Result};
use pkgbox_config::{ContainerSpec, EngineSettings};
use pkgbox_core::{LifecycleManager, LifecycleState};

/// Bind the manager to the container this spec names.
///
/// Lifecycle commands other than `create`/`up` operate on a container
/// that already exists in the engine; adoption is how a fresh CLI process
/// reattaches to it.
async fn bind(manager: &mut LifecycleManager, spec: &ContainerSpec) -> Result<()> {
    if manager.adopt(spec).await?.is_some() {
        return Ok(());
    }
    match &spec.name {
        Some(name) => bail!(
            "Container '{}' not found in the engine; run `pkgbox up` first",
            name
        ),
        None => bail!("Spec has no `name`; only named containers can be reattached to"),
    }
}

pub async fn create(manager: &mut LifecycleManager, spec: &ContainerSpec) -> Result<()> {
    let id = manager.create(spec).await?;
    println!("Created container {}", id.short());
    Ok(())
}

pub async fn up(manager: &mut LifecycleManager, spec: &ContainerSpec) -> Result<()> {
    let id = manager.create(spec).await?;
    manager.start().await?;
    println!("Container {} is up", id.short());
    Ok(())
}

pub async fn start(manager: &mut LifecycleManager, spec: &ContainerSpec) -> Result<()> {
    bind(manager, spec).await?;
    manager.start().await?;
    println!("Started");
    Ok(())
}

pub async fn stop(manager: &mut LifecycleManager, spec: &ContainerSpec) -> Result<()> {
    bind(manager, spec).await?;
    manager.stop().await?;
    println!("Stopped");
    Ok(())
}

pub async fn exec(
    manager: &mut LifecycleManager,
    spec: &ContainerSpec,
    cmd: Vec<String>,
) -> Result<()> {
    bind(manager, spec).await?;
    let command = shell_words::join(&cmd);
    let output = manager.execute(&command).await?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

pub async fn remove(
    manager: &mut LifecycleManager,
    spec: &ContainerSpec,
    force: bool,
) -> Result<()> {
    bind(manager, spec).await?;
    manager.remove(force).await?;
    println!("Removed");
    Ok(())
}

pub async fn status(manager: &mut LifecycleManager, spec: &ContainerSpec) -> Result<()> {
    let state = if manager.adopt(spec).await?.is_some() {
        manager.status().await
    } else {
        LifecycleState::Absent
    };
    println!("{}", state);
    Ok(())
}

pub async fn info(manager: &mut LifecycleManager, spec: &ContainerSpec) -> Result<()> {
    bind(manager, spec).await?;
    let Some(details) = manager.info().await? else {
        println!("Container info is currently unavailable");
        return Ok(());
    };

    println!("Id:      {}", details.id);
    println!("Name:    {}", details.name);
    println!("Status:  {}", details.status);
    println!("Image:   {}", details.image);
    if let Some(created) = chrono::DateTime::from_timestamp(details.created, 0) {
        println!("Created: {}", created.to_rfc3339());
    }
    if let Some(ip) = &details.network_settings.ip_address {
        println!("IP:      {}", ip);
    }
    for port in &details.ports {
        match port.host_port {
            Some(host) => println!(
                "Port:    {}:{} -> {}/{}",
                port.host_ip.as_deref().unwrap_or("0.0.0.0"),
                host,
                port.container_port,
                port.protocol
            ),
            None => println!("Port:    {}/{}", port.container_port, port.protocol),
        }
    }
    Ok(())
}

pub async fn logs(manager: &mut LifecycleManager, spec: &ContainerSpec) -> Result<()> {
    bind(manager, spec).await?;
    let text = manager.logs().await?;
    print!("{}", text);
    Ok(())
}

pub async fn pkg(
    manager: &mut LifecycleManager,
    spec: &ContainerSpec,
    op: PkgCommand,
) -> Result<()> {
    bind(manager, spec).await?;
    let mut packages = manager.packages()?;

    let output = match op {
        PkgCommand::Update => packages.update().await?,
        PkgCommand::Install { package } => packages.install(&package).await?,
        PkgCommand::Remove { package } => packages.remove(&package).await?,
        PkgCommand::Search { query } => packages.search(&query).await?,
        PkgCommand::List => packages.list().await?,
        PkgCommand::Clean => packages.clean().await?,
        PkgCommand::Bootstrap => {
            packages.bootstrap().await?;
            String::new()
        }
    };

    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

pub fn config(settings: &EngineSettings) -> Result<()> {
    print!("{}", toml::to_string_pretty(settings)?);
    Ok(())
}
