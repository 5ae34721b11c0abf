//! pkgbox - single-container provisioning with uniform package management

mod commands;

use clap::{Parser, Subcommand};
use pkgbox_config::{ContainerSpec, EngineSettings};
use pkgbox_core::LifecycleManager;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "pkgbox")]
#[command(author, version, about = "Single-container provisioning with uniform package management", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Container spec file
    #[arg(short = 'f', long = "file", global = true, default_value = "pkgbox.yaml")]
    spec: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the container (adopts an existing one with the same name)
    Create,

    /// Create and start the container
    Up,

    /// Start the container
    Start,

    /// Stop the container
    Stop,

    /// Run a command inside the container
    Exec {
        /// Command to run
        #[arg(trailing_var_arg = true, required = true)]
        cmd: Vec<String>,
    },

    /// Remove the container
    Rm {
        /// Force removal even if running
        #[arg(short, long)]
        force: bool,
    },

    /// Show the container's lifecycle state
    Status,

    /// Show container details
    Info,

    /// Show container logs
    Logs,

    /// Package operations inside the container
    Pkg {
        #[command(subcommand)]
        op: PkgCommand,
    },

    /// Show engine connection settings
    Config,
}

#[derive(Subcommand)]
enum PkgCommand {
    /// Refresh the package index
    Update,
    /// Install a package
    Install { package: String },
    /// Remove a package
    Remove { package: String },
    /// Search the package index
    Search { query: String },
    /// List installed packages
    List,
    /// Clean the package cache
    Clean,
    /// Install the package manager's bootstrap packages
    Bootstrap,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let settings = EngineSettings::load().unwrap_or_default();

    // Config inspection needs neither a spec nor an engine
    if let Commands::Config = cli.command {
        commands::config(&settings)?;
        return Ok(());
    }

    // Validate the spec before touching the engine
    let spec = ContainerSpec::from_file(&cli.spec)?;

    let mut manager = LifecycleManager::connect(&settings).await?;

    match cli.command {
        Commands::Create => commands::create(&mut manager, &spec).await?,
        Commands::Up => commands::up(&mut manager, &spec).await?,
        Commands::Start => commands::start(&mut manager, &spec).await?,
        Commands::Stop => commands::stop(&mut manager, &spec).await?,
        Commands::Exec { cmd } => commands::exec(&mut manager, &spec, cmd).await?,
        Commands::Rm { force } => commands::remove(&mut manager, &spec, force).await?,
        Commands::Status => commands::status(&mut manager, &spec).await?,
        Commands::Info => commands::info(&mut manager, &spec).await?,
        Commands::Logs => commands::logs(&mut manager, &spec).await?,
        Commands::Pkg { op } => commands::pkg(&mut manager, &spec, op).await?,
        Commands::Config => unreachable!(), // Handled above
    }

    Ok(())
}
