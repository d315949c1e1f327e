mod commands;
mod project;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use silcrow_vite::ViteConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scv")]
#[command(version, about = "silcrow-vite CLI - Vite front-ends for Axum apps", long_about = None)]
struct Cli {
    /// Configuration file holding the [vite] table
    #[arg(short, long, global = true, default_value = "silcrow.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a Vite project in the configured root
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Install front-end dependencies
    Install {
        /// Packages to add (all of package.json when empty)
        packages: Vec<String>,
    },

    /// Build production bundles into <root>/dist/assets
    Build,

    /// Start the Vite dev server
    Dev,

    /// Show the bundles and tags production pages would get
    Check,

    /// Serve a preview page with the extension attached
    Serve {
        /// Port to run the server on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Asset host: a hostname, or `any` to mirror each request's host
        #[arg(long)]
        asset_host: Option<String>,

        /// Link production bundles even in debug builds
        #[arg(long)]
        production: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    let config = ViteConfig::load(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    // Execute command
    match cli.command {
        Commands::Init { force } => {
            commands::init::execute(&config, force)?;
        }
        Commands::Install { packages } => {
            commands::npm::install(&config, &packages)?;
        }
        Commands::Build => {
            commands::npm::build(&config)?;
        }
        Commands::Dev => {
            commands::npm::dev(&config)?;
        }
        Commands::Check => {
            commands::check::execute(&config)?;
        }
        Commands::Serve {
            port,
            asset_host,
            production,
        } => {
            commands::serve::execute(config, port, asset_host.as_deref(), production)?;
        }
    }

    Ok(())
}
