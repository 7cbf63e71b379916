//! Command line interface
//!
//! | Command | Description |
//! |---------|-------------|
//! | `innsync reindex` | Consume change events and keep the search index in sync until Ctrl-C |
//! | `innsync check-config` | Print the effective configuration as TOML |

use clap::{Parser, Subcommand};
use innsync_infrastructure::config::loader::to_toml;
use innsync_infrastructure::{AppConfig, AppContext, ConfigLoader, init_logging};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Command line interface for innsync
#[derive(Parser, Debug)]
#[command(name = "innsync")]
#[command(about = "Tiered hotel and account storage with search reindexing")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the reindexer consumer until interrupted
    Reindex,
    /// Load, validate and print the effective configuration
    CheckConfig,
}

impl Cli {
    /// Load the configuration named by `--config`, or discover one
    pub fn load_config(&self) -> innsync_domain::Result<AppConfig> {
        let loader = match &self.config {
            Some(path) => ConfigLoader::new().with_config_path(path),
            None => ConfigLoader::new(),
        };
        loader.load()
    }
}

/// Execute a parsed command line
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.load_config()?;

    match cli.command {
        Command::CheckConfig => {
            print!("{}", to_toml(&config)?);
        }
        Command::Reindex => {
            init_logging(&config.logging)?;
            let ctx = AppContext::build(config).await?;
            let shutdown = shutdown_on_ctrl_c();
            info!("reindexer started");
            ctx.run_reindexer(shutdown).await?;
            info!("reindexer stopped");
        }
    }
    Ok(())
}

fn shutdown_on_ctrl_c() -> CancellationToken {
    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("interrupt received, shutting down"),
            Err(e) => warn!(error = %e, "cannot listen for interrupts, shutting down"),
        }
        trigger.cancel();
    });
    shutdown
}
