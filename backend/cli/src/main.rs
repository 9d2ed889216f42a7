mod bootstrap;
mod check_cmd;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, error, info, warn};

use mimic_channels::{ChannelAdapter, DiscordAdapter};
use mimic_config::{config_dir, config_file_path, load_and_prepare, PreparedConfig};
use mimic_logging::{init_logger, redact_sensitive_data};

#[derive(Parser)]
#[command(name = "mimic")]
#[command(about = "Mimic: a chat bot that learns per-guild replies")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and start handling commands
    Serve {
        /// Path to the YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate the config file and print the effective settings
    CheckConfig {
        /// Path to the YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn resolve_config_path(path: Option<PathBuf>) -> PathBuf {
    path.unwrap_or_else(|| config_file_path(&config_dir()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(resolve_config_path(config)).await,
        Commands::CheckConfig { config } => check_cmd::run(&resolve_config_path(config)).await,
    }
}

async fn serve(path: PathBuf) -> Result<()> {
    let PreparedConfig { config, report } = load_and_prepare(&path).await?;
    init_logger(config.log_dir(), config.log_level())?;

    for w in &report.warnings {
        warn!(path = %w.path, message = %w.message, "Config warning");
    }
    for e in &report.errors {
        error!(path = %e.path, message = %e.message, "Config error");
    }
    if !report.is_valid() {
        bail!("invalid config at {}", path.display());
    }

    info!(
        config = %path.display(),
        db = %config.db_path(),
        prefix = %config.prefix(),
        "Starting Mimic"
    );
    debug!(config = %bootstrap::effective_config(&config)?, "Effective config");

    let store = bootstrap::open_store(&config)?;
    let dispatcher = Arc::new(bootstrap::build_dispatcher(&config, store)?);

    let Some(token) = config.discord_token() else {
        bail!("no Discord token configured");
    };
    let adapter = DiscordAdapter::new(token.to_string(), dispatcher);

    info!(adapter = adapter.name(), "Channel adapter registered");
    if let Err(e) = adapter.start().await {
        let message = redact_sensitive_data(&e.to_string());
        error!(adapter = adapter.name(), error = %message, "Adapter stopped");
        bail!("{} adapter failed: {}", adapter.name(), message);
    }

    Ok(())
}
