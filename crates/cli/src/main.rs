//! seam CLI
//!
//! Splits documents into size-bounded chunks with page provenance, and
//! reconstructs source text from encoded chunks.

mod commands;

use clap::{Parser, Subcommand};
use commands::{InitCommand, ReconstructCommand, SplitCommand};
use seam_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// seam - recursive, provenance-preserving text splitter
#[derive(Parser, Debug)]
#[command(name = "seam")]
#[command(about = "Split documents into size-bounded, reversible chunks", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "SEAM_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "SEAM_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split one or more documents into chunks
    Split(SplitCommand),

    /// Decode placeholder markers back into source text
    Reconstruct(ReconstructCommand),

    /// Write the default splitter configuration
    Init(InitCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let config = AppConfig::load()?;
    let config = config.with_overrides(
        cli.workspace,
        cli.config,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("seam starting");
    tracing::debug!("Workspace: {:?}", config.workspace);

    let command_name = match &cli.command {
        Commands::Split(_) => "split",
        Commands::Reconstruct(_) => "reconstruct",
        Commands::Init(_) => "init",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Split(cmd) => cmd.execute(&config).await,
        Commands::Reconstruct(cmd) => cmd.execute(&config).await,
        Commands::Init(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
