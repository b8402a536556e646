//! solchat CLI: slash-command chat input for Solana questions.
//!
//! Runs an interactive input with command completion, or parses and
//! inspects commands from the command line.

mod commands;
mod dispatch;
mod keymap;
mod line_editor;
mod render;
mod repl;

use clap::Parser;
use solchat_core::{ConfigOverrides, SolchatConfig, SolchatError};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::dispatch::EchoDispatcher;

/// solchat: ask about Solana with slash commands
#[derive(Parser, Debug)]
#[command(name = "solchat", version, about, long_about = None)]
struct Cli {
    /// Workspace directory
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print submitted commands as JSON instead of the prompt
    #[arg(long)]
    json: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Parse a slash command and show the prompt it produces
    Parse {
        /// Input text, e.g. "/wallet <address>"
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        input: Vec<String>,
        /// Print the parsed command as JSON
        #[arg(long)]
        json: bool,
    },
    /// List commands matching a prefix
    Suggest {
        /// Prefix with or without the leading slash
        #[arg(default_value = "/")]
        prefix: String,
    },
    /// Show the slash command help
    Help,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Create a default workspace configuration file
    Init,
    /// Show the effective configuration
    Show,
    /// List commands with their prompt templates
    Commands,
}

fn init_tracing(cli: &Cli, config: &SolchatConfig) -> Option<WorkerGuard> {
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    // Human-readable layer for stderr (always active)
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(filter));

    let (json_layer, guard) = if config.logging.file_logging {
        let log_dir = solchat_core::config::project_dirs()
            .map(|d| d.data_dir().join("logs"))
            .unwrap_or_else(|| PathBuf::from("."));
        let _ = std::fs::create_dir_all(&log_dir);
        let file_appender = tracing_appender::rolling::daily(&log_dir, "solchat.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_filter(EnvFilter::new(&config.logging.file_level));
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();
    guard
}

fn resolve_config(cli: &Cli, workspace: &Path) -> anyhow::Result<SolchatConfig> {
    let mut overrides = ConfigOverrides::default();
    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        overrides.ui.color = Some(false);
    }

    let config = match &cli.config {
        Some(path) => solchat_core::config::load_config_file(path, Some(&overrides)),
        None => solchat_core::load_config(Some(workspace), Some(&overrides)),
    }
    .map_err(SolchatError::from)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    // Logging setup depends on the loaded configuration.
    let config = resolve_config(&cli, &workspace)?;
    let _guard = init_tracing(&cli, &config);
    tracing::debug!(workspace = %workspace.display(), "starting solchat");

    if let Some(command) = cli.command {
        return commands::handle_command(command, &workspace, &config).await;
    }

    let dispatcher = EchoDispatcher { json: cli.json };
    repl::run_interactive(&config.ui, &dispatcher).await
}
