//! CLI subcommand handlers.

use std::path::Path;

use solchat_core::config::{init_workspace_config, workspace_config_path};
use solchat_core::{CommandRegistry, SolchatConfig, compute_suggestions, help_message};

use crate::dispatch::{ChatRequest, EchoDispatcher, PromptDispatcher};
use crate::{Commands, ConfigAction};

/// Handle a CLI subcommand.
pub async fn handle_command(
    command: Commands,
    workspace: &Path,
    config: &SolchatConfig,
) -> anyhow::Result<()> {
    match command {
        Commands::Parse { input, json } => handle_parse(&input.join(" "), json).await,
        Commands::Suggest { prefix } => {
            print!("{}", render_suggestions(&prefix));
            Ok(())
        }
        Commands::Help => {
            print!("{}", help_message());
            Ok(())
        }
        Commands::Config { action } => handle_config(action, workspace, config),
    }
}

async fn handle_parse(input: &str, json: bool) -> anyhow::Result<()> {
    let command = solchat_core::parse_detailed(input)?;
    let dispatcher = EchoDispatcher { json };
    let output = dispatcher
        .dispatch(&ChatRequest::from_command(command))
        .await?;
    println!("{output}");
    Ok(())
}

/// One line per matching command, or a note when nothing matches.
fn render_suggestions(prefix: &str) -> String {
    let matches = compute_suggestions(prefix);
    if matches.is_empty() {
        return format!("No commands match '{prefix}'.\n");
    }
    matches
        .iter()
        .map(|cmd| format!("{:<26} {}\n", cmd.usage(), cmd.description))
        .collect()
}

fn handle_config(
    action: ConfigAction,
    workspace: &Path,
    config: &SolchatConfig,
) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            match init_workspace_config(workspace)? {
                Some(path) => println!("Created default configuration at: {}", path.display()),
                None => println!(
                    "Configuration file already exists at: {}",
                    workspace_config_path(workspace).display()
                ),
            }
            Ok(())
        }
        ConfigAction::Show => {
            println!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
        ConfigAction::Commands => {
            for cmd in CommandRegistry::builtin().all() {
                println!("{:<26} {}", cmd.usage(), cmd.template);
            }
            Ok(())
        }
    }
}
