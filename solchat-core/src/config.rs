//! Configuration system for solchat.
//!
//! Uses `figment` for layered configuration: defaults -> user config file ->
//! workspace config file -> environment -> explicit overrides. Settings only
//! shape the host input (dropdown size, hints, colors, logging); the command
//! grammar is fixed and not configurable.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable prefix, e.g. `SOLCHAT_UI__MAX_VISIBLE_SUGGESTIONS`.
pub const ENV_PREFIX: &str = "SOLCHAT_";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolchatConfig {
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Host input presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Rows shown in the suggestion dropdown before scrolling.
    pub max_visible_suggestions: usize,
    /// Show the untyped part of the highlighted trigger inline.
    pub ghost_text: bool,
    /// Use ANSI colors.
    pub color: bool,
    /// Prompt printed before the input line.
    pub prompt: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            max_visible_suggestions: 8,
            ghost_text: true,
            color: true,
            prompt: "> ".to_string(),
        }
    }
}

/// File logging. Console verbosity comes from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write JSON logs to a daily-rolling file in the data directory.
    pub file_logging: bool,
    /// `EnvFilter` directive for the file layer.
    pub file_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file_logging: true,
            file_level: "debug".to_string(),
        }
    }
}

/// Settings a caller wants to force, layered above every other source.
///
/// Only the fields that are `Some` are applied; everything else keeps the
/// value from files, environment or defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfigOverrides {
    pub ui: UiOverrides,
    pub logging: LoggingOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UiOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_visible_suggestions: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ghost_text: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoggingOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_logging: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_level: Option<String>,
}

/// Platform directories for solchat, if a home directory can be resolved.
pub fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("dev", "solchat", "solchat")
}

/// `<config_dir>/config.toml` for the current user.
pub fn user_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// `<workspace>/.solchat/config.toml`.
pub fn workspace_config_path(workspace: &Path) -> PathBuf {
    workspace.join(".solchat").join("config.toml")
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Explicit overrides (passed as argument)
/// 2. Environment variables (prefixed with `SOLCHAT_`, `__` between levels)
/// 3. Workspace-local config (`.solchat/config.toml`)
/// 4. User config (`~/.config/solchat/config.toml`)
/// 5. Built-in defaults
pub fn load_config(
    workspace: Option<&Path>,
    overrides: Option<&ConfigOverrides>,
) -> Result<SolchatConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(SolchatConfig::default()));

    if let Some(user_config) = user_config_path()
        && user_config.exists()
    {
        figment = figment.merge(Toml::file(&user_config));
    }

    if let Some(ws) = workspace {
        let ws_config = workspace_config_path(ws);
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    extract(apply_overrides(figment, overrides))
}

/// Load a single explicit config file over the defaults. Environment
/// variables and `overrides` still apply on top.
pub fn load_config_file(
    path: &Path,
    overrides: Option<&ConfigOverrides>,
) -> Result<SolchatConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let figment = Figment::from(Serialized::defaults(SolchatConfig::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));
    extract(apply_overrides(figment, overrides))
}

/// Write the default configuration to `<workspace>/.solchat/config.toml`.
///
/// Returns the path written, or `None` when a file is already there.
pub fn init_workspace_config(workspace: &Path) -> crate::Result<Option<PathBuf>> {
    let path = workspace_config_path(workspace);
    if path.exists() {
        return Ok(None);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let body = toml::to_string_pretty(&SolchatConfig::default())?;
    std::fs::write(&path, body)?;
    Ok(Some(path))
}

fn apply_overrides(figment: Figment, overrides: Option<&ConfigOverrides>) -> Figment {
    match overrides {
        Some(overrides) => figment.merge(Serialized::defaults(overrides)),
        None => figment,
    }
}

fn extract(figment: Figment) -> Result<SolchatConfig, ConfigError> {
    let config: SolchatConfig = figment.extract().map_err(|e| ConfigError::Invalid {
        message: e.to_string(),
    })?;
    if config.ui.max_visible_suggestions == 0 {
        return Err(ConfigError::Invalid {
            message: "ui.max_visible_suggestions must be at least 1".to_string(),
        });
    }
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}
