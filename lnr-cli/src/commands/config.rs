//! Configuration commands.

use anyhow::{Context as _, Result};
use clap::Subcommand;
use rust_i18n::t;
use std::env;
use std::process::Command;

use super::Context;
use crate::config::{
    config_path, resolve_api_key, save_config, save_to, Config, ConfigKey, API_KEY_ENV,
};
use crate::error::CliError;
use crate::output::{print_json, OutputFormat};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show all settings
    #[command(alias = "list")]
    Show,
    /// Print one setting
    Get {
        /// Setting name
        key: ConfigKey,
    },
    /// Change one setting
    Set {
        /// Setting name
        key: ConfigKey,
        /// New value
        value: String,
    },
    /// Print the config file location
    Path,
    /// Open the config file in $EDITOR
    Edit,
}

pub async fn handle(action: ConfigAction, ctx: &Context) -> Result<()> {
    match action {
        ConfigAction::Show => {
            if ctx.output.format == OutputFormat::Json {
                let mut shown = ctx.config.clone();
                shown.api_key = resolve_api_key(env::var(API_KEY_ENV).ok(), &ctx.config)
                    .map(|k| k.masked());
                return print_json(&shown);
            }
            for line in show_lines(&ctx.config, env::var(API_KEY_ENV).ok()) {
                println!("{}", line);
            }
        }
        ConfigAction::Get { key } => match ctx.config.get(key) {
            Some(value) => println!("{}", value),
            None => println!("{}", t!("not_set")),
        },
        ConfigAction::Set { key, value } => {
            let mut cfg = ctx.config.clone();
            cfg.set(key, &value)?;
            save_config(&cfg)?;
            let shown = match key {
                ConfigKey::ApiKey => lnr::ApiKey::new(value).masked(),
                _ => value,
            };
            println!("{} = {}", key, shown);
        }
        ConfigAction::Path => println!("{}", config_path()?.display()),
        ConfigAction::Edit => edit(&ctx.config)?,
    }
    Ok(())
}

/// `key = value` lines; the API key is masked and tagged when it comes from the environment.
pub fn show_lines(config: &Config, env_key: Option<String>) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(key) = resolve_api_key(env_key, config) {
        let source = if key.from_env {
            format!(" {}", t!("from_env"))
        } else {
            String::new()
        };
        lines.push(format!("{} = {}{}", ConfigKey::ApiKey, key.masked(), source));
    }
    for key in [ConfigKey::DefaultTeam, ConfigKey::OutputFormat] {
        if let Some(value) = config.get(key) {
            lines.push(format!("{} = {}", key, value));
        }
    }

    if lines.is_empty() {
        lines.push(t!("no_config").to_string());
    }
    lines
}

fn edit(config: &Config) -> Result<()> {
    let path = config_path()?;
    if !path.exists() {
        save_to(config, &path)?;
    }

    let editor = env::var("EDITOR")
        .ok()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| "vi".to_owned());
    tracing::debug!("editing {} with {}", path.display(), editor);

    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .with_context(|| format!("Failed to launch {}", editor))?;
    if !status.success() {
        return Err(CliError::new(t!("editor_failed", editor = &editor)).into());
    }
    Ok(())
}
