//! Authentication commands.

use anyhow::Result;
use clap::Subcommand;
use rust_i18n::t;
use std::env;

use super::Context;
use crate::config::{self, build_client_with_key, resolve_api_key, save_config, API_KEY_ENV};
use crate::error::{exit_code, CliError};
use crate::output::{print_json, OutputFormat};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store an API key after checking it against the API
    Login {
        /// Personal API key
        api_key: String,
    },
    /// Remove the stored API key
    Logout,
    /// Show the authenticated user
    Whoami,
    /// Show where the API key comes from
    Status,
}

pub async fn handle(action: AuthAction, ctx: &Context) -> Result<()> {
    match action {
        AuthAction::Login { api_key } => login(&api_key, ctx).await,
        AuthAction::Logout => logout(ctx),
        AuthAction::Whoami => whoami(ctx).await,
        AuthAction::Status => status(ctx),
    }
}

async fn login(api_key: &str, ctx: &Context) -> Result<()> {
    let api_key = api_key.trim();
    let client = build_client_with_key(api_key)?;
    let viewer = client.users().viewer().await.map_err(|e| {
        tracing::debug!("api key rejected: {}", e);
        CliError {
            code: exit_code::AUTH,
            ..CliError::new(t!("invalid_api_key")).with_hint(t!("hint_api_key_url"))
        }
    })?;

    let mut cfg = ctx.config.clone();
    cfg.api_key = Some(api_key.to_owned());
    save_config(&cfg)?;

    println!("{}", t!("authenticated_as", name = &viewer.name));
    Ok(())
}

fn logout(ctx: &Context) -> Result<()> {
    let mut cfg = ctx.config.clone();
    cfg.api_key = None;
    save_config(&cfg)?;
    println!("{}", t!("logged_out"));
    Ok(())
}

async fn whoami(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let viewer = client.users().viewer().await?;

    match ctx.output.format {
        OutputFormat::Json => print_json(&viewer)?,
        OutputFormat::Quiet => println!("{}", viewer.id),
        OutputFormat::Table => println!("{} <{}>", viewer.name, viewer.email),
    }
    Ok(())
}

fn status(ctx: &Context) -> Result<()> {
    let Some(key) = resolve_api_key(env::var(API_KEY_ENV).ok(), &ctx.config) else {
        return Err(CliError {
            code: exit_code::AUTH,
            ..CliError::new(t!("error_not_authenticated")).with_hint(t!("hint_auth"))
        }
        .into());
    };

    let source = if key.from_env {
        t!("key_source_env", var = API_KEY_ENV).to_string()
    } else {
        t!("key_source_config", path = config::config_path()?.display()).to_string()
    };
    println!("{}", t!("api_key_line", key = key.masked()));
    println!("{}", source);
    Ok(())
}
