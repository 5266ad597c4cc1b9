//! Linear command-line interface.

mod commands;
mod config;
mod error;
mod handlers;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{
    auth, comment, config as config_cmd, cycle, doc, issue, label, me, project, search, team,
};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::output::{OutputFormat, OutputOptions};

rust_i18n::i18n!("src/locales", fallback = "en");

/// Work with Linear from the terminal
#[derive(Parser)]
#[command(name = "lnr")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Output identifiers only
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Show table headers
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage authentication
    Auth {
        #[command(subcommand)]
        action: auth::AuthAction,
    },

    /// Issue operations
    #[command(alias = "i")]
    Issue {
        #[command(subcommand)]
        action: issue::IssueAction,
    },

    /// Comment operations
    #[command(alias = "c")]
    Comment {
        #[command(subcommand)]
        action: comment::CommentAction,
    },

    /// Team operations
    #[command(alias = "t")]
    Team {
        #[command(subcommand)]
        action: team::TeamAction,
    },

    /// Project operations
    #[command(alias = "p")]
    Project {
        #[command(subcommand)]
        action: project::ProjectAction,
    },

    /// Cycle operations
    Cycle {
        #[command(subcommand)]
        action: cycle::CycleAction,
    },

    /// Label operations
    #[command(alias = "l")]
    Label {
        #[command(subcommand)]
        action: label::LabelAction,
    },

    /// Document operations
    #[command(alias = "d")]
    Doc {
        #[command(subcommand)]
        action: doc::DocAction,
    },

    /// Show the current user and their issues
    Me(me::MeArgs),

    /// Search issues
    #[command(alias = "s")]
    Search(search::SearchArgs),

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: config_cmd::ConfigAction,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LNR_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli).await {
        tracing::debug!("command failed: {:?}", err);
        let cli_err = CliError::from_anyhow(&err);
        cli_err.report();
        std::process::exit(cli_err.code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cfg = config::load_config()?;
    let output = OutputOptions::resolve(
        cli.json,
        cli.quiet,
        cli.format,
        cfg.output_format,
        cli.verbose,
    );
    let ctx = commands::Context::new(cfg, output);

    match cli.command {
        Commands::Auth { action } => auth::handle(action, &ctx).await,
        Commands::Issue { action } => issue::handle(action, &ctx).await,
        Commands::Comment { action } => comment::handle(action, &ctx).await,
        Commands::Team { action } => team::handle(action, &ctx).await,
        Commands::Project { action } => project::handle(action, &ctx).await,
        Commands::Cycle { action } => cycle::handle(action, &ctx).await,
        Commands::Label { action } => label::handle(action, &ctx).await,
        Commands::Doc { action } => doc::handle(action, &ctx).await,
        Commands::Me(args) => me::handle(args, &ctx).await,
        Commands::Search(args) => search::handle(args, &ctx).await,
        Commands::Config { action } => config_cmd::handle(action, &ctx).await,
    }
}
