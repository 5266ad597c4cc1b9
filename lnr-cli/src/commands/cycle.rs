//! Cycle commands.

use anyhow::Result;
use clap::Subcommand;
use lnr::{Cycle, Issue};
use rust_i18n::t;

use super::Context;
use crate::error::CliError;
use crate::handlers::team::{team_key, team_not_found};
use crate::output::{format_date, print_json, print_records, truncate, OutputFormat, TableColumn};

#[derive(Subcommand)]
pub enum CycleAction {
    /// List cycles for a team
    #[command(alias = "ls")]
    List {
        /// Team key (defaults to default_team)
        #[arg(short, long)]
        team: Option<String>,
    },

    /// Show the active cycle
    Current {
        /// Team key (defaults to default_team)
        #[arg(short, long)]
        team: Option<String>,
        /// List the cycle's issues instead
        #[arg(short, long)]
        issues: bool,
    },
}

pub async fn handle(action: CycleAction, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    match action {
        CycleAction::List { team } => {
            let key = team_key(team, &ctx.config)?;
            let cycles = client.cycles().list(&key).await?;
            if cycles.is_empty() && client.teams().get(&key).await?.is_none() {
                return Err(team_not_found(&client, &key).await?.into());
            }
            print_records(&cycles, &cycle_columns(), |c| c.id.clone(), ctx.output)
        }
        CycleAction::Current { team, issues } => {
            let key = team_key(team, &ctx.config)?;
            let Some(cycle) = client.cycles().current(&key).await? else {
                return Err(CliError::new(t!("no_active_cycle"))
                    .with_hint(t!("hint_no_active_cycle", key = &key))
                    .into());
            };

            if issues {
                let issues = client.cycles().current_issues(&key).await?;
                return print_records(
                    &issues,
                    &cycle_issue_columns(),
                    |i| i.identifier.clone(),
                    ctx.output,
                );
            }

            match ctx.output.format {
                OutputFormat::Json => print_json(&cycle)?,
                OutputFormat::Quiet => println!("{}", cycle.id),
                OutputFormat::Table => {
                    println!(
                        "{}",
                        t!("cycle_heading", number = cycle.number, name = cycle.display_name())
                    );
                    println!("{}", t!("cycle_start", date = format_date(&cycle.starts_at)));
                    println!("{}", t!("cycle_end", date = format_date(&cycle.ends_at)));
                }
            }
            Ok(())
        }
    }
}

fn cycle_columns() -> Vec<TableColumn<Cycle>> {
    vec![
        TableColumn::new("#", |c: &Cycle| c.number.to_string()).width(4),
        TableColumn::new("NAME", |c: &Cycle| c.display_name()).width(20),
        TableColumn::new("START", |c: &Cycle| format_date(&c.starts_at)).width(12),
        TableColumn::new("END", |c: &Cycle| format_date(&c.ends_at)).width(12),
    ]
}

fn cycle_issue_columns() -> Vec<TableColumn<Issue>> {
    vec![
        TableColumn::new("ID", |i: &Issue| i.identifier.clone()).width(10),
        TableColumn::new("TITLE", |i: &Issue| truncate(&i.title, 50)).width(50),
    ]
}
