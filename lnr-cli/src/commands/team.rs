//! Team commands.

use anyhow::Result;
use clap::Subcommand;
use lnr::{Team, TeamMember};
use rust_i18n::t;

use super::Context;
use crate::handlers::team::team_not_found;
use crate::output::{print_json, print_records, truncate, OutputFormat, TableColumn};

#[derive(Subcommand)]
pub enum TeamAction {
    /// List teams
    #[command(alias = "ls")]
    List,

    /// Show team details
    #[command(alias = "view")]
    Show {
        /// Team key
        key: String,
        /// List team members instead
        #[arg(short, long)]
        members: bool,
    },
}

pub async fn handle(action: TeamAction, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    match action {
        TeamAction::List => {
            let teams = client.teams().list().await?;
            print_records(&teams, &team_columns(), |t| t.key.clone(), ctx.output)
        }
        TeamAction::Show { key, members } => {
            let Some(team) = client.teams().get(&key).await? else {
                return Err(team_not_found(&client, &key).await?.into());
            };

            if members {
                let members = client.teams().members(&team.key).await?;
                if ctx.output.format == OutputFormat::Table {
                    println!("{}", t!("team_members_heading", name = &team.name, key = &team.key));
                    println!();
                }
                return print_records(&members, &member_columns(), |m| m.id.clone(), ctx.output);
            }

            match ctx.output.format {
                OutputFormat::Json => print_json(&team)?,
                OutputFormat::Quiet => println!("{}", team.id),
                OutputFormat::Table => {
                    println!("{} ({})", team.name, team.key);
                    if let Some(description) = &team.description {
                        println!("{}", description);
                    }
                }
            }
            Ok(())
        }
    }
}

fn team_columns() -> Vec<TableColumn<Team>> {
    vec![
        TableColumn::new("KEY", |t: &Team| t.key.clone()).width(8),
        TableColumn::new("NAME", |t: &Team| t.name.clone()).width(24),
        TableColumn::new("DESCRIPTION", |t: &Team| {
            truncate(t.description.as_deref().unwrap_or("-"), 40)
        })
        .width(40),
    ]
}

fn member_columns() -> Vec<TableColumn<TeamMember>> {
    vec![
        TableColumn::new("NAME", |m: &TeamMember| m.name.clone()).width(24),
        TableColumn::new("EMAIL", |m: &TeamMember| m.email.clone()).width(32),
    ]
}
