//! Label commands.

use anyhow::Result;
use clap::Subcommand;
use lnr::{CreateLabelInput, Label, UpdateLabelInput};
use rust_i18n::t;

use super::{short_id, Context};
use crate::error::CliError;
use crate::handlers::team::find_team;
use crate::output::{print_json, print_records, truncate, OutputFormat, TableColumn};

#[derive(Subcommand)]
pub enum LabelAction {
    /// List labels
    #[command(alias = "ls")]
    List {
        /// Team key or name
        #[arg(short, long)]
        team: Option<String>,
    },

    /// Show label details
    #[command(alias = "view")]
    Show {
        /// Label ID
        id: String,
    },

    /// Create a label
    #[command(alias = "create")]
    New {
        /// Label name
        #[arg(short, long)]
        name: String,
        /// Team key; omit for a workspace label
        #[arg(short, long)]
        team: Option<String>,
        /// Hex color, e.g. #ff0000
        #[arg(short, long)]
        color: Option<String>,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Update a label
    #[command(alias = "edit")]
    Update {
        /// Label ID
        id: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New hex color
        #[arg(short, long)]
        color: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a label
    #[command(alias = "rm")]
    Delete {
        /// Label ID
        id: String,
    },
}

pub async fn handle(action: LabelAction, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    match action {
        LabelAction::List { team } => {
            let team_id = match team {
                Some(team) => Some(find_team(&client, &team).await?.id),
                None => None,
            };
            let labels = client.labels().list(team_id.as_deref()).await?;
            print_records(&labels, &label_columns(), |l| l.id.clone(), ctx.output)
        }
        LabelAction::Show { id } => {
            let Some(label) = client.labels().get(&id).await? else {
                return Err(CliError::not_found(t!("label_id_not_found", id = &id)).into());
            };
            match ctx.output.format {
                OutputFormat::Json => print_json(&label)?,
                OutputFormat::Quiet => println!("{}", label.id),
                OutputFormat::Table => {
                    println!("{}", label.name);
                    if let Some(description) = &label.description {
                        println!("  {}", truncate(description, 80));
                    }
                    println!();
                    println!("{}", t!("field_id", value = &label.id));
                    println!("{}", t!("field_color", value = &label.color));
                }
            }
            Ok(())
        }
        LabelAction::New {
            name,
            team,
            color,
            description,
        } => {
            let team_id = match team {
                Some(team) => Some(find_team(&client, &team).await?.id),
                None => None,
            };
            let input = CreateLabelInput {
                name,
                team_id,
                color,
                description,
            };
            let label = client.labels().create(&input).await?;
            match ctx.output.format {
                OutputFormat::Json => print_json(&label)?,
                OutputFormat::Quiet => println!("{}", label.id),
                OutputFormat::Table => println!("{}", t!("created_label", name = &label.name)),
            }
            Ok(())
        }
        LabelAction::Update {
            id,
            name,
            color,
            description,
        } => {
            if name.is_none() && color.is_none() && description.is_none() {
                return Err(CliError::new(t!("nothing_to_update"))
                    .with_hint(t!("hint_label_flags"))
                    .into());
            }
            let input = UpdateLabelInput {
                name,
                color,
                description,
            };
            client.labels().update(&id, &input).await?;
            println!("{}", t!("updated_label", id = &id));
            Ok(())
        }
        LabelAction::Delete { id } => {
            client.labels().delete(&id).await?;
            println!("{}", t!("deleted_label", id = &id));
            Ok(())
        }
    }
}

fn label_columns() -> Vec<TableColumn<Label>> {
    vec![
        TableColumn::new("ID", |l: &Label| short_id(&l.id).to_owned()).width(10),
        TableColumn::new("NAME", |l: &Label| truncate(&l.name, 30)).width(30),
        TableColumn::new("COLOR", |l: &Label| l.color.clone()).width(10),
        TableColumn::new("DESCRIPTION", |l: &Label| {
            truncate(l.description.as_deref().unwrap_or("-"), 40)
        })
        .width(40),
    ]
}
