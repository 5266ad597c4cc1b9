//! Current user command.

use anyhow::Result;
use clap::Args;
use futures::try_join;
use lnr::Issue;
use rust_i18n::t;

use super::Context;
use crate::handlers::issue::merge_issues;
use crate::output::{
    format_priority, print_json, print_records, truncate, OutputFormat, TableColumn,
};

#[derive(Args)]
pub struct MeArgs {
    /// List open issues assigned to me
    #[arg(short, long)]
    issues: bool,
    /// List open issues created by me
    #[arg(short, long)]
    created: bool,
}

pub async fn handle(args: MeArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let users = client.users();

    let issues = match (args.issues, args.created) {
        (true, true) => {
            let (assigned, created) = try_join!(users.assigned_issues(), users.created_issues())?;
            merge_issues([assigned, created])
        }
        (true, false) => users.assigned_issues().await?,
        (false, true) => users.created_issues().await?,
        (false, false) => {
            let viewer = users.viewer().await?;
            match ctx.output.format {
                OutputFormat::Json => print_json(&viewer)?,
                OutputFormat::Quiet => println!("{}", viewer.id),
                OutputFormat::Table => {
                    println!("{}", viewer.name);
                    println!("{}", t!("field_email", value = &viewer.email));
                    if let Some(display) = viewer
                        .display_name
                        .as_ref()
                        .filter(|d| **d != viewer.name)
                    {
                        println!("{}", t!("field_display_name", value = display));
                    }
                }
            }
            return Ok(());
        }
    };

    print_records(&issues, &my_issue_columns(), |i| i.identifier.clone(), ctx.output)
}

fn my_issue_columns() -> Vec<TableColumn<Issue>> {
    vec![
        TableColumn::new("ID", |i: &Issue| i.identifier.clone()).width(12),
        TableColumn::new("TITLE", |i: &Issue| truncate(&i.title, 40)).width(40),
        TableColumn::new("STATE", |i: &Issue| {
            i.state.clone().unwrap_or_else(|| "-".into())
        })
        .width(16),
        TableColumn::new("PRIORITY", |i: &Issue| format_priority(i.priority).to_owned()).width(10),
    ]
}
