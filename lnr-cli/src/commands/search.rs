//! Issue search command.

use anyhow::Result;
use clap::Args;
use lnr::Issue;

use super::Context;
use crate::output::{print_records, truncate, TableColumn};

#[derive(Args)]
pub struct SearchArgs {
    /// Search terms
    query: String,
    /// Only issues of this team key
    #[arg(short, long)]
    team: Option<String>,
}

pub async fn handle(args: SearchArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    tracing::debug!("searching for {:?} in {:?}", args.query, args.team);
    let issues = client
        .issues()
        .search(&args.query, args.team.as_deref())
        .await?;
    print_records(&issues, &search_columns(), |i| i.identifier.clone(), ctx.output)
}

fn search_columns() -> Vec<TableColumn<Issue>> {
    vec![
        TableColumn::new("ID", |i: &Issue| i.identifier.clone()).width(12),
        TableColumn::new("TITLE", |i: &Issue| truncate(&i.title, 50)).width(50),
        TableColumn::new("STATE", |i: &Issue| {
            i.state.clone().unwrap_or_else(|| "-".into())
        })
        .width(16),
    ]
}
