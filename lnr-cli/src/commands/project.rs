//! Project commands.

use anyhow::Result;
use clap::Subcommand;
use lnr::{CreateProjectInput, Issue, Project};
use rust_i18n::t;

use super::Context;
use crate::error::CliError;
use crate::handlers::team::find_team;
use crate::output::{
    format_date, print_json, print_records, truncate, OutputFormat, TableColumn,
};

#[derive(Subcommand)]
pub enum ProjectAction {
    /// List projects
    #[command(alias = "ls")]
    List {
        /// Team key or name
        #[arg(short, long)]
        team: Option<String>,
        /// Project status, e.g. started
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Show project details
    #[command(alias = "view")]
    Show {
        /// Project name or ID
        name: String,
        /// List the project's issues instead
        #[arg(short, long)]
        issues: bool,
    },

    /// Create a project
    #[command(alias = "create")]
    New {
        /// Project name
        #[arg(short, long)]
        name: String,
        /// Team key or name
        #[arg(short, long)]
        team: Option<String>,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a project
    #[command(alias = "rm")]
    Delete {
        /// Project name or ID
        name: String,
    },
}

pub async fn handle(action: ProjectAction, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    match action {
        ProjectAction::List { team, status } => {
            let projects = client
                .projects()
                .list(team.as_deref(), status.as_deref())
                .await?;
            print_records(&projects, &project_columns(), |p| p.id.clone(), ctx.output)
        }
        ProjectAction::Show { name, issues } => {
            let Some(project) = client.projects().get(&name).await? else {
                return Err(project_not_found(&name).into());
            };

            if issues {
                let issues = client.projects().issues(&project.id).await?;
                return print_records(
                    &issues,
                    &project_issue_columns(),
                    |i| i.identifier.clone(),
                    ctx.output,
                );
            }

            match ctx.output.format {
                OutputFormat::Json => print_json(&project)?,
                OutputFormat::Quiet => println!("{}", project.id),
                OutputFormat::Table => print_project(&project),
            }
            Ok(())
        }
        ProjectAction::New {
            name,
            team,
            description,
        } => {
            let mut input = CreateProjectInput {
                name,
                description,
                ..Default::default()
            };
            if let Some(team) = team {
                input.team_ids = vec![find_team(&client, &team).await?.id];
            }

            let project = client.projects().create(&input).await?;
            match ctx.output.format {
                OutputFormat::Json => print_json(&project)?,
                OutputFormat::Quiet => println!("{}", project.id),
                OutputFormat::Table => {
                    println!("{}", t!("created_project", name = &project.name))
                }
            }
            Ok(())
        }
        ProjectAction::Delete { name } => {
            if !client.projects().delete(&name).await? {
                return Err(project_not_found(&name).into());
            }
            println!("{}", t!("deleted_project", name = &name));
            Ok(())
        }
    }
}

fn project_not_found(name: &str) -> CliError {
    CliError::not_found(t!("project_not_found", name = name))
}

fn print_project(project: &Project) {
    println!("{}", project.name);
    if let Some(description) = &project.description {
        println!("  {}", truncate(description, 80));
    }
    println!();
    println!("{}", t!("field_state", value = &project.state));
    println!(
        "{}",
        t!("field_progress", value = format!("{}%", project.percent()))
    );
    println!(
        "{}",
        t!("field_target", value = format_date(&project.target_date))
    );
    println!(
        "{}",
        t!("field_started", value = format_date(&project.start_date))
    );
    println!("{}", t!("field_url", value = &project.url));
}

fn project_columns() -> Vec<TableColumn<Project>> {
    vec![
        TableColumn::new("NAME", |p: &Project| truncate(&p.name, 30)).width(30),
        TableColumn::new("STATE", |p: &Project| p.state.clone()).width(12),
        TableColumn::new("PROGRESS", |p: &Project| format!("{}%", p.percent())).width(10),
        TableColumn::new("TARGET", |p: &Project| format_date(&p.target_date)).width(12),
    ]
}

fn project_issue_columns() -> Vec<TableColumn<Issue>> {
    vec![
        TableColumn::new("ID", |i: &Issue| i.identifier.clone()).width(12),
        TableColumn::new("TITLE", |i: &Issue| truncate(&i.title, 50)).width(50),
        TableColumn::new("CREATED", |i: &Issue| format_date(&i.created_at)).width(12),
    ]
}
