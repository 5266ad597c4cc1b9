//! Issue commands.

use anyhow::{Context as _, Result};
use clap::Subcommand;
use lnr::{
    priority_from_str, Comment, CreateIssueInput, Issue, IssueFilter, LinearClient, RelationKind,
    UpdateIssueInput,
};
use rust_i18n::t;
use serde::Serialize;
use std::process::Command;

use super::{short_id, Context};
use crate::error::CliError;
use crate::handlers::issue::{
    apply_label_change, get_issue, resolve_assignee, resolve_labels, resolve_parent,
    resolve_related, resolve_state, LabelChange,
};
use crate::handlers::team::{find_team, team_key};
use crate::output::{
    format_date, format_priority, output_comment_threads, print_json, print_records, truncate,
    OutputFormat, TableColumn,
};

#[derive(Subcommand)]
pub enum IssueAction {
    /// List issues
    #[command(alias = "ls")]
    List {
        /// Team key
        #[arg(short, long)]
        team: Option<String>,
        /// Workflow state name
        #[arg(short, long)]
        state: Option<String>,
        /// Assignee email, or @me
        #[arg(short, long)]
        assignee: Option<String>,
        /// Label name
        #[arg(short, long)]
        label: Option<String>,
        /// Project name
        #[arg(short, long)]
        project: Option<String>,
    },

    /// Show issue details and recent comment threads
    #[command(alias = "view")]
    Show {
        /// Issue identifier, e.g. ENG-123
        id: String,
        /// Open the issue in a browser
        #[arg(short, long)]
        open: bool,
        /// Number of comment threads to show
        #[arg(long, default_value = "3")]
        threads: usize,
    },

    /// Create an issue
    #[command(alias = "create")]
    New {
        /// Title
        #[arg(long)]
        title: String,
        /// Team key (defaults to default_team)
        #[arg(short, long)]
        team: Option<String>,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
        /// Assignee email, or @me
        #[arg(short, long)]
        assignee: Option<String>,
        /// Priority: urgent, high, medium, low, none
        #[arg(short, long)]
        priority: Option<String>,
        /// Label name (repeatable)
        #[arg(short, long = "label")]
        labels: Vec<String>,
        /// Parent issue identifier
        #[arg(long)]
        parent: Option<String>,
    },

    /// Update an issue
    #[command(alias = "edit")]
    Update {
        /// Issue identifier
        id: String,
        /// Workflow state name
        #[arg(short, long)]
        state: Option<String>,
        /// Assignee email, or @me
        #[arg(short, long)]
        assignee: Option<String>,
        /// Priority: urgent, high, medium, low, none
        #[arg(short, long)]
        priority: Option<String>,
        /// Label change: +name adds, -name removes (repeatable)
        #[arg(short, long = "label", allow_hyphen_values = true)]
        labels: Vec<String>,
        /// Parent issue identifier
        #[arg(long)]
        parent: Option<String>,
        /// Mark this issue as blocking another
        #[arg(long)]
        blocks: Option<String>,
        /// Mark this issue as blocked by another
        #[arg(long)]
        blocked_by: Option<String>,
        /// Relate this issue to another
        #[arg(long)]
        relates_to: Option<String>,
    },

    /// Archive an issue
    Archive {
        /// Issue identifier
        id: String,
    },

    /// List sub-issues
    Children {
        /// Issue identifier
        id: String,
    },

    /// List comments with their IDs
    Comments {
        /// Issue identifier
        id: String,
    },
}

/// Fields changed by `issue update`.
struct IssueUpdate {
    state: Option<String>,
    assignee: Option<String>,
    priority: Option<String>,
    labels: Vec<String>,
    parent: Option<String>,
    blocks: Option<String>,
    blocked_by: Option<String>,
    relates_to: Option<String>,
}

pub async fn handle(action: IssueAction, ctx: &Context) -> Result<()> {
    match action {
        IssueAction::List {
            team,
            state,
            assignee,
            label,
            project,
        } => {
            let filter = IssueFilter {
                team,
                state,
                assignee,
                label,
                project,
            };
            list_issues(filter, ctx).await
        }
        IssueAction::Show { id, open, threads } => show_issue(&id, open, threads, ctx).await,
        IssueAction::New {
            title,
            team,
            description,
            assignee,
            priority,
            labels,
            parent,
        } => {
            let client = ctx.client()?;
            let team = find_team(&client, &team_key(team, &ctx.config)?).await?;
            let mut input = CreateIssueInput {
                team_id: team.id.clone(),
                title,
                description,
                priority: priority.as_deref().map(priority_from_str),
                ..Default::default()
            };
            if let Some(assignee) = assignee {
                input.assignee_id = Some(resolve_assignee(&client, &assignee).await?);
            }
            if !labels.is_empty() {
                input.label_ids = Some(resolve_labels(&client, &team.id, &labels).await?);
            }
            if let Some(parent) = parent {
                input.parent_id = Some(resolve_parent(&client, &parent).await?);
            }
            create_issue(&client, &input, ctx).await
        }
        IssueAction::Update {
            id,
            state,
            assignee,
            priority,
            labels,
            parent,
            blocks,
            blocked_by,
            relates_to,
        } => {
            let update = IssueUpdate {
                state,
                assignee,
                priority,
                labels,
                parent,
                blocks,
                blocked_by,
                relates_to,
            };
            update_issue(&id, update, ctx).await
        }
        IssueAction::Archive { id } => {
            let client = ctx.client()?;
            let issue = get_issue(&client, &id).await?;
            client.issues().archive(&issue.id).await?;
            println!("{}", t!("archived", id = &issue.identifier));
            Ok(())
        }
        IssueAction::Children { id } => {
            let client = ctx.client()?;
            let issue = get_issue(&client, &id).await?;
            let children = client.issues().children(&issue.id).await?;
            print_records(&children, &issue_columns(), |i| i.identifier.clone(), ctx.output)
        }
        IssueAction::Comments { id } => {
            let client = ctx.client()?;
            let issue = get_issue(&client, &id).await?;
            let comments = client.comments().list(&issue.id).await?;
            print_records(&comments, &comment_columns(), |c| c.id.clone(), ctx.output)
        }
    }
}

/// Columns for issue tables.
pub(crate) fn issue_columns() -> Vec<TableColumn<Issue>> {
    vec![
        TableColumn::new("ID", |i: &Issue| i.identifier.clone()).width(10),
        TableColumn::new("STATE", |i: &Issue| {
            i.state.clone().unwrap_or_else(|| "-".into())
        })
        .width(15),
        TableColumn::new("TITLE", |i: &Issue| truncate(&i.title, 50)).width(50),
        TableColumn::new("ASSIGNEE", |i: &Issue| {
            i.assignee.clone().unwrap_or_else(|| "-".into())
        })
        .width(15),
        TableColumn::new("PRIORITY", |i: &Issue| format_priority(i.priority).to_owned()).width(8),
    ]
}

fn comment_columns() -> Vec<TableColumn<Comment>> {
    vec![
        TableColumn::new("ID", |c: &Comment| short_id(&c.id).to_owned()).width(10),
        TableColumn::new("USER", |c: &Comment| c.actor_name().to_owned()).width(15),
        TableColumn::new("BODY", |c: &Comment| {
            truncate(&c.body.replace('\n', " "), 50)
        })
        .width(50),
        TableColumn::new("CREATED", |c: &Comment| format_date(&c.created_at)).width(12),
    ]
}

async fn list_issues(filter: IssueFilter, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    tracing::debug!("listing issues with {:?}", filter);
    let issues = client.issues().list().filter(filter).send().await?;
    print_records(&issues, &issue_columns(), |i| i.identifier.clone(), ctx.output)
}

#[derive(Serialize)]
struct IssueDetail<'a> {
    #[serde(flatten)]
    issue: &'a Issue,
    comments: &'a [Comment],
}

async fn show_issue(id: &str, open: bool, threads: usize, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let issue = get_issue(&client, id).await?;

    if open {
        open_url(&issue.url)?;
        println!("{}", t!("opened", url = &issue.url));
        return Ok(());
    }

    let comments = if threads > 0 {
        client.comments().list(&issue.id).await?
    } else {
        Vec::new()
    };

    match ctx.output.format {
        OutputFormat::Json => print_json(&IssueDetail {
            issue: &issue,
            comments: &comments,
        })?,
        OutputFormat::Quiet => println!("{}", issue.identifier),
        OutputFormat::Table => {
            print_issue(&issue);
            if threads > 0 {
                println!();
                output_comment_threads(&comments, threads);
            }
        }
    }
    Ok(())
}

fn print_issue(issue: &Issue) {
    println!("{}: {}", issue.identifier, issue.title);
    println!();
    println!(
        "{}",
        t!("field_state", value = issue.state.as_deref().unwrap_or("-"))
    );
    println!(
        "{}",
        t!(
            "field_assignee",
            value = issue.assignee.as_deref().unwrap_or("-")
        )
    );
    println!(
        "{}",
        t!("field_priority", value = format_priority(issue.priority))
    );
    if let Some(parent) = issue.parent.as_ref().or(issue.parent_id.as_ref()) {
        println!("{}", t!("field_parent", value = parent));
    }
    println!(
        "{}",
        t!("field_created", value = format_date(&issue.created_at))
    );
    println!(
        "{}",
        t!("field_updated", value = format_date(&issue.updated_at))
    );
    println!("{}", t!("field_url", value = &issue.url));

    if let Some(description) = issue.description.as_deref().filter(|d| !d.is_empty()) {
        println!();
        println!("{}", description);
    }
}

async fn create_issue(
    client: &LinearClient,
    input: &CreateIssueInput,
    ctx: &Context,
) -> Result<()> {
    let issue = client.issues().create(input).await?;
    match ctx.output.format {
        OutputFormat::Json => print_json(&issue)?,
        OutputFormat::Quiet => println!("{}", issue.identifier),
        OutputFormat::Table => println!(
            "{}",
            t!("created_issue", id = &issue.identifier, title = &issue.title)
        ),
    }
    Ok(())
}

async fn update_issue(id: &str, update: IssueUpdate, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let issue = get_issue(&client, id).await?;
    let identifier = issue.identifier.as_str();

    let mut input = UpdateIssueInput::default();

    if update.state.is_some() || !update.labels.is_empty() {
        let context = client.issues().context(&issue.id).await?;
        let team_id = context
            .team_id
            .ok_or_else(|| CliError::new(t!("team_unknown")))?;

        if let Some(state) = &update.state {
            input.state_id = Some(resolve_state(&client, &team_id, state).await?);
        }

        if !update.labels.is_empty() {
            let available = client.labels().list(Some(&team_id)).await?;
            let mut ids = context.label_ids;
            let mut changed = false;
            for raw in &update.labels {
                let change = LabelChange::parse(raw);
                if let Some(updated) = apply_label_change(&ids, &available, &change)? {
                    ids = updated;
                    changed = true;
                }
            }
            if changed {
                input.label_ids = Some(ids);
            }
        }
    }

    if let Some(assignee) = &update.assignee {
        input.assignee_id = Some(resolve_assignee(&client, assignee).await?);
    }
    if let Some(priority) = &update.priority {
        input.priority = Some(priority_from_str(priority));
    }
    if let Some(parent) = &update.parent {
        input.parent_id = Some(resolve_parent(&client, parent).await?);
    }

    let mut changed = false;
    if !input.is_empty() {
        client.issues().update(&issue.id, &input).await?;
        println!("{}", t!("updated_issue", id = identifier));
        changed = true;
    }

    if let Some(other) = &update.blocks {
        let other_id = resolve_related(&client, other).await?;
        client
            .issues()
            .relate(&issue.id, &other_id, RelationKind::Blocks)
            .await?;
        println!("{}", t!("now_blocks", id = identifier, other = other));
        changed = true;
    }
    if let Some(other) = &update.blocked_by {
        let other_id = resolve_related(&client, other).await?;
        client
            .issues()
            .relate(&other_id, &issue.id, RelationKind::Blocks)
            .await?;
        println!("{}", t!("now_blocked_by", id = identifier, other = other));
        changed = true;
    }
    if let Some(other) = &update.relates_to {
        let other_id = resolve_related(&client, other).await?;
        client
            .issues()
            .relate(&issue.id, &other_id, RelationKind::Related)
            .await?;
        println!("{}", t!("now_relates_to", id = identifier, other = other));
        changed = true;
    }

    if !changed && update.labels.is_empty() {
        return Err(CliError::new(t!("nothing_to_update"))
            .with_hint(t!("hint_update_flags"))
            .into());
    }
    Ok(())
}

fn open_url(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    let mut command = Command::new("open");

    #[cfg(target_os = "windows")]
    let mut command = {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    };

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = Command::new("xdg-open");

    command
        .arg(url)
        .spawn()
        .with_context(|| format!("Failed to open {}", url))?;
    Ok(())
}
