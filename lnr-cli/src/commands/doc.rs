//! Document commands.

use anyhow::Result;
use clap::Subcommand;
use lnr::{CreateDocumentInput, Document, LinearClient, UpdateDocumentInput};
use rust_i18n::t;

use super::Context;
use crate::error::CliError;
use crate::output::{
    format_date, format_relative_time, print_json, print_records, truncate, OutputFormat,
    TableColumn,
};

#[derive(Subcommand)]
pub enum DocAction {
    /// List documents
    #[command(alias = "ls")]
    List {
        /// Project name or ID
        #[arg(short, long)]
        project: Option<String>,
    },

    /// Show a document
    #[command(alias = "view")]
    Show {
        /// Document ID
        id: String,
    },

    /// Create a document
    #[command(alias = "create")]
    New {
        /// Title
        #[arg(short, long)]
        title: String,
        /// Markdown content
        #[arg(short, long)]
        content: Option<String>,
        /// Project name or ID
        #[arg(short, long)]
        project: Option<String>,
    },

    /// Update a document
    #[command(alias = "edit")]
    Update {
        /// Document ID
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New markdown content
        #[arg(short, long)]
        content: Option<String>,
    },

    /// Delete a document
    #[command(alias = "rm")]
    Delete {
        /// Document ID
        id: String,
    },
}

pub async fn handle(action: DocAction, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    match action {
        DocAction::List { project } => {
            let project_id = match project {
                Some(project) => Some(project_id(&client, &project).await?),
                None => None,
            };
            let docs = client.documents().list(project_id.as_deref()).await?;
            print_records(&docs, &doc_columns(), |d| d.id.clone(), ctx.output)
        }
        DocAction::Show { id } => {
            let Some(doc) = client.documents().get(&id).await? else {
                return Err(CliError::not_found(t!("document_not_found", id = &id)).into());
            };
            match ctx.output.format {
                OutputFormat::Json => print_json(&doc)?,
                OutputFormat::Quiet => println!("{}", doc.id),
                OutputFormat::Table => print_doc(&doc),
            }
            Ok(())
        }
        DocAction::New {
            title,
            content,
            project,
        } => {
            let project_id = match project {
                Some(project) => Some(project_id(&client, &project).await?),
                None => None,
            };
            let input = CreateDocumentInput {
                title,
                content,
                project_id,
            };
            let doc = client.documents().create(&input).await?;
            match ctx.output.format {
                OutputFormat::Json => print_json(&doc)?,
                OutputFormat::Quiet => println!("{}", doc.id),
                OutputFormat::Table => println!("{}", t!("created_document", title = &doc.title)),
            }
            Ok(())
        }
        DocAction::Update { id, title, content } => {
            if title.is_none() && content.is_none() {
                return Err(CliError::new(t!("nothing_to_update"))
                    .with_hint(t!("hint_doc_flags"))
                    .into());
            }
            let input = UpdateDocumentInput { title, content };
            client.documents().update(&id, &input).await?;
            println!("{}", t!("updated_document", id = &id));
            Ok(())
        }
        DocAction::Delete { id } => {
            client.documents().delete(&id).await?;
            println!("{}", t!("deleted_document", id = &id));
            Ok(())
        }
    }
}

async fn project_id(client: &LinearClient, name_or_id: &str) -> Result<String> {
    tracing::debug!("resolving project {}", name_or_id);
    match client.projects().get(name_or_id).await? {
        Some(project) => Ok(project.id),
        None => Err(CliError::not_found(t!("project_not_found", name = name_or_id)).into()),
    }
}

fn print_doc(doc: &Document) {
    println!("{}", doc.title);
    if let Some(project) = &doc.project {
        println!("{}", t!("field_project", value = project));
    }
    println!("{}", t!("field_updated", value = format_date(&doc.updated_at)));
    println!("{}", t!("field_url", value = &doc.url));
    if let Some(content) = doc.content.as_deref().filter(|c| !c.is_empty()) {
        println!();
        println!("{}", content);
    }
}

fn doc_columns() -> Vec<TableColumn<Document>> {
    vec![
        TableColumn::new("ID", |d: &Document| d.id.clone()).width(20),
        TableColumn::new("TITLE", |d: &Document| truncate(&d.title, 50)).width(50),
        TableColumn::new("UPDATED", |d: &Document| format_relative_time(d.updated_at)).width(12),
    ]
}
