//! Document API.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{fetch, fetch_opt, mutate, Connection, Named};
use crate::{
    client::LinearClientInner,
    error::Result,
    models::{CreateDocumentInput, Document, UpdateDocumentInput},
};

macro_rules! document_fields {
    () => {
        "id title content url createdAt updatedAt project { name } creator { name }"
    };
}

const LIST_QUERY: &str = concat!(
    "query Documents($filter: DocumentFilter) { documents(filter: $filter) { nodes { ",
    document_fields!(),
    " } } }"
);

const GET_QUERY: &str = concat!(
    "query Document($id: String!) { document(id: $id) { ",
    document_fields!(),
    " } }"
);

const CREATE_MUTATION: &str = concat!(
    "mutation DocumentCreate($input: DocumentCreateInput!) { documentCreate(input: $input) { success document { ",
    document_fields!(),
    " } } }"
);

const UPDATE_MUTATION: &str =
    "mutation DocumentUpdate($id: String!, $input: DocumentUpdateInput!) { \
     documentUpdate(id: $id, input: $input) { success } }";

const DELETE_MUTATION: &str =
    "mutation DocumentDelete($id: String!) { documentDelete(id: $id) { success } }";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentNode {
    id: String,
    title: String,
    content: Option<String>,
    url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    project: Option<Named>,
    creator: Option<Named>,
}

impl From<DocumentNode> for Document {
    fn from(node: DocumentNode) -> Self {
        Document {
            id: node.id,
            title: node.title,
            content: node.content,
            url: node.url,
            created_at: node.created_at,
            updated_at: node.updated_at,
            project: node.project.map(|p| p.name),
            creator: node.creator.map(|c| c.name),
        }
    }
}

/// API for documents.
pub struct DocumentApi {
    client: Arc<LinearClientInner>,
}

impl DocumentApi {
    pub(crate) fn new(client: Arc<LinearClientInner>) -> Self {
        Self { client }
    }

    /// List documents, optionally of one project.
    pub async fn list(&self, project_id: Option<&str>) -> Result<Vec<Document>> {
        let filter = match project_id {
            Some(id) => json!({ "project": { "id": { "eq": id } } }),
            None => Value::Null,
        };
        let docs: Connection<DocumentNode> = fetch(
            &self.client,
            LIST_QUERY,
            json!({ "filter": filter }),
            "documents",
        )
        .await?;
        Ok(docs.nodes.into_iter().map(Document::from).collect())
    }

    /// Get a document by ID.
    pub async fn get(&self, id: &str) -> Result<Option<Document>> {
        let node: Option<DocumentNode> =
            fetch_opt(&self.client, GET_QUERY, json!({ "id": id }), "document").await?;
        Ok(node.map(Document::from))
    }

    /// Create a document.
    pub async fn create(&self, input: &CreateDocumentInput) -> Result<Document> {
        #[derive(Deserialize)]
        struct Created {
            document: DocumentNode,
        }

        let created: Created = mutate(
            &self.client,
            CREATE_MUTATION,
            json!({ "input": input }),
            "documentCreate",
        )
        .await?;
        Ok(created.document.into())
    }

    /// Update a document.
    pub async fn update(&self, id: &str, input: &UpdateDocumentInput) -> Result<()> {
        mutate::<Value>(
            &self.client,
            UPDATE_MUTATION,
            json!({ "id": id, "input": input }),
            "documentUpdate",
        )
        .await?;
        Ok(())
    }

    /// Delete a document.
    pub async fn delete(&self, id: &str) -> Result<()> {
        mutate::<Value>(&self.client, DELETE_MUTATION, json!({ "id": id }), "documentDelete")
            .await?;
        Ok(())
    }
}
