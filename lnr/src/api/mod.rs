//! API modules.

mod comment;
mod cycle;
mod document;
mod issue;
mod label;
mod project;
mod team;
mod user;

pub use comment::CommentApi;
pub use cycle::CycleApi;
pub use document::DocumentApi;
pub use issue::{IssueApi, IssueListBuilder};
pub use label::LabelApi;
pub use project::ProjectApi;
pub use team::TeamApi;
pub use user::UserApi;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::client::LinearClientInner;
use crate::error::{Error, Result};
use crate::models::Issue;

/// Selection set shared by every query returning issues.
macro_rules! issue_fields {
    () => {
        "id identifier title description priority createdAt updatedAt url branchName \
         state { name } assignee { name } parent { id identifier }"
    };
}
pub(crate) use issue_fields;

/// A GraphQL connection; only `nodes` is requested.
#[derive(Debug, Deserialize)]
pub(crate) struct Connection<T> {
    pub nodes: Vec<T>,
}

/// Object with a single `name` field.
#[derive(Debug, Deserialize)]
pub(crate) struct Named {
    pub name: String,
}

/// Object with a single `id` field.
#[derive(Debug, Deserialize)]
pub(crate) struct IdRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ParentRef {
    pub id: String,
    pub identifier: String,
}

/// Issue as returned by [`issue_fields`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IssueNode {
    pub id: String,
    pub identifier: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub url: String,
    pub branch_name: Option<String>,
    pub state: Option<Named>,
    pub assignee: Option<Named>,
    pub parent: Option<ParentRef>,
}

impl From<IssueNode> for Issue {
    fn from(node: IssueNode) -> Self {
        let (parent_id, parent) = match node.parent {
            Some(p) => (Some(p.id), Some(p.identifier)),
            None => (None, None),
        };
        Issue {
            id: node.id,
            identifier: node.identifier,
            title: node.title,
            description: node.description,
            state: node.state.map(|s| s.name),
            assignee: node.assignee.map(|a| a.name),
            priority: node.priority.map(|p| p.round().clamp(0.0, 4.0) as u8),
            created_at: node.created_at,
            updated_at: node.updated_at,
            url: node.url,
            branch_name: node.branch_name,
            parent_id,
            parent,
        }
    }
}

/// Convert a page of issue nodes.
pub(crate) fn issues_from(connection: Connection<IssueNode>) -> Vec<Issue> {
    connection.nodes.into_iter().map(Issue::from).collect()
}

/// Run a query and deserialize the top-level `field` of its data.
pub(crate) async fn fetch<T: DeserializeOwned>(
    client: &LinearClientInner,
    query: &str,
    variables: Value,
    field: &str,
) -> Result<T> {
    let mut data: Value = client.query(query, variables).await?;
    let value = data
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| Error::missing(field))?;
    Ok(serde_json::from_value(value)?)
}

/// Like [`fetch`], but a null field or a not found error yields `None`.
pub(crate) async fn fetch_opt<T: DeserializeOwned>(
    client: &LinearClientInner,
    query: &str,
    variables: Value,
    field: &str,
) -> Result<Option<T>> {
    let data: Option<Value> = client.query_opt(query, variables).await?;
    match data.and_then(|mut d| d.get_mut(field).map(Value::take)) {
        Some(Value::Null) | None => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
    }
}

/// Run a mutation and return its payload, failing when `success` is not true.
pub(crate) async fn mutate<T: DeserializeOwned>(
    client: &LinearClientInner,
    query: &str,
    variables: Value,
    field: &str,
) -> Result<T> {
    let payload: Value = fetch(client, query, variables, field).await?;
    if payload.get("success").and_then(Value::as_bool) != Some(true) {
        return Err(Error::MutationFailed(field.to_owned()));
    }
    Ok(serde_json::from_value(payload)?)
}
