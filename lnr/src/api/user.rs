//! User API.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use super::{fetch, issue_fields, issues_from, Connection, IssueNode};
use crate::{
    client::LinearClientInner,
    error::Result,
    models::{Issue, User},
};

const VIEWER_QUERY: &str = "query Viewer { viewer { id name email displayName } }";

const ASSIGNED_QUERY: &str = concat!(
    "query AssignedIssues { viewer { assignedIssues(filter: { state: { type: { nin: [\"completed\", \"canceled\"] } } }) { nodes { ",
    issue_fields!(),
    " } } } }"
);

const CREATED_QUERY: &str = concat!(
    "query CreatedIssues { viewer { createdIssues(filter: { state: { type: { nin: [\"completed\", \"canceled\"] } } }) { nodes { ",
    issue_fields!(),
    " } } } }"
);

const BY_EMAIL_QUERY: &str = "query UserByEmail($email: String!) { \
     users(filter: { email: { eq: $email } }) { nodes { id name email displayName } } }";

/// API for user operations.
pub struct UserApi {
    client: Arc<LinearClientInner>,
}

impl UserApi {
    pub(crate) fn new(client: Arc<LinearClientInner>) -> Self {
        Self { client }
    }

    /// The authenticated user.
    pub async fn viewer(&self) -> Result<User> {
        fetch(&self.client, VIEWER_QUERY, json!({}), "viewer").await
    }

    /// Open issues assigned to the viewer.
    pub async fn assigned_issues(&self) -> Result<Vec<Issue>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Raw {
            assigned_issues: Connection<IssueNode>,
        }

        let viewer: Raw = fetch(&self.client, ASSIGNED_QUERY, json!({}), "viewer").await?;
        Ok(issues_from(viewer.assigned_issues))
    }

    /// Open issues created by the viewer.
    pub async fn created_issues(&self) -> Result<Vec<Issue>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Raw {
            created_issues: Connection<IssueNode>,
        }

        let viewer: Raw = fetch(&self.client, CREATED_QUERY, json!({}), "viewer").await?;
        Ok(issues_from(viewer.created_issues))
    }

    /// Find a user by exact email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users: Connection<User> =
            fetch(&self.client, BY_EMAIL_QUERY, json!({ "email": email }), "users").await?;
        Ok(users.nodes.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_util::{client, issue_node};
    use crate::client::mock::MockTransport;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_viewer() {
        let mock = Arc::new(MockTransport::new().respond(json!({
            "viewer": { "id": "u1", "name": "Alice", "email": "alice@acme.dev", "displayName": "alice" }
        })));
        let viewer = client(&mock).users().viewer().await.unwrap();
        assert_eq!(viewer.email, "alice@acme.dev");
        assert_eq!(viewer.display_name.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_assigned_issues_exclude_closed_states() {
        let mock = Arc::new(MockTransport::new().respond(json!({
            "viewer": { "assignedIssues": { "nodes": [issue_node("ENG-1", "mine")] } }
        })));
        let issues = client(&mock).users().assigned_issues().await.unwrap();
        assert_eq!(issues.len(), 1);
        assert!(mock.requests()[0].query.contains("nin: [\"completed\", \"canceled\"]"));
    }

    #[tokio::test]
    async fn test_find_by_email_missing() {
        let mock = Arc::new(MockTransport::new().respond(json!({ "users": { "nodes": [] } })));
        let user = client(&mock)
            .users()
            .find_by_email("ghost@acme.dev")
            .await
            .unwrap();
        assert_eq!(user, None);
    }
}
