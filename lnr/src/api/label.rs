//! Issue label API.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use super::{fetch, fetch_opt, mutate, Connection};
use crate::{
    client::LinearClientInner,
    error::Result,
    models::{CreateLabelInput, Label, UpdateLabelInput},
};

const LIST_QUERY: &str =
    "query IssueLabels { issueLabels { nodes { id name color description } } }";

const TEAM_LIST_QUERY: &str = "query TeamLabels($id: String!) { team(id: $id) { \
     labels { nodes { id name color description } } } }";

const GET_QUERY: &str =
    "query IssueLabel($id: String!) { issueLabel(id: $id) { id name color description } }";

const CREATE_MUTATION: &str = "mutation IssueLabelCreate($input: IssueLabelCreateInput!) { \
     issueLabelCreate(input: $input) { success issueLabel { id name color description } } }";

const UPDATE_MUTATION: &str =
    "mutation IssueLabelUpdate($id: String!, $input: IssueLabelUpdateInput!) { \
     issueLabelUpdate(id: $id, input: $input) { success } }";

const DELETE_MUTATION: &str =
    "mutation IssueLabelDelete($id: String!) { issueLabelDelete(id: $id) { success } }";

/// API for issue labels.
pub struct LabelApi {
    client: Arc<LinearClientInner>,
}

impl LabelApi {
    pub(crate) fn new(client: Arc<LinearClientInner>) -> Self {
        Self { client }
    }

    /// List labels of a team, or every label in the workspace.
    pub async fn list(&self, team_id: Option<&str>) -> Result<Vec<Label>> {
        match team_id {
            Some(id) => {
                #[derive(Deserialize)]
                struct Raw {
                    labels: Connection<Label>,
                }

                let team: Option<Raw> =
                    fetch_opt(&self.client, TEAM_LIST_QUERY, json!({ "id": id }), "team").await?;
                Ok(team.map(|t| t.labels.nodes).unwrap_or_default())
            }
            None => {
                let labels: Connection<Label> =
                    fetch(&self.client, LIST_QUERY, json!({}), "issueLabels").await?;
                Ok(labels.nodes)
            }
        }
    }

    /// Get a label by ID.
    pub async fn get(&self, id: &str) -> Result<Option<Label>> {
        fetch_opt(&self.client, GET_QUERY, json!({ "id": id }), "issueLabel").await
    }

    /// Create a label.
    pub async fn create(&self, input: &CreateLabelInput) -> Result<Label> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Created {
            issue_label: Label,
        }

        let created: Created = mutate(
            &self.client,
            CREATE_MUTATION,
            json!({ "input": input }),
            "issueLabelCreate",
        )
        .await?;
        Ok(created.issue_label)
    }

    /// Update a label.
    pub async fn update(&self, id: &str, input: &UpdateLabelInput) -> Result<()> {
        mutate::<Value>(
            &self.client,
            UPDATE_MUTATION,
            json!({ "id": id, "input": input }),
            "issueLabelUpdate",
        )
        .await?;
        Ok(())
    }

    /// Delete a label.
    pub async fn delete(&self, id: &str) -> Result<()> {
        mutate::<Value>(&self.client, DELETE_MUTATION, json!({ "id": id }), "issueLabelDelete")
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_util::client;
    use crate::client::mock::MockTransport;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_list_workspace_and_team() {
        let mock = Arc::new(
            MockTransport::new()
                .respond(json!({ "issueLabels": { "nodes": [
                    { "id": "l1", "name": "bug", "color": "#ff0000", "description": null }
                ] } }))
                .respond(json!({ "team": { "labels": { "nodes": [] } } })),
        );
        let api = client(&mock).labels();

        let all = api.list(None).await.unwrap();
        assert_eq!(all[0].name, "bug");
        assert!(api.list(Some("t1")).await.unwrap().is_empty());

        let requests = mock.requests();
        assert!(requests[0].query.contains("issueLabels"));
        assert_eq!(requests[1].variables, json!({ "id": "t1" }));
    }

    #[tokio::test]
    async fn test_create_skips_unset_fields() {
        let mock = Arc::new(MockTransport::new().respond(json!({
            "issueLabelCreate": { "success": true, "issueLabel": {
                "id": "l2", "name": "infra", "color": "#000000", "description": null
            } }
        })));
        let input = CreateLabelInput {
            name: "infra".into(),
            ..Default::default()
        };
        let label = client(&mock).labels().create(&input).await.unwrap();
        assert_eq!(label.id, "l2");
        assert_eq!(mock.requests()[0].variables["input"], json!({ "name": "infra" }));
    }
}
